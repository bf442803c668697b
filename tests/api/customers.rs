use reqwest::StatusCode;

use uuid::Uuid;

use crate::helpers::{NewCustomer, TestApp};

#[tokio::test]
async fn create_derives_next_service_date_server_side() {
    let app = TestApp::spawn().await;

    let res = app
        .customer_create(&NewCustomer::valid())
        .await
        .expect("Failed to send request to create customer");

    assert_eq!(StatusCode::CREATED, res.status());

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!("2024-02-29", body["next_service_date"]);
    assert_eq!("2024-01-31", body["service_date"]);
}

#[tokio::test]
async fn client_supplied_next_service_date_is_ignored() {
    let app = TestApp::spawn().await;

    let mut body = serde_json::to_value(NewCustomer::valid()).unwrap();
    body["next_service_date"] = serde_json::json!("2030-12-25");

    let res = app
        .customer_create_raw(&body)
        .await
        .expect("Failed to send request to create customer");

    assert_eq!(StatusCode::CREATED, res.status());

    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!("2024-02-29", created["next_service_date"]);
}

#[tokio::test]
async fn malformed_customers_are_rejected() {
    let app = TestApp::spawn().await;

    let test_cases = vec![
        (
            "Missing Name",
            NewCustomer {
                name: None,
                ..NewCustomer::valid()
            },
        ),
        (
            "Missing Phone Number",
            NewCustomer {
                phone_number: None,
                ..NewCustomer::valid()
            },
        ),
        (
            "Nine Digit Phone Number",
            NewCustomer {
                phone_number: Some("900877320".into()),
                ..NewCustomer::valid()
            },
        ),
        (
            "Formatted Phone Number",
            NewCustomer {
                phone_number: Some("(900) 877-3200".into()),
                ..NewCustomer::valid()
            },
        ),
        (
            "Zero Duration",
            NewCustomer {
                service_duration: Some(0),
                ..NewCustomer::valid()
            },
        ),
        (
            "Unknown Duration Unit",
            NewCustomer {
                service_duration_unit: Some("weeks".into()),
                ..NewCustomer::valid()
            },
        ),
    ];

    for (test_name, new_customer) in test_cases {
        let res = app
            .customer_create(&new_customer)
            .await
            .expect("Failed to send request to create customer");

        assert_eq!(StatusCode::BAD_REQUEST, res.status(), "{}", test_name);
    }
}

#[tokio::test]
async fn search_filters_the_listing() {
    let app = TestApp::spawn().await;

    app.seed_customer(&NewCustomer {
        name: Some("Asha Rao".into()),
        phone_number: Some("9008773200".into()),
        ..NewCustomer::valid()
    })
    .await;
    app.seed_customer(&NewCustomer {
        name: Some("Ravi Kumar".into()),
        phone_number: Some("8884441111".into()),
        service_type: Some("Water Filter".into()),
        ..NewCustomer::valid()
    })
    .await;

    let all: serde_json::Value = app
        .customer_list(None)
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(2, all.as_array().unwrap().len());

    // By name, case-insensitively
    let by_name: serde_json::Value = app
        .customer_list(Some("asha"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(1, by_name.as_array().unwrap().len());
    assert_eq!("Asha Rao", by_name[0]["name"]);

    // By phone number fragment
    let by_phone: serde_json::Value = app
        .customer_list(Some("888444"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(1, by_phone.as_array().unwrap().len());
    assert_eq!("Ravi Kumar", by_phone[0]["name"]);

    // By service type
    let by_type: serde_json::Value = app
        .customer_list(Some("water"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(1, by_type.as_array().unwrap().len());

    // No match
    let none: serde_json::Value = app
        .customer_list(Some("zzz"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(none.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn updating_the_interval_recomputes_next_service_date() {
    let app = TestApp::spawn().await;
    let id = app.seed_customer(&NewCustomer::valid()).await;

    let res = app
        .customer_update(&id, &serde_json::json!({ "service_duration": 3 }))
        .await
        .expect("Failed to send request to update customer");

    assert_eq!(StatusCode::OK, res.status());

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!("2024-04-30", body["next_service_date"]);
}

#[tokio::test]
async fn updating_unrelated_fields_keeps_next_service_date() {
    let app = TestApp::spawn().await;
    let id = app.seed_customer(&NewCustomer::valid()).await;

    let res = app
        .customer_update(&id, &serde_json::json!({ "name": "Renamed Customer" }))
        .await
        .expect("Failed to send request to update customer");

    assert_eq!(StatusCode::OK, res.status());

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!("Renamed Customer", body["name"]);
    assert_eq!("2024-02-29", body["next_service_date"]);
}

#[tokio::test]
async fn updating_a_missing_customer_is_a_404() {
    let app = TestApp::spawn().await;

    let res = app
        .customer_update(&Uuid::new_v4(), &serde_json::json!({ "name": "Ghost" }))
        .await
        .expect("Failed to send request to update customer");

    assert_eq!(StatusCode::NOT_FOUND, res.status());
}

#[tokio::test]
async fn delete_removes_the_customer() {
    let app = TestApp::spawn().await;
    let id = app.seed_customer(&NewCustomer::valid()).await;

    let res = app
        .customer_delete(&id)
        .await
        .expect("Failed to send request to delete customer");
    assert_eq!(StatusCode::NO_CONTENT, res.status());

    let all: serde_json::Value = app
        .customer_list(None)
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(all.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_missing_customer_is_a_404() {
    let app = TestApp::spawn().await;

    let res = app
        .customer_delete(&Uuid::new_v4())
        .await
        .expect("Failed to send request to delete customer");

    assert_eq!(StatusCode::NOT_FOUND, res.status());
}
