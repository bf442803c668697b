use reqwest::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn defaults_are_listed() {
    let app = TestApp::spawn().await;

    let res = app
        .service_type_list()
        .await
        .expect("Failed to send service type listing request");
    assert_eq!(StatusCode::OK, res.status());

    let body: serde_json::Value = res.json().await.unwrap();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(vec!["Solar", "Water Filter", "UPS"], names);
}

#[tokio::test]
async fn create_adds_a_service_type() {
    let app = TestApp::spawn().await;

    let res = app
        .service_type_create("Generator")
        .await
        .expect("Failed to send service type create request");
    assert_eq!(StatusCode::CREATED, res.status());

    let body: serde_json::Value = app
        .service_type_list()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(4, body.as_array().unwrap().len());
}

#[tokio::test]
async fn blank_names_are_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .service_type_create("   ")
        .await
        .expect("Failed to send service type create request");

    assert_eq!(StatusCode::BAD_REQUEST, res.status());
}
