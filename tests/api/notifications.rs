use reqwest::StatusCode;

use uuid::Uuid;

use wiremock::matchers::*;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{NewCustomer, TestApp};

#[tokio::test]
async fn completion_notice_is_dispatched_to_the_gateway() {
    let app = TestApp::spawn().await;
    let id = app.seed_customer(&NewCustomer::valid()).await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/2010-04-01/Accounts/.*/Messages.json$"))
        .and(header_exists("Authorization"))
        .and(body_string_contains("Thank+you+for+choosing"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.sms_server)
        .await;

    let res = app
        .completion_notice(&id)
        .await
        .expect("Failed to send completion notice request");

    assert_eq!(StatusCode::OK, res.status());
}

#[tokio::test]
async fn completion_notice_does_not_mutate_notification_state() {
    let app = TestApp::spawn().await;
    let id = app.seed_customer(&NewCustomer::valid()).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.sms_server)
        .await;

    app.completion_notice(&id)
        .await
        .expect("Failed to send completion notice request");

    let status = app.repos.notification_status.get(&id).await.unwrap();
    assert!(!status.is_sent);
    assert_eq!(None, status.last_sent);
}

#[tokio::test]
async fn completion_notice_for_missing_customer_is_a_404() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.sms_server)
        .await;

    let res = app
        .completion_notice(&Uuid::new_v4())
        .await
        .expect("Failed to send completion notice request");

    assert_eq!(StatusCode::NOT_FOUND, res.status());
}

#[tokio::test]
async fn gateway_failure_surfaces_as_server_error() {
    let app = TestApp::spawn().await;
    let id = app.seed_customer(&NewCustomer::valid()).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.sms_server)
        .await;

    let res = app
        .completion_notice(&id)
        .await
        .expect("Failed to send completion notice request");

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());
}
