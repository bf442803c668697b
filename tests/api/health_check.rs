use reqwest::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let res = app
        .health_check()
        .await
        .expect("Failed to send health check request");

    assert_eq!(StatusCode::OK, res.status());
    assert_eq!("I am alive", res.text().await.unwrap());
}
