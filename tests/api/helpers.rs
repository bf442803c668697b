use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use reqwest::{Client, Method, Response};

use serde::Serialize;

use url::Url;

use uuid::Uuid;

use wiremock::MockServer;

use service_scheduler::app;
use service_scheduler::client::{SmsAuthSecret, SmsClient};
use service_scheduler::repo::Repos;
use service_scheduler::scheduler::Notifier;

pub const TEST_BRAND: &str = "Service Scheduler";

#[derive(Debug, Serialize)]
pub struct NewCustomer {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub service_type: Option<String>,
    pub service_date: Option<String>,
    pub service_duration: Option<u32>,
    pub service_duration_unit: Option<String>,
}

impl NewCustomer {
    pub fn valid() -> Self {
        Self {
            name: Some("Test Customer".into()),
            phone_number: Some("9008773200".into()),
            service_type: Some("Solar".into()),
            service_date: Some("2024-01-31".into()),
            service_duration: Some(1),
            service_duration_unit: Some("months".into()),
        }
    }
}

pub struct TestApp {
    addr: String,

    pub client: Client,
    pub sms_server: MockServer,
    pub repos: Repos,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let sms_server = MockServer::start().await;

        let sms_client = {
            let api_base_url =
                Url::parse(&sms_server.uri()).expect("Failed to parse mock server uri");
            let auth_secret: SmsAuthSecret = "TestAuthSecret".parse().unwrap();
            let api_timeout = Duration::from_secs(2);

            SmsClient::new(
                "AC0123456789abcdef".into(),
                auth_secret,
                "15005550006".into(),
                api_timeout,
                api_base_url,
            )
            .expect("Failed to create sms client")
        };

        let repos = Repos::in_memory();
        let notifier = Arc::new(Notifier::new(repos.clone(), sms_client, TEST_BRAND.into()));

        let server =
            app::run(listener, repos.clone(), notifier).expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::new();

        Self {
            addr,
            client,
            sms_server,
            repos,
        }
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "health_check").send().await
    }

    pub async fn customer_create(&self, new_customer: &NewCustomer) -> reqwest::Result<Response> {
        self.request(Method::POST, "customers")
            .json(new_customer)
            .send()
            .await
    }

    pub async fn customer_create_raw(
        &self,
        body: &serde_json::Value,
    ) -> reqwest::Result<Response> {
        self.request(Method::POST, "customers")
            .json(body)
            .send()
            .await
    }

    pub async fn customer_list(&self, search: Option<&str>) -> reqwest::Result<Response> {
        let mut req = self.request(Method::GET, "customers");
        if let Some(term) = search {
            req = req.query(&[("search", term)]);
        }
        req.send().await
    }

    pub async fn customer_update(
        &self,
        id: &Uuid,
        body: &serde_json::Value,
    ) -> reqwest::Result<Response> {
        self.request(Method::PUT, &format!("customers/{}", id))
            .json(body)
            .send()
            .await
    }

    pub async fn customer_delete(&self, id: &Uuid) -> reqwest::Result<Response> {
        self.request(Method::DELETE, &format!("customers/{}", id))
            .send()
            .await
    }

    pub async fn completion_notice(&self, id: &Uuid) -> reqwest::Result<Response> {
        self.request(Method::POST, &format!("customers/{}/completion_notice", id))
            .send()
            .await
    }

    pub async fn service_type_list(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "service_types").send().await
    }

    pub async fn service_type_create(&self, name: &str) -> reqwest::Result<Response> {
        self.request(Method::POST, "service_types")
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await
    }

    pub async fn dashboard(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "dashboard").send().await
    }

    pub async fn checker(&self, search: Option<&str>) -> reqwest::Result<Response> {
        let mut req = self.request(Method::GET, "checker");
        if let Some(term) = search {
            req = req.query(&[("search", term)]);
        }
        req.send().await
    }

    /// Create a customer through the API and return its id
    pub async fn seed_customer(&self, new_customer: &NewCustomer) -> Uuid {
        let res = self
            .customer_create(new_customer)
            .await
            .expect("Failed to send request to create customer");
        assert!(res.status().is_success(), "Failed to seed customer");

        let body: serde_json::Value = res.json().await.expect("Failed to parse customer body");
        body["id"]
            .as_str()
            .and_then(|id| id.parse().ok())
            .expect("Customer body is missing an id")
    }

    /// A customer whose next service date lands `days` after `today`
    pub fn customer_due_in_days(today: NaiveDate, days: i64) -> NewCustomer {
        // Anchor the base date in the past so the offset can be negative
        let service_date = today - chrono::Duration::days(60 - days);

        NewCustomer {
            service_date: Some(service_date.format("%Y-%m-%d").to_string()),
            service_duration: Some(60),
            service_duration_unit: Some("days".into()),
            ..NewCustomer::valid()
        }
    }
}
