use std::convert::Infallible;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

use reqwest::Client;

use serde::Serialize;

use secrecy::Secret;

use url::Url;

use crate::domain::PhoneNumber;
use crate::error::{Error, Result};

#[derive(Debug)]
pub struct SmsClient {
    client: Client,
    sender_number: String,
    account_id: String,

    api_send_message_url: Url,
    auth_secret: SmsAuthSecret,
}

impl SmsClient {
    pub fn new(
        account_id: String,
        auth_secret: SmsAuthSecret,
        sender_number: String,
        api_timeout: Duration,
        api_base_url: Url,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(api_timeout)
            .build()
            .context("Failed to build http client")?;

        let api_send_message_url = api_base_url
            .join(&format!("2010-04-01/Accounts/{}/Messages.json", account_id))
            .context("Failed to create send message endpoint URL")?;

        // The gateway rejects numbers without a country-code sign
        let sender_number = if sender_number.starts_with('+') {
            sender_number
        } else {
            format!("+{}", sender_number)
        };

        Ok(Self {
            client,
            sender_number,
            account_id,
            api_send_message_url,
            auth_secret,
        })
    }

    pub async fn send(&self, recipient: &PhoneNumber, message: &str) -> Result<()> {
        use secrecy::ExposeSecret;

        let form = SendMessageRequest {
            to: recipient.dialable(),
            from: &self.sender_number,
            body: message,
        };

        self.client
            .post(self.api_send_message_url.clone())
            .basic_auth(&self.account_id, Some(self.auth_secret.expose_secret()))
            .form(&form)
            .send()
            .await
            .map_err(Error::SendSmsError)?
            .error_for_status()
            .map_err(Error::SendSmsError)?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct SmsAuthSecret(Secret<String>);

impl FromStr for SmsAuthSecret {
    type Err = Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Infallible> {
        let value = value.to_string();
        let value = Secret::new(value);

        Ok(Self(value))
    }
}

impl From<Secret<String>> for SmsAuthSecret {
    fn from(value: Secret<String>) -> Self {
        Self(value)
    }
}

impl secrecy::ExposeSecret<String> for SmsAuthSecret {
    fn expose_secret(&self) -> &String {
        self.0.expose_secret()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendMessageRequest<'a> {
    to: String,
    from: &'a str,
    body: &'a str,
}
