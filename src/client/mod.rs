mod sms_client;

pub use sms_client::{SmsAuthSecret, SmsClient};
