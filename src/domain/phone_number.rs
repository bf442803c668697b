use std::fmt;
use std::str::FromStr;

use regex::Regex;

use serde::Serialize;

use crate::error::Error;

/// A customer supplied phone number: exactly ten digits, no separators
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// The form expected by the SMS gateway: a leading country-code sign
    /// followed by the digits
    pub fn dialable(&self) -> String {
        format!("+{}", self.0)
    }
}

impl FromStr for PhoneNumber {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        lazy_static::lazy_static! {
            static ref PHONE_REGEX: Regex = Regex::new(r"^\d{10}$").unwrap();
        }

        let value = value.trim();
        if !PHONE_REGEX.is_match(value) {
            return Err(Error::ParsingError(
                "Phone number must be exactly 10 digits".into(),
            ));
        }

        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
