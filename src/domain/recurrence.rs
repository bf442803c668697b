use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Months, NaiveDate};

use serde::Serialize;

use crate::error::Error;

/// Calendar unit of a recurrence interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Days,
    Months,
    Years,
}

impl DurationUnit {
    pub fn as_str(&self) -> &str {
        match self {
            DurationUnit::Days => "days",
            DurationUnit::Months => "months",
            DurationUnit::Years => "years",
        }
    }
}

impl FromStr for DurationUnit {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "days" => Ok(Self::Days),
            "months" => Ok(Self::Months),
            "years" => Ok(Self::Years),
            other => Err(Error::ParsingError(format!(
                "{} is not a valid duration unit",
                other
            ))),
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many units pass between two services. At least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceDuration(u32);

impl ServiceDuration {
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for ServiceDuration {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value < 1 {
            return Err(Error::ParsingError(
                "Service duration must be at least 1".into(),
            ));
        }
        Ok(Self(value))
    }
}

/// Derive the next service date from the most recent service date and the
/// recurrence interval.
///
/// Month and year additions keep the day-of-month, clamped to the last day
/// of a shorter target month: Jan 31 + 1 month is Feb 28 (or Feb 29 in a
/// leap year), and Feb 29 + 1 year is Feb 28.
pub fn next_service_date(
    base: NaiveDate,
    duration: ServiceDuration,
    unit: DurationUnit,
) -> NaiveDate {
    match unit {
        DurationUnit::Days => base + Duration::days(duration.get() as i64),
        DurationUnit::Months => base + Months::new(duration.get()),
        DurationUnit::Years => base + Months::new(duration.get() * 12),
    }
}
