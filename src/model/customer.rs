use uuid::Uuid;

use chrono::{DateTime, NaiveDate, Utc};

use serde::Serialize;

use crate::domain::{next_service_date, CustomerName, DurationUnit, PhoneNumber, ServiceDuration};

/// New customer request, already validated
#[derive(Debug)]
pub struct NewCustomer {
    pub name: CustomerName,
    pub phone_number: PhoneNumber,
    pub service_type: String,
    pub service_date: NaiveDate,
    pub service_duration: ServiceDuration,
    pub service_duration_unit: DurationUnit,
}

/// Partial customer update; `None` keeps the stored value
#[derive(Debug, Default)]
pub struct CustomerUpdate {
    pub name: Option<CustomerName>,
    pub phone_number: Option<PhoneNumber>,
    pub service_type: Option<String>,
    pub service_date: Option<NaiveDate>,
    pub service_duration: Option<ServiceDuration>,
    pub service_duration_unit: Option<DurationUnit>,
}

/// Stored customer record
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    /// ID of the customer
    pub id: Uuid,
    pub name: CustomerName,
    pub phone_number: PhoneNumber,
    /// Free-form label referencing a service type by name
    pub service_type: String,
    /// The most recent completed service
    pub service_date: NaiveDate,
    pub service_duration: ServiceDuration,
    pub service_duration_unit: DurationUnit,
    /// Derived from the service date and recurrence interval, recomputed on
    /// every mutation. Never edited directly.
    pub next_service_date: NaiveDate,
    /// Creation and update timestamps, set on creation / every mutation
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn create(new: NewCustomer) -> Self {
        let now = Utc::now();
        let next = next_service_date(
            new.service_date,
            new.service_duration,
            new.service_duration_unit,
        );

        Self {
            id: Uuid::new_v4(),
            name: new.name,
            phone_number: new.phone_number,
            service_type: new.service_type,
            service_date: new.service_date,
            service_duration: new.service_duration,
            service_duration_unit: new.service_duration_unit,
            next_service_date: next,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update. The next service date is re-derived from the
    /// stored base date and interval, so a caller can never override it.
    pub fn apply(&mut self, update: CustomerUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(service_type) = update.service_type {
            self.service_type = service_type;
        }
        if let Some(service_date) = update.service_date {
            self.service_date = service_date;
        }
        if let Some(service_duration) = update.service_duration {
            self.service_duration = service_duration;
        }
        if let Some(service_duration_unit) = update.service_duration_unit {
            self.service_duration_unit = service_duration_unit;
        }

        self.next_service_date = next_service_date(
            self.service_date,
            self.service_duration,
            self.service_duration_unit,
        );
        self.updated_at = Utc::now();
    }

    /// Calendar days until the next service; negative when overdue
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.next_service_date - today).num_days()
    }
}
