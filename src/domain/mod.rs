mod customer_name;
mod phone_number;
mod recurrence;

pub use customer_name::CustomerName;
pub use phone_number::PhoneNumber;
pub use recurrence::{next_service_date, DurationUnit, ServiceDuration};
