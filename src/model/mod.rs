mod customer;
mod notification;
mod service_type;

pub use customer::{Customer, CustomerUpdate, NewCustomer};
pub use notification::NotificationStatus;
pub use service_type::ServiceType;
