pub mod checker;
pub mod customers;
pub mod dashboard;
pub mod service_types;
