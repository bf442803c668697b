/// Basic application code
pub mod app;
/// REST clients for outside services
pub mod client;
/// Controllers for REST endpoints
pub mod controller;
/// Domain objects
pub mod domain;
/// Error enums
pub mod error;
/// Record types held by the store
pub mod model;
/// Store interfaces and implementations
pub mod repo;
/// Reminder scheduling and notification dispatch
pub mod scheduler;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
