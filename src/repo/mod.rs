mod customers;
mod notification_status;
mod service_types;

pub use customers::{CustomerRepo, InMemoryCustomerRepo, PgCustomerRepo};
pub use notification_status::{
    InMemoryNotificationStatusRepo, NotificationStatusRepo, PgNotificationStatusRepo,
};
pub use service_types::{InMemoryServiceTypeRepo, PgServiceTypeRepo, ServiceTypeRepo};

use std::sync::Arc;

use sqlx::PgPool;

/// Bundle of store handles shared by the REST layer and the scheduler
#[derive(Clone)]
pub struct Repos {
    pub customers: Arc<dyn CustomerRepo>,
    pub service_types: Arc<dyn ServiceTypeRepo>,
    pub notification_status: Arc<dyn NotificationStatusRepo>,
}

impl Repos {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            customers: Arc::new(PgCustomerRepo::new(pool.clone())),
            service_types: Arc::new(PgServiceTypeRepo::new(pool.clone())),
            notification_status: Arc::new(PgNotificationStatusRepo::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            customers: Arc::new(InMemoryCustomerRepo::default()),
            service_types: Arc::new(InMemoryServiceTypeRepo::default()),
            notification_status: Arc::new(InMemoryNotificationStatusRepo::default()),
        }
    }
}
