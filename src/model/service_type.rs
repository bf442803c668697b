use uuid::Uuid;

use serde::Serialize;

/// A service category offered to customers.
/// Names are unique by convention only; duplicates are user-correctable.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceType {
    pub id: Uuid,
    pub name: String,
}

impl ServiceType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
