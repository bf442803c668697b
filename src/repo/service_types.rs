use std::sync::Mutex;

use uuid::Uuid;

use sqlx::PgPool;

use crate::model::ServiceType;

/// Labels offered to the user by default before any have been customized
const DEFAULT_SERVICE_TYPES: [&str; 3] = ["Solar", "Water Filter", "UPS"];

#[async_trait::async_trait]
pub trait ServiceTypeRepo: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<ServiceType>>;

    async fn insert(&self, service_type: &ServiceType) -> anyhow::Result<()>;

    /// Rename a service type. Returns false when no record existed.
    async fn rename(&self, id: &Uuid, name: &str) -> anyhow::Result<bool>;

    /// Delete a service type. Returns false when no record existed.
    async fn delete(&self, id: &Uuid) -> anyhow::Result<bool>;
}

/// Postgres service-type repository. Defaults are seeded by migration.
#[derive(Debug)]
pub struct PgServiceTypeRepo {
    pool: PgPool,
}

impl PgServiceTypeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ServiceTypeRow {
    id: Uuid,
    name: String,
}

#[async_trait::async_trait]
impl ServiceTypeRepo for PgServiceTypeRepo {
    #[tracing::instrument(name = "Fetch all service types", skip(self))]
    async fn list(&self) -> anyhow::Result<Vec<ServiceType>> {
        let rows =
            sqlx::query_as::<_, ServiceTypeRow>("select id, name from service_types order by name")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|row| ServiceType {
                id: row.id,
                name: row.name,
            })
            .collect())
    }

    #[tracing::instrument(name = "Insert a service type", skip(self))]
    async fn insert(&self, service_type: &ServiceType) -> anyhow::Result<()> {
        sqlx::query("insert into service_types (id, name) values ($1, $2)")
            .bind(service_type.id)
            .bind(&service_type.name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    #[tracing::instrument(name = "Rename a service type", skip(self))]
    async fn rename(&self, id: &Uuid, name: &str) -> anyhow::Result<bool> {
        let result = sqlx::query("update service_types set name = $2 where id = $1")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(name = "Delete a service type", skip(self))]
    async fn delete(&self, id: &Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("delete from service_types where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// In-memory service-type repository, seeded with the default labels
#[derive(Debug)]
pub struct InMemoryServiceTypeRepo {
    service_types: Mutex<Vec<ServiceType>>,
}

impl Default for InMemoryServiceTypeRepo {
    fn default() -> Self {
        let seeded = DEFAULT_SERVICE_TYPES
            .iter()
            .map(|name| ServiceType::new(*name))
            .collect();

        Self {
            service_types: Mutex::new(seeded),
        }
    }
}

#[async_trait::async_trait]
impl ServiceTypeRepo for InMemoryServiceTypeRepo {
    async fn list(&self) -> anyhow::Result<Vec<ServiceType>> {
        let service_types = self.service_types.lock().unwrap();
        Ok(service_types.clone())
    }

    async fn insert(&self, service_type: &ServiceType) -> anyhow::Result<()> {
        let mut service_types = self.service_types.lock().unwrap();
        service_types.push(service_type.clone());
        Ok(())
    }

    async fn rename(&self, id: &Uuid, name: &str) -> anyhow::Result<bool> {
        let mut service_types = self.service_types.lock().unwrap();
        match service_types.iter_mut().find(|s| s.id == *id) {
            Some(service_type) => {
                service_type.name = name.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &Uuid) -> anyhow::Result<bool> {
        let mut service_types = self.service_types.lock().unwrap();
        let len_before = service_types.len();
        service_types.retain(|s| s.id != *id);
        Ok(service_types.len() < len_before)
    }
}
