use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use chrono::{DateTime, Utc};

use sqlx::PgPool;

use crate::model::NotificationStatus;

/// Per-customer record of the reminder already dispatched for the current
/// cycle. The scheduler is the sole writer; last-write-wins per id.
#[async_trait::async_trait]
pub trait NotificationStatusRepo: Send + Sync {
    /// Fetch the status for a customer, defaulting to "never sent" when no
    /// record exists yet
    async fn get(&self, customer_id: &Uuid) -> anyhow::Result<NotificationStatus>;

    /// Full overwrite with upsert semantics: create when absent, else replace
    async fn set(&self, customer_id: &Uuid, status: NotificationStatus) -> anyhow::Result<()>;
}

/// Postgres notification-status repository
#[derive(Debug)]
pub struct PgNotificationStatusRepo {
    pool: PgPool,
}

impl PgNotificationStatusRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct NotificationStatusRow {
    last_sent: Option<DateTime<Utc>>,
    is_sent: bool,
}

impl From<NotificationStatusRow> for NotificationStatus {
    fn from(row: NotificationStatusRow) -> Self {
        Self {
            last_sent: row.last_sent,
            is_sent: row.is_sent,
        }
    }
}

#[async_trait::async_trait]
impl NotificationStatusRepo for PgNotificationStatusRepo {
    #[tracing::instrument(name = "Fetch notification status", skip(self))]
    async fn get(&self, customer_id: &Uuid) -> anyhow::Result<NotificationStatus> {
        let row = sqlx::query_as::<_, NotificationStatusRow>(
            "select last_sent, is_sent from notification_status where customer_id = $1",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(NotificationStatus::from).unwrap_or_default())
    }

    #[tracing::instrument(name = "Set notification status", skip(self))]
    async fn set(&self, customer_id: &Uuid, status: NotificationStatus) -> anyhow::Result<()> {
        sqlx::query(
            "insert into notification_status (customer_id, last_sent, is_sent) \
             values ($1, $2, $3) \
             on conflict (customer_id) do update set \
             last_sent = excluded.last_sent, \
             is_sent = excluded.is_sent",
        )
        .bind(customer_id)
        .bind(status.last_sent)
        .bind(status.is_sent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// In-memory notification-status repository
#[derive(Debug, Default)]
pub struct InMemoryNotificationStatusRepo {
    statuses: Mutex<HashMap<Uuid, NotificationStatus>>,
}

#[async_trait::async_trait]
impl NotificationStatusRepo for InMemoryNotificationStatusRepo {
    async fn get(&self, customer_id: &Uuid) -> anyhow::Result<NotificationStatus> {
        let statuses = self.statuses.lock().unwrap();
        Ok(statuses.get(customer_id).cloned().unwrap_or_default())
    }

    async fn set(&self, customer_id: &Uuid, status: NotificationStatus) -> anyhow::Result<()> {
        let mut statuses = self.statuses.lock().unwrap();
        statuses.insert(*customer_id, status);
        Ok(())
    }
}
