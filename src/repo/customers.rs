use std::sync::Mutex;

use uuid::Uuid;

use chrono::{DateTime, NaiveDate, Utc};

use sqlx::PgPool;

use crate::model::Customer;

/// Customer store interface. The scheduler and the REST layer only ever see
/// this trait; the concrete store is wired in at startup.
#[async_trait::async_trait]
pub trait CustomerRepo: Send + Sync {
    /// Fetch every customer, in stable store iteration order
    async fn list(&self) -> anyhow::Result<Vec<Customer>>;

    /// Fetch a single customer by id
    async fn find(&self, id: &Uuid) -> anyhow::Result<Option<Customer>>;

    /// Insert a new customer, or fully replace an existing one by id
    async fn save(&self, customer: &Customer) -> anyhow::Result<()>;

    /// Delete a customer by id. Returns false when no record existed.
    async fn delete(&self, id: &Uuid) -> anyhow::Result<bool>;
}

/// Postgres customer repository
#[derive(Debug)]
pub struct PgCustomerRepo {
    pool: PgPool,
}

impl PgCustomerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    phone_number: String,
    service_type: String,
    service_date: NaiveDate,
    service_duration: i32,
    service_duration_unit: String,
    next_service_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = anyhow::Error;

    fn try_from(row: CustomerRow) -> anyhow::Result<Self> {
        use anyhow::Context;

        Ok(Self {
            id: row.id,
            name: row.name.parse().context("Invalid customer name in store")?,
            phone_number: row
                .phone_number
                .parse()
                .context("Invalid phone number in store")?,
            service_type: row.service_type,
            service_date: row.service_date,
            service_duration: u32::try_from(row.service_duration)
                .ok()
                .and_then(|n| n.try_into().ok())
                .context("Invalid service duration in store")?,
            service_duration_unit: row
                .service_duration_unit
                .parse()
                .context("Invalid duration unit in store")?,
            next_service_date: row.next_service_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait::async_trait]
impl CustomerRepo for PgCustomerRepo {
    #[tracing::instrument(name = "Fetch all customers", skip(self))]
    async fn list(&self) -> anyhow::Result<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "select id, name, phone_number, service_type, service_date, service_duration, \
             service_duration_unit, next_service_date, created_at, updated_at \
             from customers order by created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Customer::try_from).collect()
    }

    #[tracing::instrument(name = "Fetch a customer by id", skip(self))]
    async fn find(&self, id: &Uuid) -> anyhow::Result<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "select id, name, phone_number, service_type, service_date, service_duration, \
             service_duration_unit, next_service_date, created_at, updated_at \
             from customers where id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Customer::try_from).transpose()
    }

    #[tracing::instrument(name = "Save a customer", skip(self, customer))]
    async fn save(&self, customer: &Customer) -> anyhow::Result<()> {
        sqlx::query(
            "insert into customers (id, name, phone_number, service_type, service_date, \
             service_duration, service_duration_unit, next_service_date, created_at, updated_at) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             on conflict (id) do update set \
             name = excluded.name, \
             phone_number = excluded.phone_number, \
             service_type = excluded.service_type, \
             service_date = excluded.service_date, \
             service_duration = excluded.service_duration, \
             service_duration_unit = excluded.service_duration_unit, \
             next_service_date = excluded.next_service_date, \
             updated_at = excluded.updated_at",
        )
        .bind(customer.id)
        .bind(customer.name.as_ref())
        .bind(customer.phone_number.as_ref())
        .bind(&customer.service_type)
        .bind(customer.service_date)
        .bind(customer.service_duration.get() as i32)
        .bind(customer.service_duration_unit.as_str())
        .bind(customer.next_service_date)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(name = "Delete a customer", skip(self))]
    async fn delete(&self, id: &Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("delete from customers where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// In-memory customer repository, used by the test harness and any
/// deployment that does not need durable records
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepo {
    customers: Mutex<Vec<Customer>>,
}

#[async_trait::async_trait]
impl CustomerRepo for InMemoryCustomerRepo {
    async fn list(&self) -> anyhow::Result<Vec<Customer>> {
        let customers = self.customers.lock().unwrap();
        Ok(customers.clone())
    }

    async fn find(&self, id: &Uuid) -> anyhow::Result<Option<Customer>> {
        let customers = self.customers.lock().unwrap();
        Ok(customers.iter().find(|c| c.id == *id).cloned())
    }

    async fn save(&self, customer: &Customer) -> anyhow::Result<()> {
        let mut customers = self.customers.lock().unwrap();
        match customers.iter_mut().find(|c| c.id == customer.id) {
            Some(existing) => *existing = customer.clone(),
            None => customers.push(customer.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> anyhow::Result<bool> {
        let mut customers = self.customers.lock().unwrap();
        let len_before = customers.len();
        customers.retain(|c| c.id != *id);
        Ok(customers.len() < len_before)
    }
}
