use actix_web::dev::HttpServiceFactory;
use actix_web::{get, web, Responder};

use chrono::{Local, NaiveDate};

use serde::Serialize;

use uuid::Uuid;

use crate::controller::customers::{matches_search, SearchQuery};
use crate::domain::{CustomerName, PhoneNumber};
use crate::error::RestResult;
use crate::model::Customer;
use crate::repo::Repos;

/// A customer ranked by how soon (or how long ago) their next service is due
#[derive(Debug, Serialize)]
pub struct CheckerEntry {
    pub id: Uuid,
    pub name: CustomerName,
    pub phone_number: PhoneNumber,
    pub service_date: NaiveDate,
    pub next_service_date: NaiveDate,
    /// Negative when the service is overdue
    pub days_left: i64,
}

impl CheckerEntry {
    fn new(customer: &Customer, today: NaiveDate) -> Self {
        Self {
            id: customer.id,
            name: customer.name.clone(),
            phone_number: customer.phone_number.clone(),
            service_date: customer.service_date,
            next_service_date: customer.next_service_date,
            days_left: customer.days_left(today),
        }
    }
}

/// Rank customers by days remaining, most urgent first
pub fn rank(customers: &[Customer], today: NaiveDate) -> Vec<CheckerEntry> {
    let mut entries: Vec<CheckerEntry> = customers
        .iter()
        .map(|customer| CheckerEntry::new(customer, today))
        .collect();
    entries.sort_by_key(|entry| entry.days_left);
    entries
}

#[tracing::instrument(name = "Checker ranking", skip(repos))]
#[get("")]
async fn list(
    query: web::Query<SearchQuery>,
    repos: web::Data<Repos>,
) -> RestResult<impl Responder> {
    let mut customers = repos.customers.list().await?;

    if let Some(term) = query.search.as_deref() {
        customers.retain(|customer| matches_search(customer, term));
    }

    let today = Local::now().date_naive();
    Ok(web::Json(rank(&customers, today)))
}

/// Checker API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/checker").service(list)
}
