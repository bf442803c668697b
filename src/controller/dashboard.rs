use std::collections::BTreeMap;

use actix_web::dev::HttpServiceFactory;
use actix_web::{get, web, Responder};

use chrono::{Local, NaiveDate};

use serde::Serialize;

use crate::error::RestResult;
use crate::model::Customer;
use crate::repo::Repos;
use crate::scheduler::NOTIFICATION_LEAD_DAYS;

const UPCOMING_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    total_customers: usize,
    /// Services due within the next 30 days
    upcoming_services: usize,
    /// Services whose next date has already passed
    overdue_services: usize,
    /// Services inside the SMS alert window
    sms_alerts: usize,
    service_type_distribution: Vec<ServiceTypeCount>,
}

#[derive(Debug, Serialize)]
pub struct ServiceTypeCount {
    name: String,
    value: usize,
}

impl DashboardSummary {
    pub fn compute(customers: &[Customer], today: NaiveDate) -> Self {
        let mut type_counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut upcoming_services = 0;
        let mut overdue_services = 0;
        let mut sms_alerts = 0;

        for customer in customers {
            *type_counts.entry(customer.service_type.as_str()).or_insert(0) += 1;

            let days_left = customer.days_left(today);
            if days_left < 0 {
                overdue_services += 1;
            }
            if (0..=UPCOMING_WINDOW_DAYS).contains(&days_left) {
                upcoming_services += 1;
            }
            if (0..=NOTIFICATION_LEAD_DAYS).contains(&days_left) {
                sms_alerts += 1;
            }
        }

        Self {
            total_customers: customers.len(),
            upcoming_services,
            overdue_services,
            sms_alerts,
            service_type_distribution: type_counts
                .into_iter()
                .map(|(name, value)| ServiceTypeCount {
                    name: name.to_string(),
                    value,
                })
                .collect(),
        }
    }
}

#[tracing::instrument(name = "Dashboard summary", skip(repos))]
#[get("")]
async fn summary(repos: web::Data<Repos>) -> RestResult<impl Responder> {
    let customers = repos.customers.list().await?;
    let today = Local::now().date_naive();

    Ok(web::Json(DashboardSummary::compute(&customers, today)))
}

/// Dashboard API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/dashboard").service(summary)
}
