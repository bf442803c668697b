use actix_web::dev::HttpServiceFactory;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

use chrono::NaiveDate;

use serde::Deserialize;

use uuid::Uuid;

use crate::error::{RestError, RestResult};
use crate::model::{Customer, CustomerUpdate, NewCustomer};
use crate::repo::Repos;
use crate::scheduler::Notifier;

#[derive(Debug, Deserialize)]
pub struct CreateCustomerBody {
    name: String,
    phone_number: String,
    service_type: String,
    service_date: NaiveDate,
    service_duration: u32,
    service_duration_unit: String,
}

impl TryFrom<CreateCustomerBody> for NewCustomer {
    type Error = RestError;

    fn try_from(body: CreateCustomerBody) -> RestResult<Self> {
        Ok(Self {
            name: body.name.parse()?,
            phone_number: body.phone_number.parse()?,
            service_type: body.service_type,
            service_date: body.service_date,
            service_duration: body.service_duration.try_into()?,
            service_duration_unit: body.service_duration_unit.parse()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCustomerBody {
    name: Option<String>,
    phone_number: Option<String>,
    service_type: Option<String>,
    service_date: Option<NaiveDate>,
    service_duration: Option<u32>,
    service_duration_unit: Option<String>,
}

impl TryFrom<UpdateCustomerBody> for CustomerUpdate {
    type Error = RestError;

    fn try_from(body: UpdateCustomerBody) -> RestResult<Self> {
        Ok(Self {
            name: body.name.map(|v| v.parse()).transpose()?,
            phone_number: body.phone_number.map(|v| v.parse()).transpose()?,
            service_type: body.service_type,
            service_date: body.service_date,
            service_duration: body.service_duration.map(|v| v.try_into()).transpose()?,
            service_duration_unit: body
                .service_duration_unit
                .map(|v| v.parse())
                .transpose()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// Case-insensitive match on name, phone number, or service type
pub fn matches_search(customer: &Customer, term: &str) -> bool {
    let term = term.to_lowercase();

    customer.name.as_ref().to_lowercase().contains(&term)
        || customer.phone_number.as_ref().contains(&term)
        || customer.service_type.to_lowercase().contains(&term)
}

#[tracing::instrument(name = "Create a customer", skip(repos))]
#[post("")]
async fn create(
    body: web::Json<CreateCustomerBody>,
    repos: web::Data<Repos>,
) -> RestResult<impl Responder> {
    let new_customer: NewCustomer = body.into_inner().try_into()?;

    let customer = Customer::create(new_customer);
    repos.customers.save(&customer).await?;

    Ok(HttpResponse::Created().json(customer))
}

#[tracing::instrument(name = "List customers", skip(repos))]
#[get("")]
async fn list(
    query: web::Query<SearchQuery>,
    repos: web::Data<Repos>,
) -> RestResult<impl Responder> {
    let mut customers = repos.customers.list().await?;

    if let Some(term) = query.search.as_deref() {
        customers.retain(|customer| matches_search(customer, term));
    }

    Ok(web::Json(customers))
}

#[tracing::instrument(name = "Update a customer", skip(repos))]
#[put("/{id}")]
async fn update(
    path: web::Path<Uuid>,
    body: web::Json<UpdateCustomerBody>,
    repos: web::Data<Repos>,
) -> RestResult<impl Responder> {
    let id = path.into_inner();
    let update: CustomerUpdate = body.into_inner().try_into()?;

    let mut customer = repos
        .customers
        .find(&id)
        .await?
        .ok_or_else(|| RestError::NotFound(format!("No customer with id {}", id)))?;

    customer.apply(update);
    repos.customers.save(&customer).await?;

    Ok(web::Json(customer))
}

#[tracing::instrument(name = "Delete a customer", skip(repos))]
#[delete("/{id}")]
async fn remove(path: web::Path<Uuid>, repos: web::Data<Repos>) -> RestResult<impl Responder> {
    let id = path.into_inner();

    if !repos.customers.delete(&id).await? {
        return Err(RestError::NotFound(format!("No customer with id {}", id)));
    }

    Ok(HttpResponse::NoContent())
}

#[tracing::instrument(name = "Send a completion notice", skip(notifier))]
#[post("/{id}/completion_notice")]
async fn completion_notice(
    path: web::Path<Uuid>,
    notifier: web::Data<Notifier>,
) -> RestResult<impl Responder> {
    let id = path.into_inner();

    let customer = notifier
        .send_completion_notice(&id)
        .await?
        .ok_or_else(|| RestError::NotFound(format!("No customer with id {}", id)))?;

    Ok(web::Json(customer))
}

/// Customer API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/customers")
        .service(create)
        .service(list)
        .service(update)
        .service(remove)
        .service(completion_notice)
}
