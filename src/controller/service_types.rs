use actix_web::dev::HttpServiceFactory;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

use serde::Deserialize;

use uuid::Uuid;

use crate::error::{RestError, RestResult};
use crate::model::ServiceType;
use crate::repo::Repos;

#[derive(Debug, Deserialize)]
pub struct ServiceTypeBody {
    name: String,
}

impl ServiceTypeBody {
    fn name(&self) -> RestResult<&str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RestError::ParseError(
                "Service type name cannot be empty".into(),
            ));
        }
        Ok(name)
    }
}

#[tracing::instrument(name = "Create a service type", skip(repos))]
#[post("")]
async fn create(
    body: web::Json<ServiceTypeBody>,
    repos: web::Data<Repos>,
) -> RestResult<impl Responder> {
    let service_type = ServiceType::new(body.name()?);
    repos.service_types.insert(&service_type).await?;

    Ok(HttpResponse::Created().json(service_type))
}

#[tracing::instrument(name = "List service types", skip(repos))]
#[get("")]
async fn list(repos: web::Data<Repos>) -> RestResult<impl Responder> {
    let service_types = repos.service_types.list().await?;

    Ok(web::Json(service_types))
}

#[tracing::instrument(name = "Rename a service type", skip(repos))]
#[put("/{id}")]
async fn rename(
    path: web::Path<Uuid>,
    body: web::Json<ServiceTypeBody>,
    repos: web::Data<Repos>,
) -> RestResult<impl Responder> {
    let id = path.into_inner();

    if !repos.service_types.rename(&id, body.name()?).await? {
        return Err(RestError::NotFound(format!(
            "No service type with id {}",
            id
        )));
    }

    Ok(HttpResponse::Ok())
}

#[tracing::instrument(name = "Delete a service type", skip(repos))]
#[delete("/{id}")]
async fn remove(path: web::Path<Uuid>, repos: web::Data<Repos>) -> RestResult<impl Responder> {
    let id = path.into_inner();

    if !repos.service_types.delete(&id).await? {
        return Err(RestError::NotFound(format!(
            "No service type with id {}",
            id
        )));
    }

    Ok(HttpResponse::NoContent())
}

/// Service type API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/service_types")
        .service(create)
        .service(list)
        .service(rename)
        .service(remove)
}
