use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use tracing_actix_web::TracingLogger;

use crate::controller::{checker, customers, dashboard, service_types};
use crate::repo::Repos;
use crate::scheduler::Notifier;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("I am alive")
}

/// Run the application on a specified TCP listener
pub fn run(listener: TcpListener, repos: Repos, notifier: Arc<Notifier>) -> anyhow::Result<Server> {
    // Wrap application data
    let repos = web::Data::new(repos);
    let notifier = web::Data::from(notifier);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(repos.clone())
            .app_data(notifier.clone())
            .service(health_check)
            .service(customers::scope())
            .service(service_types::scope())
            .service(dashboard::scope())
            .service(checker::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
