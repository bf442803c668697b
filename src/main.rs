use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;

use sqlx::PgPool;

use service_scheduler::app;
use service_scheduler::client::SmsClient;
use service_scheduler::repo::Repos;
use service_scheduler::scheduler::{self, Notifier};
use service_scheduler::settings::Settings;
use service_scheduler::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().expect("Failed to load settings");

    let subscriber = telemetry::create_subscriber("info".into(), std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let pool = PgPool::connect_with(settings.database.with_db()).await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let sms_client = SmsClient::new(
        settings.sms.account_id().into(),
        settings.sms.auth_secret(),
        settings.sms.sender_number().into(),
        settings.sms.api_timeout(),
        settings.sms.api_base_url(),
    )?;

    let repos = Repos::postgres(pool);
    let notifier = Arc::new(Notifier::new(
        repos.clone(),
        sms_client,
        settings.app.brand().into(),
    ));

    scheduler::start_reminder_job(notifier.clone(), settings.scheduler.poll_interval());

    let listener = TcpListener::bind(settings.app.addr())?;

    app::run(listener, repos, notifier)?
        .await
        .context("Failed to run app")
}
