use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use chrono::{Local, NaiveDate, Utc};

use crate::client::SmsClient;
use crate::error::Result;
use crate::model::{Customer, NotificationStatus};
use crate::repo::Repos;

/// Days before the next service date at which the reminder becomes due
pub const NOTIFICATION_LEAD_DAYS: i64 = 5;

/// Tally of a single evaluation cycle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Customers whose notification date is today and are still unsent
    pub due: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Formats and dispatches customer notifications.
///
/// Shared between the background poll loop and the REST layer (which uses
/// the completion-notice path directly).
pub struct Notifier {
    repos: Repos,
    sms_client: SmsClient,
    brand: String,
}

impl Notifier {
    pub fn new(repos: Repos, sms_client: SmsClient, brand: String) -> Self {
        Self {
            repos,
            sms_client,
            brand,
        }
    }

    /// Evaluate every customer against the notification window for `today`
    /// and dispatch at most one reminder per customer per due cycle.
    ///
    /// The selection is an equality check on the exact trigger day: a window
    /// that opened while the process was not running is not retroactively
    /// served. A failed dispatch stays unsent and is picked up again by the
    /// next cycle re-evaluating the same condition. A sent flag stamped
    /// before the current trigger day is stale (the customer's dates were
    /// updated since) and does not suppress the new cycle's reminder.
    #[tracing::instrument(name = "Run reminder cycle", skip(self))]
    pub async fn run_cycle(&self, today: NaiveDate) -> anyhow::Result<CycleOutcome> {
        let customers = self.repos.customers.list().await?;

        let mut outcome = CycleOutcome::default();
        for customer in customers {
            let notification_date =
                customer.next_service_date - chrono::Duration::days(NOTIFICATION_LEAD_DAYS);
            if today != notification_date {
                continue;
            }

            let status = self.repos.notification_status.get(&customer.id).await?;
            if status.covers(notification_date) {
                continue;
            }

            outcome.due += 1;
            let message = reminder_message(&customer);
            match self.sms_client.send(&customer.phone_number, &message).await {
                Ok(()) => {
                    let status = NotificationStatus {
                        last_sent: Some(Utc::now()),
                        is_sent: true,
                    };
                    self.repos
                        .notification_status
                        .set(&customer.id, status)
                        .await?;
                    outcome.sent += 1;
                    tracing::info!("Reminder sent to customer {}", customer.id);
                }
                Err(error) => {
                    outcome.failed += 1;
                    tracing::error!(
                        error.cause_chain = ?error,
                        "Failed to send reminder to customer {}", customer.id);
                }
            }
        }

        Ok(outcome)
    }

    /// Tell a customer their service is done and when the next one is due.
    ///
    /// Fires unconditionally and does not consult or mutate the per-cycle
    /// notification state. Returns `None` when the customer does not exist.
    #[tracing::instrument(name = "Send completion notice", skip(self))]
    pub async fn send_completion_notice(&self, customer_id: &Uuid) -> Result<Option<Customer>> {
        let customer = match self.repos.customers.find(customer_id).await? {
            Some(customer) => customer,
            None => return Ok(None),
        };

        let message = completion_message(&self.brand, &customer);
        self.sms_client
            .send(&customer.phone_number, &message)
            .await?;

        Ok(Some(customer))
    }
}

/// Spawn the free-running reminder poll loop.
///
/// The first tick fires immediately, then once per `poll_interval`. The
/// interval only affects how quickly a trigger day is detected; a cycle that
/// errors out is simply retried on the next tick.
pub fn start_reminder_job(notifier: Arc<Notifier>, poll_interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(poll_interval);
        loop {
            ticker.tick().await;

            let today = Local::now().date_naive();
            match notifier.run_cycle(today).await {
                Ok(outcome) if outcome.due > 0 => {
                    tracing::info!(
                        "Reminder cycle done: {} due, {} sent, {} failed",
                        outcome.due,
                        outcome.sent,
                        outcome.failed
                    );
                }
                Ok(_) => {}
                Err(error) => {
                    tracing::error!(error.cause_chain = ?error, "Reminder cycle aborted");
                }
            }
        }
    });
}

pub fn reminder_message(customer: &Customer) -> String {
    format!(
        "Hey, Your {} service is scheduled on {}",
        customer.service_type,
        long_date(customer.next_service_date)
    )
}

pub fn completion_message(brand: &str, customer: &Customer) -> String {
    format!(
        "Hey, Thank you for choosing {}! Service for {} is done and the next Service date is {}. Have a great day!",
        brand,
        customer.service_type,
        long_date(customer.next_service_date)
    )
}

fn long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}
