use chrono::{DateTime, Local, NaiveDate, Utc};

use serde::Serialize;

/// Whether the reminder for a customer's current cycle has been dispatched.
///
/// Created lazily with its default the first time a customer is evaluated
/// and fully overwritten on every successful send. It is never reset: when a
/// customer update recomputes the next service date, the record left behind
/// simply no longer covers the new cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotificationStatus {
    pub last_sent: Option<DateTime<Utc>>,
    pub is_sent: bool,
}

impl NotificationStatus {
    /// Whether this record accounts for the cycle whose trigger day is
    /// `notification_date`.
    ///
    /// Dispatches only ever happen on the trigger day itself, so a send on
    /// or after that day belongs to the current cycle. A sent flag stamped
    /// before it is left over from an earlier cycle; the reminder for the
    /// new window is still owed.
    pub fn covers(&self, notification_date: NaiveDate) -> bool {
        self.is_sent
            && self.last_sent.map_or(false, |sent_at| {
                sent_at.with_timezone(&Local).date_naive() >= notification_date
            })
    }
}
