// src/domain/reminder.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transient reminder notification raised when a memo's alarm becomes due.
///
/// Never persisted: lives in the watch session's open list until dismissed
/// or the process exits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub memo_id: String,
    pub title: String,
    pub message: String,
    pub fire_time: DateTime<Utc>,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl Reminder {
    /// Build a reminder for a due memo. The id is unique per firing,
    /// derived from the memo id and the scan instant that observed it.
    pub fn for_memo(
        memo_id: &str,
        title: &str,
        fire_time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("notif-{}-{}", memo_id, now.timestamp_millis()),
            memo_id: memo_id.to_string(),
            title: title.to_string(),
            message: format!("Reminder: {title}"),
            fire_time,
            created: now,
            read: false,
        }
    }
}
