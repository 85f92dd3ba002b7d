// src/application/reminder_scanner.rs
use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::constants::REMINDER_WINDOW_SECS;
use crate::domain::{Memo, Reminder};

/// Decides which memos require a new reminder notification, exactly once
/// per due alarm occurrence.
///
/// De-duplication is keyed by the alarm timestamp last fired for each memo,
/// not by membership in the open-notification list. Dismissing a
/// notification therefore never resurrects the same occurrence, while
/// moving the alarm to a new time counts as a fresh occurrence and fires
/// again.
///
/// Pure comparison over in-memory values: no I/O, no error states.
pub struct ReminderScanner {
    window: Duration,
    fired: HashMap<String, DateTime<Utc>>,
}

impl ReminderScanner {
    pub fn new() -> Self {
        Self::with_window(Duration::seconds(REMINDER_WINDOW_SECS))
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            fired: HashMap::new(),
        }
    }

    /// Scan the full memo collection against `now` and return the reminders
    /// that should fire on this tick.
    ///
    /// A memo fires iff its alarm is enabled, has a time strictly in the
    /// future no further than the window away, and this scanner has not
    /// already fired for that exact alarm time.
    pub fn scan(&mut self, memos: &[Memo], now: DateTime<Utc>) -> Vec<Reminder> {
        // Drop bookkeeping for memos that no longer exist so a deleted and
        // re-created memo starts clean.
        self.fired.retain(|id, _| memos.iter().any(|m| m.id == *id));

        let mut due = Vec::new();
        for memo in memos {
            if !memo.alarm.enabled {
                continue;
            }
            let Some(alarm_time) = memo.alarm.time else {
                continue;
            };
            let delta = alarm_time - now;
            if delta <= Duration::zero() || delta > self.window {
                continue;
            }
            if self.fired.get(&memo.id) == Some(&alarm_time) {
                continue;
            }
            debug!(memo_id = %memo.id, %alarm_time, "Alarm due, raising reminder");
            self.fired.insert(memo.id.clone(), alarm_time);
            due.push(Reminder::for_memo(&memo.id, &memo.title, alarm_time, now));
        }
        due
    }
}

impl Default for ReminderScanner {
    fn default() -> Self {
        Self::new()
    }
}
