use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in a session produces an Event.
/// `pomolog run --events` prints them as JSON lines; they are also traced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        duration_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerTicked {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerExpired {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// The task log accepted a completed task.
    CompletionRecorded {
        description: String,
        at: DateTime<Utc>,
    },
    /// A fresh copy of the task log was fetched.
    LogRefreshed {
        entries: usize,
        at: DateTime<Utc>,
    },
}
