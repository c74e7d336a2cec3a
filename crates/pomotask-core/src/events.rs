use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every timer state change produces an Event.
/// The CLI prints them as JSON; a GUI layer would poll for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        is_break: bool,
        remaining_seconds: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_seconds: u64,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero and the tick source stopped.
    TimerCompleted {
        is_break: bool,
        session_count: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// Moved to the next work/break segment.
    SessionAdvanced {
        is_break: bool,
        long_break: bool,
        session_count: u32,
        total_seconds: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        progress_pct: u8,
        display: String,
        at: DateTime<Utc>,
    },
}
