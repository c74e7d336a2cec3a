use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Pomodoro durations and long-break cadence, all in whole minutes.
///
/// Supplied once at engine construction and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Work segment length in minutes.
    pub work_duration: u64,
    /// Short break length in minutes.
    pub break_duration: u64,
    /// Long break length in minutes.
    pub long_break_duration: u64,
    /// A long break replaces the short break every N completed work segments.
    pub sessions_until_long_break: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_duration: 25,
            break_duration: 5,
            long_break_duration: 15,
            sessions_until_long_break: 4,
        }
    }
}

impl TimerConfig {
    /// Reject zero durations and a zero cadence.
    ///
    /// Called at the configuration boundary so the engine itself never sees
    /// an out-of-range config.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let check = |field: &str, value: u64| {
            if value == 0 {
                Err(ValidationError::InvalidValue {
                    field: field.to_string(),
                    message: "must be a positive number of minutes".to_string(),
                })
            } else {
                Ok(())
            }
        };
        check("work_duration", self.work_duration)?;
        check("break_duration", self.break_duration)?;
        check("long_break_duration", self.long_break_duration)?;
        if self.sessions_until_long_break == 0 {
            return Err(ValidationError::InvalidValue {
                field: "sessions_until_long_break".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn work_seconds(&self) -> u64 {
        self.work_duration.saturating_mul(60)
    }

    pub fn break_seconds(&self) -> u64 {
        self.break_duration.saturating_mul(60)
    }

    pub fn long_break_seconds(&self) -> u64 {
        self.long_break_duration.saturating_mul(60)
    }
}
