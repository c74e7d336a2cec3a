//! Timer engine implementation.
//!
//! The engine is a tick-driven state machine. It does not own a thread or a
//! clock -- the caller (normally [`TimerDriver`](crate::timer::TimerDriver))
//! invokes `tick()` once per elapsed second while the timer is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused | Completed) -> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(TimerConfig::default());
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event::TimerCompleted) when the segment ends
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::config::TimerConfig;
use super::display::{calculate_progress, format_time};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Snapshot of the countdown at one instant.
///
/// Replaced wholesale on every transition; nothing outside the engine
/// mutates it field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub status: TimerStatus,
    /// Seconds left in the current segment. Counts down while running.
    pub remaining_seconds: u64,
    /// Length of the current segment when it started. Fixed until the
    /// segment changes.
    pub total_seconds: u64,
    /// Completed work segments. Breaks never increment it.
    pub session_count: u32,
    /// True during a break segment, short or long.
    pub is_break: bool,
}

impl TimerState {
    /// Fresh state at the start of a work segment.
    fn initial(config: &TimerConfig) -> Self {
        let total_seconds = config.work_seconds();
        Self {
            status: TimerStatus::Idle,
            remaining_seconds: total_seconds,
            total_seconds,
            session_count: 0,
            is_break: false,
        }
    }
}

/// Core timer state machine.
///
/// All commands are total: they never fail, and calling them in an
/// unexpected status is a no-op or a plain status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    config: TimerConfig,
    state: TimerState,
}

impl TimerEngine {
    pub fn new(config: TimerConfig) -> Self {
        let state = TimerState::initial(&config);
        Self { config, state }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn status(&self) -> TimerStatus {
        self.state.status
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.state.remaining_seconds
    }

    pub fn is_break(&self) -> bool {
        self.state.is_break
    }

    pub fn session_count(&self) -> u32 {
        self.state.session_count
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            progress_pct: calculate_progress(self.state.remaining_seconds, self.state.total_seconds),
            display: format_time(self.state.remaining_seconds),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (or resume) the countdown.
    ///
    /// Idempotent: calling `start` while already running changes nothing and
    /// must not arm a second tick source.
    pub fn start(&mut self) -> Option<Event> {
        match self.state.status {
            TimerStatus::Running => None, // Already running.
            _ => {
                self.state.status = TimerStatus::Running;
                Some(Event::TimerStarted {
                    is_break: self.state.is_break,
                    remaining_seconds: self.state.remaining_seconds,
                    at: Utc::now(),
                })
            }
        }
    }

    /// Stop the countdown, keeping `remaining_seconds` where it is.
    ///
    /// Safe in any status; a later `start` resumes from the paused value.
    pub fn pause(&mut self) -> Option<Event> {
        self.state.status = TimerStatus::Paused;
        Some(Event::TimerPaused {
            remaining_seconds: self.state.remaining_seconds,
            at: Utc::now(),
        })
    }

    /// Back to a fresh work segment with `session_count = 0`.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::initial(&self.config);
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Call once per elapsed second while running.
    ///
    /// Returns `Some(Event::TimerCompleted)` when the segment finishes; the
    /// caller must stop its tick source at that point.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state.status != TimerStatus::Running {
            return None;
        }
        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds == 0 {
            self.state.status = TimerStatus::Completed;
            return Some(Event::TimerCompleted {
                is_break: self.state.is_break,
                session_count: self.state.session_count,
                at: Utc::now(),
            });
        }
        None
    }

    /// Move to the next work/break segment.
    ///
    /// The next duration is chosen from the segment that just ended: after a
    /// work segment comes a break (long one every
    /// `sessions_until_long_break` completed work segments), after a break
    /// comes work. `session_count` increments only when the ending segment
    /// was work. Ends in `Idle`; callers are expected to invoke this after
    /// `Completed`, but the engine does not enforce it.
    pub fn advance_session(&mut self) -> Option<Event> {
        let ended_work = !self.state.is_break;
        let long_break = ended_work
            && (self.state.session_count + 1) % self.config.sessions_until_long_break == 0;

        let total_seconds = if ended_work {
            if long_break {
                self.config.long_break_seconds()
            } else {
                self.config.break_seconds()
            }
        } else {
            self.config.work_seconds()
        };

        let session_count = if ended_work {
            self.state.session_count + 1
        } else {
            self.state.session_count
        };

        self.state = TimerState {
            status: TimerStatus::Idle,
            remaining_seconds: total_seconds,
            total_seconds,
            session_count,
            is_break: ended_work,
        };

        Some(Event::SessionAdvanced {
            is_break: self.state.is_break,
            long_break,
            session_count,
            total_seconds,
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_uses_work_duration() {
        let engine = TimerEngine::new(TimerConfig::default());
        let state = engine.state();
        assert_eq!(state.status, TimerStatus::Idle);
        assert_eq!(state.remaining_seconds, 1500);
        assert_eq!(state.total_seconds, 1500);
        assert_eq!(state.session_count, 0);
        assert!(!state.is_break);
    }

    #[test]
    fn start_is_idempotent() {
        let mut engine = TimerEngine::new(TimerConfig::default());
        assert!(engine.start().is_some());
        assert_eq!(engine.status(), TimerStatus::Running);

        let before = engine.state();
        assert!(engine.start().is_none());
        assert_eq!(engine.state(), before);
    }

    #[test]
    fn tick_counts_down_only_while_running() {
        let mut engine = TimerEngine::new(TimerConfig::default());
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining_seconds(), 1500);

        engine.start();
        engine.tick();
        assert_eq!(engine.remaining_seconds(), 1499);
    }

    #[test]
    fn tick_to_completion() {
        let mut engine = TimerEngine::new(TimerConfig::default());
        engine.start();
        engine.state.remaining_seconds = 1;

        let event = engine.tick();
        assert!(matches!(event, Some(Event::TimerCompleted { .. })));
        assert_eq!(engine.remaining_seconds(), 0);
        assert_eq!(engine.status(), TimerStatus::Completed);

        // Completed timers no longer tick.
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining_seconds(), 0);
    }

    #[test]
    fn pause_then_start_resumes_from_paused_value() {
        let mut engine = TimerEngine::new(TimerConfig::default());
        engine.start();
        engine.tick();
        engine.tick();
        engine.pause();
        assert_eq!(engine.status(), TimerStatus::Paused);
        assert_eq!(engine.remaining_seconds(), 1498);

        engine.start();
        assert_eq!(engine.status(), TimerStatus::Running);
        engine.tick();
        assert_eq!(engine.remaining_seconds(), 1497);
    }

    #[test]
    fn advance_after_work_goes_to_short_break() {
        let mut engine = TimerEngine::new(TimerConfig::default());
        let event = engine.advance_session();
        let state = engine.state();
        assert!(state.is_break);
        assert_eq!(state.session_count, 1);
        assert_eq!(state.total_seconds, 300);
        assert_eq!(state.remaining_seconds, 300);
        assert_eq!(state.status, TimerStatus::Idle);
        assert!(matches!(
            event,
            Some(Event::SessionAdvanced {
                long_break: false,
                ..
            })
        ));
    }

    #[test]
    fn advance_after_break_returns_to_work_without_counting() {
        let mut engine = TimerEngine::new(TimerConfig::default());
        engine.advance_session(); // work -> break, session_count = 1
        engine.advance_session(); // break -> work
        let state = engine.state();
        assert!(!state.is_break);
        assert_eq!(state.session_count, 1);
        assert_eq!(state.total_seconds, 1500);
    }

    #[test]
    fn fourth_work_session_earns_long_break() {
        let mut engine = TimerEngine::new(TimerConfig::default());
        // Three full work+break rounds: short breaks only.
        for _ in 0..3 {
            let event = engine.advance_session();
            assert!(matches!(
                event,
                Some(Event::SessionAdvanced {
                    long_break: false,
                    total_seconds: 300,
                    ..
                })
            ));
            engine.advance_session(); // back to work
        }
        assert_eq!(engine.session_count(), 3);
        assert!(!engine.is_break());

        // Fourth completed work segment: long break.
        let event = engine.advance_session();
        let state = engine.state();
        assert!(state.is_break);
        assert_eq!(state.session_count, 4);
        assert_eq!(state.total_seconds, 900);
        assert!(matches!(
            event,
            Some(Event::SessionAdvanced {
                long_break: true,
                ..
            })
        ));
    }

    #[test]
    fn reset_restores_initial_state_from_any_point() {
        let mut engine = TimerEngine::new(TimerConfig::default());
        engine.advance_session();
        engine.start();
        engine.tick();
        engine.reset();
        assert_eq!(engine.state(), TimerState::initial(&TimerConfig::default()));
    }

    #[test]
    fn snapshot_reports_progress_and_display() {
        let mut engine = TimerEngine::new(TimerConfig::default());
        engine.start();
        for _ in 0..750 {
            engine.tick();
        }
        match engine.snapshot() {
            Event::StateSnapshot {
                progress_pct,
                display,
                ..
            } => {
                assert_eq!(progress_pct, 50);
                assert_eq!(display, "12:30");
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }
}
