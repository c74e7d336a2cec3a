//! Tick ownership for the timer engine.
//!
//! [`TimerEngine`] is a pure state machine; something has to call `tick()`
//! once per second while it runs. `TimerDriver` owns that tick source as a
//! single cancellable tokio task, checked-and-replaced inside
//! `start()`/`pause()`/`reset()` so at most one ticker is ever live.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

use super::engine::{TimerEngine, TimerState, TimerStatus};
use crate::events::Event;

/// Drives a [`TimerEngine`] with a 1-second tokio interval.
///
/// The spawned task is the sole writer of the countdown decrement. It stops
/// itself when the segment completes or when the engine leaves `Running`.
pub struct TimerDriver {
    engine: Arc<Mutex<TimerEngine>>,
    ticker: Option<JoinHandle<()>>,
}

impl TimerDriver {
    pub fn new(engine: TimerEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            ticker: None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, TimerEngine> {
        // The ticker task never panics while holding the lock.
        self.engine.lock().expect("timer engine lock poisoned")
    }

    /// Whether a ticker task is currently live.
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn state(&self) -> TimerState {
        self.lock().state()
    }

    /// Clone of the wrapped engine, e.g. for persisting between runs.
    pub fn engine(&self) -> TimerEngine {
        self.lock().clone()
    }

    pub fn snapshot(&self) -> Event {
        self.lock().snapshot()
    }

    /// Start the countdown and arm the ticker.
    ///
    /// No-op while a ticker is already live, so calling `start` twice never
    /// double-decrements.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_ticking() {
            return None;
        }
        let event = self.lock().start();

        let engine = Arc::clone(&self.engine);
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first interval tick resolves immediately; the countdown
            // starts one full second after `start`.
            interval.tick().await;
            loop {
                interval.tick().await;
                let mut engine = engine.lock().expect("timer engine lock poisoned");
                let completed = engine.tick();
                if completed.is_some() || engine.status() != TimerStatus::Running {
                    break;
                }
            }
        }));
        event
    }

    /// Stop the ticker and freeze the remaining time.
    pub fn pause(&mut self) -> Option<Event> {
        self.stop_ticker();
        self.lock().pause()
    }

    /// Stop the ticker and restore the initial work segment.
    pub fn reset(&mut self) -> Option<Event> {
        self.stop_ticker();
        self.lock().reset()
    }

    /// Move to the next work/break segment (ticker must not be live; the
    /// completed segment already stopped it).
    pub fn advance_session(&mut self) -> Option<Event> {
        self.stop_ticker();
        self.lock().advance_session()
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerConfig;

    /// Let the spawned ticker task catch up with virtual time.
    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    async fn advance_secs(secs: u64) {
        for _ in 0..secs {
            tokio::time::advance(Duration::from_secs(1)).await;
            settle().await;
        }
    }

    fn driver() -> TimerDriver {
        TimerDriver::new(TimerEngine::new(TimerConfig::default()))
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second() {
        let mut driver = driver();
        driver.start();
        settle().await;

        advance_secs(3).await;
        let state = driver.state();
        assert_eq!(state.status, TimerStatus::Running);
        assert_eq!(state.remaining_seconds, 1497);
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_does_not_double_tick() {
        let mut driver = driver();
        driver.start();
        settle().await;
        assert!(driver.start().is_none());
        settle().await;

        advance_secs(2).await;
        assert_eq!(driver.state().remaining_seconds, 1498);
        assert!(driver.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn pause_stops_the_ticker() {
        let mut driver = driver();
        driver.start();
        settle().await;
        advance_secs(2).await;

        driver.pause();
        assert!(!driver.is_ticking());
        advance_secs(5).await;

        let state = driver.state();
        assert_eq!(state.status, TimerStatus::Paused);
        assert_eq!(state.remaining_seconds, 1498);
    }

    #[tokio::test(start_paused = true)]
    async fn resume_continues_from_paused_value() {
        let mut driver = driver();
        driver.start();
        settle().await;
        advance_secs(2).await;
        driver.pause();

        driver.start();
        settle().await;
        advance_secs(1).await;
        assert_eq!(driver.state().remaining_seconds, 1497);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_while_running_does_not_leak_a_ticker() {
        let mut driver = driver();
        driver.start();
        settle().await;
        advance_secs(2).await;

        driver.reset();
        assert!(!driver.is_ticking());
        advance_secs(5).await;

        let state = driver.state();
        assert_eq!(state.status, TimerStatus::Idle);
        assert_eq!(state.remaining_seconds, 1500);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_stops_itself_at_completion() {
        let config = TimerConfig {
            work_duration: 1,
            ..TimerConfig::default()
        };
        let mut driver = TimerDriver::new(TimerEngine::new(config));
        driver.start();
        settle().await;

        advance_secs(60).await;
        let state = driver.state();
        assert_eq!(state.status, TimerStatus::Completed);
        assert_eq!(state.remaining_seconds, 0);
        assert!(!driver.is_ticking());

        // No further ticks after completion.
        advance_secs(5).await;
        assert_eq!(driver.state().remaining_seconds, 0);
    }
}
