//! # Pomotask Core Library
//!
//! Core business logic for Pomotask, a task list paired with a Pomodoro
//! countdown timer. The CLI binary is a thin layer over this crate; a GUI
//! would sit on the same surface.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven state machine; [`TimerDriver`] owns the
//!   single cancellable 1-second tick task
//! - **Tasks**: the task model plus pure derived views (filtering, ordering,
//!   stats) recomputed on every read
//! - **Storage**: JSON blob task store and TOML configuration
//! - **API**: async client for the remote task endpoints
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: core timer state machine
//! - [`TimerDriver`]: tick ownership around the engine
//! - [`TaskStore`]: file-backed task CRUD
//! - [`TasksClient`]: HTTP task API client
//! - [`Config`]: application configuration

pub mod api;
pub mod error;
pub mod events;
pub mod storage;
pub mod task;
pub mod timer;

pub use api::TasksClient;
pub use error::{ApiError, ConfigError, CoreError, StoreError, ValidationError};
pub use events::Event;
pub use storage::{Config, TaskStore};
pub use task::{NewTask, Priority, Task, TaskFilter, TaskPatch, TaskStats};
pub use timer::{TimerConfig, TimerDriver, TimerEngine, TimerState, TimerStatus};
