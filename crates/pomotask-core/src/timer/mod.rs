mod config;
mod display;
mod driver;
mod engine;

pub use config::TimerConfig;
pub use display::{calculate_progress, format_time};
pub use driver::TimerDriver;
pub use engine::{TimerEngine, TimerState, TimerStatus};
