use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use pomotask_core::storage::{data_dir, Config};
use pomotask_core::timer::{calculate_progress, format_time};
use pomotask_core::{Event, TimerDriver, TimerEngine, TimerStatus};

const ENGINE_FILE: &str = "timer.json";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start (or resume) the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Reset to a fresh work segment
    Reset,
    /// Move to the next work/break segment
    Advance,
    /// Print the current timer state as JSON
    Status,
    /// Run the timer live in the foreground
    Watch,
}

fn load_engine(config: &Config) -> Result<TimerEngine, Box<dyn std::error::Error>> {
    let timer_config = config.timer_config()?;
    let path = data_dir()?.join(ENGINE_FILE);
    if let Ok(json) = std::fs::read_to_string(&path) {
        if let Ok(engine) = serde_json::from_str::<TimerEngine>(&json) {
            // Stored state only carries over while the configuration matches.
            if engine.config() == &timer_config {
                return Ok(engine);
            }
        }
    }
    Ok(TimerEngine::new(timer_config))
}

fn save_engine(engine: &TimerEngine) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(engine)?;
    std::fs::write(data_dir()?.join(ENGINE_FILE), json)?;
    Ok(())
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut engine = load_engine(&config)?;

    match action {
        TimerAction::Start => {
            if let Some(event) = engine.start() {
                print_event(&event)?;
            } else {
                print_event(&engine.snapshot())?;
            }
        }
        TimerAction::Pause => {
            if let Some(event) = engine.pause() {
                print_event(&event)?;
            }
        }
        TimerAction::Reset => {
            if let Some(event) = engine.reset() {
                print_event(&event)?;
            }
        }
        TimerAction::Advance => {
            if let Some(event) = engine.advance_session() {
                print_event(&event)?;
            }
        }
        TimerAction::Status => {
            print_event(&engine.snapshot())?;
        }
        TimerAction::Watch => {
            let runtime = tokio::runtime::Runtime::new()?;
            engine = runtime.block_on(watch(engine, config.auto_advance))?;
        }
    }

    save_engine(&engine)?;
    Ok(())
}

/// Drive the countdown in the foreground, redrawing once per poll.
///
/// Completing a segment either stops (default) or, with `auto_advance`,
/// rolls straight into the next segment.
async fn watch(
    engine: TimerEngine,
    auto_advance: bool,
) -> Result<TimerEngine, Box<dyn std::error::Error>> {
    let mut driver = TimerDriver::new(engine);
    driver.start();

    loop {
        tokio::time::sleep(Duration::from_millis(200)).await;
        let state = driver.state();

        let label = if state.is_break { "break" } else { "work" };
        print!(
            "\r{} [{label}] {:>3}%  ",
            format_time(state.remaining_seconds),
            calculate_progress(state.remaining_seconds, state.total_seconds),
        );
        std::io::stdout().flush()?;

        if state.status == TimerStatus::Completed {
            println!();
            print_event(&driver.snapshot())?;
            if !auto_advance {
                // Leave the engine in Completed; `timer advance` moves on.
                break;
            }
            if let Some(event) = driver.advance_session() {
                print_event(&event)?;
            }
            driver.start();
        }
    }

    Ok(driver.engine())
}
