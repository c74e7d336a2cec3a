mod config;
mod task_store;

pub use config::Config;
pub use task_store::TaskStore;

use std::path::PathBuf;

use crate::error::{CoreError, Result};

/// Returns `~/.config/pomotask[-dev]/` based on POMOTASK_ENV.
///
/// Set POMOTASK_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMOTASK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomotask-dev")
    } else {
        base_dir.join("pomotask")
    };

    std::fs::create_dir_all(&dir).map_err(CoreError::Io)?;
    Ok(dir)
}
