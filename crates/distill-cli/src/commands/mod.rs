//! CLI command implementations.

pub mod check;
pub mod config;
pub mod init;
pub mod run;
pub mod upload;
pub mod validate;

use anyhow::{Context, Result};
use distill_config::{AppPaths, Config};

/// Get the application paths.
pub fn get_paths() -> Result<AppPaths> {
    AppPaths::new().context("Failed to determine application directories")
}

/// Load the configuration from the default location.
pub fn load_config() -> Result<Config> {
    Config::load().context("Failed to load configuration")
}
