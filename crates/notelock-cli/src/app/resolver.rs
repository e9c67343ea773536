//! Path resolution for config and store files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, NotelockConfig};
use crate::errors::CliError;

/// Resolve the config file path, checking NOTELOCK_CONFIG first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("NOTELOCK_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the store path from `--store`/NOTELOCK_STORE or config.
pub fn resolve_store_path(cli: &Cli, config: Option<&NotelockConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.store.as_deref() {
        return Ok(PathBuf::from(path));
    }
    match config {
        Some(config) => Ok(PathBuf::from(&config.store.path)),
        None => {
            let config_path = resolve_config_path()?;
            Err(CliError::not_found(
                format!("No config found at {}", config_path.display()),
                missing_store_hint(),
            )
            .into())
        }
    }
}

/// Error message when the store file is missing.
pub fn missing_store_message(path: &Path) -> CliError {
    CliError::not_found(
        format!("No note store found at {}", path.display()),
        missing_store_hint(),
    )
}

fn missing_store_hint() -> String {
    "Hint: Run `notelock init`, or point at a store with NOTELOCK_STORE=/path/to/notes.db"
        .to_string()
}
