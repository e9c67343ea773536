//! Application context for the Notelock CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config file.

use std::io::IsTerminal;

use once_cell::unsync::OnceCell;

use crate::cli::Cli;
use crate::config::{read_config, NotelockConfig};
use crate::ui::UiContext;

use super::resolver::{resolve_config_path, resolve_store_path};
use super::session::Session;

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<NotelockConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, if one exists. Loaded once.
    pub fn config(&self) -> anyhow::Result<Option<&NotelockConfig>> {
        let config = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if !path.exists() {
                return Ok::<_, anyhow::Error>(None);
            }
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    /// Configured log level; an unreadable config is reported later by
    /// the command that needs it.
    pub fn log_level(&self) -> Option<&str> {
        self.config()
            .ok()
            .flatten()
            .map(|config| config.log.level.as_str())
    }

    /// Configured editor override, if any.
    pub fn editor(&self) -> anyhow::Result<Option<&str>> {
        Ok(self.config()?.and_then(|config| config.ui.editor.as_deref()))
    }

    /// Whether prompts may be shown.
    pub fn interactive(&self, no_input: bool) -> bool {
        !no_input && std::io::stdin().is_terminal()
    }

    pub fn ui(&self) -> UiContext {
        UiContext::from_env(self.quiet())
    }

    /// Open the store and start a session with every note locked.
    pub fn open_session(&self, no_input: bool) -> anyhow::Result<Session> {
        let path = resolve_store_path(self.cli, self.config()?)?;
        Session::open(&path, self.interactive(no_input))
    }
}
