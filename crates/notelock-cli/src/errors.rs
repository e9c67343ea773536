//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use notelock_core::NotelockError;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, store, note)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong password, too many attempts)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and no hint.
    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

impl From<NotelockError> for CliError {
    fn from(err: NotelockError) -> Self {
        if err.is_auth_failure() {
            return CliError::auth_failed(err.to_string());
        }
        match err {
            NotelockError::NoteNotFound(id) => CliError::not_found(
                format!("Note not found: {}", id),
                "Hint: Run `notelock list` to find note IDs.",
            ),
            NotelockError::StillLocked => CliError::auth_failed_with_hint(
                "Note is locked",
                "Hint: Set NOTELOCK_PASSWORD or run without --no-input.",
            ),
            other => CliError::invalid_input(other.to_string()),
        }
    }
}

/// Exit code for an error surfaced from `run`.
///
/// Typed CLI errors carry their own code. Core errors for a missing note,
/// a failed password, or rejected input map onto the same codes.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    use super::constants::exit_codes;

    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    match err.downcast_ref::<NotelockError>() {
        Some(core) if core.is_auth_failure() => exit_codes::AUTH_FAILED,
        Some(NotelockError::StillLocked) => exit_codes::AUTH_FAILED,
        Some(NotelockError::NoteNotFound(_)) => exit_codes::NOT_FOUND,
        Some(
            NotelockError::AlreadyProtected
            | NotelockError::NotProtected
            | NotelockError::InvalidInput(_)
            | NotelockError::Validation(_),
        ) => exit_codes::INVALID_INPUT,
        _ => 1,
    }
}
