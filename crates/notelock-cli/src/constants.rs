//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config, store, note).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong password, too many attempts).
    pub const AUTH_FAILED: i32 = 5;
}

/// Environment variable supplying note passwords non-interactively.
pub const PASSWORD_ENV: &str = "NOTELOCK_PASSWORD";

/// Password attempts allowed at an interactive prompt.
pub const MAX_PASSWORD_ATTEMPTS: u32 = 3;

/// Shortest accepted note id prefix.
pub const MIN_ID_PREFIX_LEN: usize = 4;
