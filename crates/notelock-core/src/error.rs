//! Error types for Notelock core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages.
//!
//! Every failure that can follow a password attempt (`WrongPassword`,
//! `DecryptionFailed`, `Authentication`, `Format`) renders the same
//! "Incorrect password" text so a caller that prints errors cannot tell
//! the hash check apart from the AEAD check.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for Notelock operations.
pub type Result<T> = std::result::Result<T, NotelockError>;

/// Core error type for Notelock operations.
#[derive(Debug, Error)]
pub enum NotelockError {
    /// Envelope too short, not base64, or otherwise malformed
    #[error("Incorrect password")]
    Format(String),

    /// AEAD tag verification failed (wrong password or corrupted ciphertext)
    #[error("Incorrect password")]
    Authentication,

    /// Fast-path password hash mismatch
    #[error("Incorrect password")]
    WrongPassword,

    /// Hash matched but the envelope did not decrypt
    #[error("Incorrect password")]
    DecryptionFailed,

    /// Protection requested for a note that is already protected
    #[error("Note is already password protected")]
    AlreadyProtected,

    /// Operation requires a password-protected note
    #[error("Note is not password protected")]
    NotProtected,

    /// Protected note is locked and no verified password was supplied
    #[error("Note is locked")]
    StillLocked,

    /// Note not found by ID
    #[error("Note not found: {0}")]
    NoteNotFound(Uuid),

    /// Cipher setup or background worker failure
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl NotelockError {
    /// Whether this error is one of the password-attempt failures that
    /// must be reported to the user as a single generic message.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            NotelockError::Format(_)
                | NotelockError::Authentication
                | NotelockError::WrongPassword
                | NotelockError::DecryptionFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures_share_message() {
        let errors = [
            NotelockError::Format("too short".to_string()),
            NotelockError::Authentication,
            NotelockError::WrongPassword,
            NotelockError::DecryptionFailed,
        ];
        for err in &errors {
            assert!(err.is_auth_failure());
            assert_eq!(err.to_string(), "Incorrect password");
        }
    }

    #[test]
    fn test_state_errors_are_not_auth_failures() {
        assert!(!NotelockError::StillLocked.is_auth_failure());
        assert!(!NotelockError::AlreadyProtected.is_auth_failure());
        assert!(!NotelockError::NoteNotFound(Uuid::nil()).is_auth_failure());
    }
}
