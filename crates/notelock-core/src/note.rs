//! The note record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crypto::{CipherEnvelope, TAG_LEN};
use crate::error::{NotelockError, Result};

/// A single note.
///
/// When `is_password_protected` is true, `content` holds a base64 cipher
/// envelope and `password_hash` holds the verification digest. Plaintext of
/// a protected note only ever lives in the session's `UnlockedSet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier for this note
    pub id: Uuid,

    /// User-facing title (never encrypted)
    pub title: String,

    /// Plaintext, or a cipher envelope when protected
    pub content: String,

    /// Whether `content` is a cipher envelope
    pub is_password_protected: bool,

    /// Verification digest; present iff protected
    pub password_hash: Option<String>,

    /// Tags associated with this note
    pub tags: Vec<String>,

    /// Pinned notes sort first
    pub pinned: bool,

    /// When this note was created
    pub created_at: DateTime<Utc>,

    /// Last content or protection change
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a new unprotected note.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            is_password_protected: false,
            password_hash: None,
            tags: Vec::new(),
            pinned: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style tag setter.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Check the at-rest protection invariant.
    ///
    /// This is a shape check: protected content must decode to at least a
    /// salt, nonce and tag. Long base64-looking plaintext can still pass;
    /// only a successful decrypt proves the content is a real envelope.
    ///
    /// # Errors
    ///
    /// Returns `NotelockError::Validation` if:
    /// - A protected note has no password hash
    /// - A protected note's content is too short to be a cipher envelope
    /// - An unprotected note carries a password hash
    pub fn validate_protection(&self) -> Result<()> {
        if self.is_password_protected {
            if self.password_hash.is_none() {
                return Err(NotelockError::Validation(format!(
                    "Protected note {} has no password hash",
                    self.id
                )));
            }
            let shaped = CipherEnvelope::decode(&self.content)
                .map(|envelope| envelope.ciphertext.len() >= TAG_LEN)
                .unwrap_or(false);
            if !shaped {
                return Err(NotelockError::Validation(format!(
                    "Protected note {} does not hold an encrypted envelope",
                    self.id
                )));
            }
        } else if self.password_hash.is_some() {
            return Err(NotelockError::Validation(format!(
                "Unprotected note {} carries a password hash",
                self.id
            )));
        }
        Ok(())
    }
}
