//! Binary packing of ciphertext envelopes.
//!
//! An envelope is `salt || iv || ciphertext_and_tag`, stored base64-encoded
//! in a protected note's `content` field.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{NotelockError, Result};

/// Length of the per-envelope PBKDF2 salt.
pub const SALT_LEN: usize = 16;

/// Length of the AES-GCM nonce.
pub const IV_LEN: usize = 12;

/// Length of the AES-GCM authentication tag.
pub const TAG_LEN: usize = 16;

const HEADER_LEN: usize = SALT_LEN + IV_LEN;

/// Unpacked ciphertext envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherEnvelope {
    pub salt: [u8; SALT_LEN],
    pub iv: [u8; IV_LEN],
    /// Ciphertext with the 16-byte GCM tag appended.
    pub ciphertext: Vec<u8>,
}

impl CipherEnvelope {
    /// Pack into `salt || iv || ciphertext`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut combined = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        combined.extend_from_slice(&self.salt);
        combined.extend_from_slice(&self.iv);
        combined.extend_from_slice(&self.ciphertext);
        combined
    }

    /// Split packed bytes back into salt, iv and ciphertext.
    ///
    /// # Errors
    ///
    /// Returns `NotelockError::Format` if the input cannot hold a salt and iv.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(NotelockError::Format(format!(
                "Envelope too short: {} bytes (need at least {})",
                bytes.len(),
                HEADER_LEN
            )));
        }

        let (salt, rest) = bytes.split_at(SALT_LEN);
        let (iv, ciphertext) = rest.split_at(IV_LEN);

        let mut salt_arr = [0u8; SALT_LEN];
        salt_arr.copy_from_slice(salt);
        let mut iv_arr = [0u8; IV_LEN];
        iv_arr.copy_from_slice(iv);

        Ok(Self {
            salt: salt_arr,
            iv: iv_arr,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Encode as standard padded base64.
    pub fn encode(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Decode a stored envelope string.
    ///
    /// Accepts URL-safe alphabets (`-`/`_`), missing padding and
    /// surrounding whitespace.
    pub fn decode(encoded: &str) -> Result<Self> {
        let normalized = normalize_base64(encoded);
        let bytes = STANDARD
            .decode(normalized.as_bytes())
            .map_err(|e| NotelockError::Format(format!("Invalid base64: {}", e)))?;
        Self::from_bytes(&bytes)
    }
}

/// Map URL-safe base64 onto the standard alphabet and restore padding.
fn normalize_base64(input: &str) -> String {
    let mut normalized: String = input
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    while normalized.len() % 4 != 0 {
        normalized.push('=');
    }
    normalized
}
