//! Password validation and verification digests.
//!
//! The digest is a fast pre-check before an expensive decrypt. It is never
//! used to derive the encryption key; the AEAD tag stays the real gate.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::{NotelockError, Result};

/// Validate a password before protection is applied.
///
/// # Examples
///
/// ```
/// use notelock_core::crypto::validate_password;
///
/// assert!(validate_password("Tr0ub4dor&3").is_ok());
/// assert!(validate_password("   ").is_err());
/// ```
pub fn validate_password(password: &str) -> Result<()> {
    if password.trim().is_empty() {
        return Err(NotelockError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Base64-encoded SHA-256 digest of the UTF-8 password bytes.
///
/// # Examples
///
/// ```
/// use notelock_core::crypto::hash_password;
///
/// assert_eq!(hash_password("abc123"), hash_password("abc123"));
/// assert_ne!(hash_password("abc123"), hash_password("abc124"));
/// ```
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    STANDARD.encode(digest)
}

/// Check a password against a stored digest in constant time.
pub fn password_matches(password: &str, stored_hash: &str) -> bool {
    let candidate = hash_password(password);
    candidate.as_bytes().ct_eq(stored_hash.trim().as_bytes()).into()
}
