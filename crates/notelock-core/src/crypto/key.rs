//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! This module stretches a note password into an AES-256-GCM key. The
//! iteration count is not recorded in the envelope, so it is fixed here.

use aes_gcm::aead::KeyInit;
use aes_gcm::{Aes256Gcm, Key};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use super::envelope::SALT_LEN;
use crate::error::{NotelockError, Result};

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256-GCM).
pub const KEY_LEN: usize = 32;

/// A cryptographic key derived from a password.
///
/// The key bytes never leave the crate; the only public use is building
/// the AEAD cipher. Key material is zeroized from memory when dropped.
#[derive(ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { key: bytes }
    }

    /// Build the AES-256-GCM cipher bound to this key.
    pub fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key))
    }

    #[cfg(test)]
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a password and a per-envelope salt.
///
/// Same password + salt always produces the same key. Callers must
/// generate a fresh salt for every encryption.
///
/// # Examples
///
/// ```
/// use notelock_core::crypto::derive_key;
///
/// let salt = [7u8; 16];
/// let key = derive_key("my-password", &salt).unwrap();
/// let _cipher = key.cipher();
/// ```
pub fn derive_key(password: &str, salt: &[u8; SALT_LEN]) -> Result<DerivedKey> {
    if password.is_empty() {
        return Err(NotelockError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }

    let mut key_bytes = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key_bytes);

    Ok(DerivedKey::from_bytes(key_bytes))
}
