//! Password-based authenticated encryption of note content.
//!
//! Every call to [`encrypt`] draws a fresh salt and nonce from the OS RNG,
//! so the same plaintext and password never produce the same envelope and
//! a nonce is never reused under a key.

use aes_gcm::aead::Aead;
use aes_gcm::Nonce;
use rand::rngs::OsRng;
use rand::RngCore;

use super::envelope::{CipherEnvelope, IV_LEN, SALT_LEN};
use super::key::derive_key;
use crate::error::{NotelockError, Result};

/// Encrypt note text with a password, returning a base64 envelope.
///
/// # Examples
///
/// ```
/// use notelock_core::crypto::{decrypt, encrypt};
///
/// let envelope = encrypt("Hello world", "Tr0ub4dor&3").unwrap();
/// assert_eq!(decrypt(&envelope, "Tr0ub4dor&3").unwrap(), "Hello world");
/// assert!(decrypt(&envelope, "wrongpass").is_err());
/// ```
pub fn encrypt(plaintext: &str, password: &str) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut iv);

    encrypt_with(plaintext, password, salt, iv)
}

/// Deterministic core of [`encrypt`]; salt and nonce are supplied by the caller.
pub(crate) fn encrypt_with(
    plaintext: &str,
    password: &str,
    salt: [u8; SALT_LEN],
    iv: [u8; IV_LEN],
) -> Result<String> {
    let key = derive_key(password, &salt)?;
    let ciphertext = key
        .cipher()
        .encrypt(Nonce::from_slice(&iv), plaintext.as_bytes())
        .map_err(|e| NotelockError::Crypto(format!("Encryption failed: {}", e)))?;

    Ok(CipherEnvelope {
        salt,
        iv,
        ciphertext,
    }
    .encode())
}

/// Decrypt a base64 envelope with a password.
///
/// # Errors
///
/// - `NotelockError::Format` if the envelope is not base64, is too short to
///   hold a salt and nonce, or decrypts to something other than UTF-8
/// - `NotelockError::Authentication` if the GCM tag does not verify (wrong
///   password or corrupted data), or if `password` is empty
///
/// No partial plaintext is ever returned on failure.
pub fn decrypt(envelope: &str, password: &str) -> Result<String> {
    let envelope = CipherEnvelope::decode(envelope)?;
    // No envelope is ever sealed under an empty password.
    if password.is_empty() {
        return Err(NotelockError::Authentication);
    }
    let key = derive_key(password, &envelope.salt)?;

    let plaintext = key
        .cipher()
        .decrypt(Nonce::from_slice(&envelope.iv), envelope.ciphertext.as_slice())
        .map_err(|_| NotelockError::Authentication)?;

    String::from_utf8(plaintext)
        .map_err(|_| NotelockError::Format("Decrypted content is not UTF-8".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let envelope = encrypt("Hello world", "Tr0ub4dor&3").unwrap();
        assert_eq!(decrypt(&envelope, "Tr0ub4dor&3").unwrap(), "Hello world");
    }

    #[test]
    fn test_wrong_password_is_authentication_error() {
        let envelope = encrypt("Hello world", "Tr0ub4dor&3").unwrap();
        let result = decrypt(&envelope, "wrongpass");
        assert!(matches!(result, Err(NotelockError::Authentication)));
    }

    #[test]
    fn test_empty_and_unicode_plaintext() {
        for plaintext in ["", "naïve café ✓ 日本語", "line one\nline two\n"] {
            let envelope = encrypt(plaintext, "pw").unwrap();
            assert_eq!(decrypt(&envelope, "pw").unwrap(), plaintext);
        }
    }

    #[test]
    fn test_fresh_salt_and_nonce_per_call() {
        let first = CipherEnvelope::decode(&encrypt("same", "same-pw").unwrap()).unwrap();
        let second = CipherEnvelope::decode(&encrypt("same", "same-pw").unwrap()).unwrap();

        assert_ne!(first.salt, second.salt);
        assert_ne!(first.iv, second.iv);
        assert_ne!(first.ciphertext, second.ciphertext);
    }

    #[test]
    fn test_deterministic_given_salt_and_nonce() {
        let salt = [4u8; SALT_LEN];
        let iv = [5u8; IV_LEN];

        let a = encrypt_with("fixed", "pw", salt, iv).unwrap();
        let b = encrypt_with("fixed", "pw", salt, iv).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ciphertext_carries_gcm_tag() {
        let envelope = CipherEnvelope::decode(&encrypt("abcd", "pw").unwrap()).unwrap();
        assert_eq!(envelope.ciphertext.len(), 4 + 16);
    }

    #[test]
    fn test_every_flipped_byte_is_detected() {
        let envelope = CipherEnvelope::decode(&encrypt("tamper me", "pw").unwrap()).unwrap();

        for index in 0..envelope.ciphertext.len() {
            let mut tampered = envelope.clone();
            tampered.ciphertext[index] ^= 0x01;
            let result = decrypt(&tampered.encode(), "pw");
            assert!(
                matches!(result, Err(NotelockError::Authentication)),
                "byte {} flip was not detected",
                index
            );
        }
    }

    #[test]
    fn test_truncated_envelope_is_format_error() {
        let result = decrypt("AAAA", "pw");
        assert!(matches!(result, Err(NotelockError::Format(_))));
    }

    #[test]
    fn test_header_without_tag_fails_authentication() {
        let envelope = CipherEnvelope {
            salt: [1u8; SALT_LEN],
            iv: [2u8; IV_LEN],
            ciphertext: Vec::new(),
        };
        let result = decrypt(&envelope.encode(), "pw");
        assert!(matches!(result, Err(NotelockError::Authentication)));
    }

    #[test]
    fn test_empty_password_is_authentication_error() {
        let envelope = encrypt("secret", "pw").unwrap();
        let result = decrypt(&envelope, "");
        assert!(matches!(result, Err(NotelockError::Authentication)));
        assert_eq!(result.unwrap_err().to_string(), "Incorrect password");
    }
}
