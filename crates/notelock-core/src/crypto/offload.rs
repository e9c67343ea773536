//! Run key derivation off the caller's scheduling context.
//!
//! PBKDF2 is deliberately slow. These wrappers move the work onto tokio's
//! blocking pool so an event loop stays responsive. A blocking task is not
//! cancelled when its future is dropped; the result is discarded instead,
//! so no partially derived key or half-finished envelope is ever observed.

use tokio::task;

use crate::error::{NotelockError, Result};

async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|e| NotelockError::Crypto(format!("Crypto worker failed: {}", e)))?
}

/// [`super::encrypt`] on the blocking pool.
pub async fn encrypt(plaintext: String, password: String) -> Result<String> {
    run_blocking(move || super::encrypt(&plaintext, &password)).await
}

/// [`super::decrypt`] on the blocking pool.
pub async fn decrypt(envelope: String, password: String) -> Result<String> {
    run_blocking(move || super::decrypt(&envelope, &password)).await
}

/// [`super::hash_password`] on the blocking pool.
pub async fn hash_password(password: String) -> Result<String> {
    run_blocking(move || Ok(super::hash_password(&password))).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offloaded_round_trip() {
        let envelope = encrypt("Hello world".to_string(), "Tr0ub4dor&3".to_string())
            .await
            .unwrap();
        let plaintext = decrypt(envelope, "Tr0ub4dor&3".to_string()).await.unwrap();
        assert_eq!(plaintext, "Hello world");
    }

    #[tokio::test]
    async fn test_offloaded_wrong_password() {
        let envelope = encrypt("secret".to_string(), "right".to_string())
            .await
            .unwrap();
        let result = decrypt(envelope, "wrong".to_string()).await;
        assert!(matches!(result, Err(NotelockError::Authentication)));
    }

    #[tokio::test]
    async fn test_offloaded_hash_matches_sync() {
        let hashed = hash_password("abc123".to_string()).await.unwrap();
        assert_eq!(hashed, crate::crypto::hash_password("abc123"));
    }
}
