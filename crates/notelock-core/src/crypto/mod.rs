//! Cryptographic primitives for note protection.
//!
//! This module is stateless: it turns a password and plaintext into a
//! storable, integrity-protected envelope and back, and produces the
//! verification digest stored next to a protected note.
//!
//! - **PBKDF2-HMAC-SHA256**: password-based key derivation (100,000 rounds)
//! - **AES-256-GCM**: authenticated encryption of the note content
//! - **SHA-256**: unsalted password verification digest
//!
//! ## Envelope layout
//!
//! ```text
//! base64( salt (16 bytes) | iv (12 bytes) | ciphertext+tag (N bytes) )
//! ```
//!
//! ## Threat Model
//!
//! We defend against:
//! - Casual inspection of the persisted note store
//! - Offline tampering with protected note content
//!
//! We do NOT defend against:
//! - Compromised OS / hostile code in the same process
//! - Access to an unlocked session / memory

pub mod envelope;
pub mod key;
pub mod offload;
pub mod password;
pub mod vault;

pub use envelope::{CipherEnvelope, IV_LEN, SALT_LEN, TAG_LEN};
pub use key::{derive_key, DerivedKey, KEY_LEN, PBKDF2_ITERATIONS};
pub use password::{hash_password, password_matches, validate_password};
pub use vault::{decrypt, encrypt};
