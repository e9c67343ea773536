//! Storage abstraction for Notelock.
//!
//! This module defines the `NoteStore` trait and a SQLite implementation.
//!
//! ## Security
//!
//! The store persists notes exactly as the lock controller hands them
//! over. Protected notes arrive already encrypted, and `save_note` refuses
//! any protected note whose content is not a cipher envelope, so plaintext
//! of a protected note can never reach disk through this layer. The
//! session's unlocked set is never persisted.

pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export public types
pub use sqlite::SqliteNoteStore;
pub use traits::NoteStore;
pub use types::StoreMetadata;
