//! # Notelock Core
//!
//! Core library for Notelock - password protection for individual notes.
//!
//! This crate provides the cryptography, the session lock state machine and
//! a note store, independent of any user interface.
//!
//! ## Architecture
//!
//! - **crypto**: key derivation, AES-256-GCM envelopes, password digests
//! - **lock**: `LockController` transitions and the session `UnlockedSet`
//! - **notebook**: in-memory note collection driving the controller
//! - **storage**: `NoteStore` trait and the SQLite implementation
//!
//! ## Example
//!
//! ```
//! use notelock_core::{Notebook, NotelockError};
//!
//! let mut notebook = Notebook::new();
//! let id = notebook.create("Diary", "Hello world");
//!
//! notebook.protect(&id, "Tr0ub4dor&3").unwrap();
//! assert!(matches!(notebook.read(&id), Err(NotelockError::StillLocked)));
//!
//! assert_eq!(notebook.unlock(&id, "Tr0ub4dor&3").unwrap(), "Hello world");
//! notebook.relock(&id);
//! ```

pub mod crypto;
pub mod error;
pub mod lock;
pub mod note;
pub mod notebook;
pub mod storage;

pub use error::{NotelockError, Result};
pub use lock::{LockController, UnlockedSet};
pub use note::Note;
pub use notebook::Notebook;
pub use storage::{NoteStore, SqliteNoteStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
