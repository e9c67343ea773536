//! Note store trait definition.
//!
//! The `NoteStore` trait is the persistence seam: the core hands it fully
//! transitioned notes and never relies on a particular backend.

use std::path::Path;
use uuid::Uuid;

use super::types::StoreMetadata;
use crate::error::Result;
use crate::note::Note;

/// Persistence interface for notes.
///
/// All implementations must ensure:
/// - Protected notes are only ever written in encrypted form
/// - A rejected write leaves the stored note unchanged
/// - UUIDs are used for all identifiers
pub trait NoteStore {
    /// Create a new, empty store at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `NotelockError::Storage` if the file already exists or
    /// cannot be written.
    fn create(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Open an existing store.
    ///
    /// # Errors
    ///
    /// Returns `NotelockError::Storage` if the file is missing or its
    /// format version is unknown.
    fn open(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Get store metadata.
    fn metadata(&self) -> Result<StoreMetadata>;

    /// List every note, most recently updated first.
    fn list_notes(&self) -> Result<Vec<Note>>;

    /// Get a note by ID.
    ///
    /// Returns `Ok(Some(note))` if found, `Ok(None)` if not found.
    fn get_note(&self, id: &Uuid) -> Result<Option<Note>>;

    /// Insert or replace a note.
    ///
    /// # Errors
    ///
    /// Returns `NotelockError::Validation` if the note violates the
    /// protection invariant (e.g. protected but holding plaintext).
    fn save_note(&mut self, note: &Note) -> Result<()>;

    /// Delete a note. Returns whether a note was removed.
    fn delete_note(&mut self, id: &Uuid) -> Result<bool>;

    /// Check store integrity.
    ///
    /// Verifies:
    /// - SQLite page integrity
    /// - Every stored note satisfies the protection invariant
    fn check_integrity(&self) -> Result<()>;
}
