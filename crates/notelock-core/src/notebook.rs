//! In-memory note collection bound to one session.
//!
//! `Notebook` pairs the notes with the session's [`UnlockedSet`] and routes
//! every content or protection change through the [`LockController`]. A
//! transition is written back only when the controller returns `Ok`.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{NotelockError, Result};
use crate::lock::{LockController, UnlockedSet, COPY_SUFFIX};
use crate::note::Note;

/// A collection of notes plus the session's unlock state.
#[derive(Debug, Default)]
pub struct Notebook {
    notes: BTreeMap<Uuid, Note>,
    unlocked: UnlockedSet,
    controller: LockController,
}

impl Notebook {
    /// Create an empty notebook with every note locked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a notebook from persisted notes. The session starts locked.
    pub fn from_notes(notes: impl IntoIterator<Item = Note>) -> Self {
        Self {
            notes: notes.into_iter().map(|note| (note.id, note)).collect(),
            unlocked: UnlockedSet::new(),
            controller: LockController::new(),
        }
    }

    /// Insert or replace a note as-is. Replacing a note relocks it.
    ///
    /// # Errors
    ///
    /// Returns `NotelockError::Validation` if the note violates the
    /// protection invariant.
    pub fn insert(&mut self, note: Note) -> Result<()> {
        note.validate_protection()?;
        // Cached plaintext belongs to the replaced version.
        self.unlocked.remove(&note.id);
        self.notes.insert(note.id, note);
        Ok(())
    }

    /// Create a new unprotected note and return its id.
    pub fn create(&mut self, title: &str, content: &str) -> Uuid {
        let note = Note::new(title, content);
        let id = note.id;
        self.notes.insert(id, note);
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Notes ordered pinned first, then most recently updated.
    pub fn notes(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.notes.values().collect();
        notes.sort_by(|a, b| {
            b.pinned
                .cmp(&a.pinned)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
        });
        notes
    }

    /// The session's unlock state.
    pub fn unlocked(&self) -> &UnlockedSet {
        &self.unlocked
    }

    pub fn is_unlocked(&self, id: &Uuid) -> bool {
        self.unlocked.contains(id)
    }

    /// Plaintext of a note, if it is readable in this session.
    pub fn read(&self, id: &Uuid) -> Result<String> {
        let note = find(&self.notes, id)?;
        self.controller.read_content(note, &self.unlocked)
    }

    /// Generic update path. Protected notes are re-encrypted before the
    /// new version is stored.
    pub fn update_content(&mut self, id: &Uuid, content: &str) -> Result<&Note> {
        let note = find(&self.notes, id)?;
        let updated = self
            .controller
            .save_content(note, content, &mut self.unlocked)?;
        Ok(self.store(updated))
    }

    /// Set a note's pinned flag.
    pub fn set_pinned(&mut self, id: &Uuid, pinned: bool) -> Result<&Note> {
        let mut updated = find(&self.notes, id)?.clone();
        updated.pinned = pinned;
        updated.updated_at = Utc::now();
        Ok(self.store(updated))
    }

    /// Delete a note and forget its unlocked state in the same step.
    pub fn delete(&mut self, id: &Uuid) -> Result<Note> {
        let note = self.notes.remove(id).ok_or(NotelockError::NoteNotFound(*id))?;
        self.unlocked.remove(id);
        debug!(note_id = %id, "note deleted");
        Ok(note)
    }

    /// Apply password protection. The note stays locked afterwards.
    pub fn protect(&mut self, id: &Uuid, password: &str) -> Result<&Note> {
        let note = find(&self.notes, id)?;
        let updated = self
            .controller
            .set_protection(note, password, &mut self.unlocked)?;
        Ok(self.store(updated))
    }

    /// Remove protection using the unlocked plaintext or `password`.
    pub fn unprotect(&mut self, id: &Uuid, password: Option<&str>) -> Result<&Note> {
        let note = find(&self.notes, id)?;
        let updated = self
            .controller
            .remove_protection(note, password, &mut self.unlocked)?;
        Ok(self.store(updated))
    }

    /// Verify `password` and unlock the note, returning its plaintext.
    pub fn unlock(&mut self, id: &Uuid, password: &str) -> Result<String> {
        let note = find(&self.notes, id)?;
        self.controller
            .verify_and_unlock(note, password, &mut self.unlocked)
    }

    /// Relock one note.
    pub fn relock(&mut self, id: &Uuid) {
        self.controller.relock(id, &mut self.unlocked);
    }

    /// Relock every note (session end).
    pub fn relock_all(&mut self) {
        self.unlocked.clear();
    }

    /// Duplicate a note and return the copy's id.
    ///
    /// Unprotected notes are copied directly; protected notes get a fresh
    /// envelope under the same password. Nothing is added on failure.
    pub fn duplicate(&mut self, id: &Uuid, password_if_locked: Option<&str>) -> Result<Uuid> {
        let note = find(&self.notes, id)?;
        let copy = if note.is_password_protected {
            self.controller
                .duplicate_protected(note, &self.unlocked, password_if_locked)?
        } else {
            let now = Utc::now();
            Note {
                id: Uuid::new_v4(),
                title: format!("{}{}", note.title, COPY_SUFFIX),
                pinned: false,
                created_at: now,
                updated_at: now,
                ..note.clone()
            }
        };
        let copy_id = copy.id;
        self.notes.insert(copy_id, copy);
        Ok(copy_id)
    }

    /// Consume the notebook, returning its notes for persistence.
    pub fn into_notes(self) -> Vec<Note> {
        self.notes.into_values().collect()
    }

    fn store(&mut self, note: Note) -> &Note {
        let id = note.id;
        self.notes.insert(id, note);
        &self.notes[&id]
    }
}

/// Field-level lookup so callers can borrow the unlocked set mutably.
fn find<'a>(notes: &'a BTreeMap<Uuid, Note>, id: &Uuid) -> Result<&'a Note> {
    notes.get(id).ok_or(NotelockError::NoteNotFound(*id))
}
