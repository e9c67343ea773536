//! Protection state transitions.
//!
//! Every operation takes the note it acts on plus the session's
//! [`UnlockedSet`] and returns the updated note for the caller to persist.
//! All fallible work (key derivation, encryption, verification) happens
//! before the unlocked set is touched, so an error leaves both the note and
//! the set exactly as they were.

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::unlocked::{UnlockedNote, UnlockedSet};
use crate::crypto::{decrypt, encrypt, hash_password, password_matches, validate_password};
use crate::error::{NotelockError, Result};
use crate::note::Note;

/// Suffix appended to the title of a duplicated note.
pub const COPY_SUFFIX: &str = " (copy)";

/// Mediates lock/unlock transitions for protected notes.
///
/// The controller holds no state of its own; the unlocked set is passed in
/// explicitly so it can live wherever the session lives.
#[derive(Debug, Default, Clone, Copy)]
pub struct LockController;

impl LockController {
    pub fn new() -> Self {
        Self
    }

    /// Apply password protection to an unprotected note.
    ///
    /// The note is left locked: protecting never unlocks it for the
    /// session, the user has to authenticate again.
    ///
    /// # Errors
    ///
    /// - `NotelockError::AlreadyProtected` if the note is already protected
    /// - `NotelockError::InvalidInput` if the password is empty
    pub fn set_protection(
        &self,
        note: &Note,
        password: &str,
        unlocked: &mut UnlockedSet,
    ) -> Result<Note> {
        if note.is_password_protected {
            return Err(NotelockError::AlreadyProtected);
        }
        validate_password(password)?;

        let ciphertext = encrypt(&note.content, password)?;
        let hash = hash_password(password);

        let mut updated = note.clone();
        updated.content = ciphertext;
        updated.is_password_protected = true;
        updated.password_hash = Some(hash);
        updated.updated_at = Utc::now();

        unlocked.remove(&note.id);
        debug!(note_id = %note.id, "protection applied");
        Ok(updated)
    }

    /// Remove password protection, leaving plaintext content.
    ///
    /// Uses the in-memory plaintext if the note is unlocked, otherwise
    /// verifies `password` and decrypts.
    ///
    /// # Errors
    ///
    /// - `NotelockError::NotProtected` if the note is not protected
    /// - `NotelockError::StillLocked` if locked and no password was given
    /// - `NotelockError::WrongPassword` / `DecryptionFailed` on a bad password
    pub fn remove_protection(
        &self,
        note: &Note,
        password: Option<&str>,
        unlocked: &mut UnlockedSet,
    ) -> Result<Note> {
        if !note.is_password_protected {
            return Err(NotelockError::NotProtected);
        }

        let plaintext = match (unlocked.get(&note.id), password) {
            (Some(entry), _) => entry.plaintext().to_string(),
            (None, Some(password)) => self.verify_and_decrypt(note, password)?,
            (None, None) => return Err(NotelockError::StillLocked),
        };

        let mut updated = note.clone();
        updated.content = plaintext;
        updated.is_password_protected = false;
        updated.password_hash = None;
        updated.updated_at = Utc::now();

        unlocked.remove(&note.id);
        debug!(note_id = %note.id, "protection removed");
        Ok(updated)
    }

    /// Verify a password and unlock the note for this session.
    ///
    /// The stored hash is checked first so an obviously wrong password is
    /// rejected without running PBKDF2. The AEAD tag check still runs on
    /// every hash match and is the authoritative gate.
    ///
    /// # Errors
    ///
    /// - `NotelockError::NotProtected` if the note is not protected
    /// - `NotelockError::WrongPassword` if the hash does not match
    /// - `NotelockError::DecryptionFailed` if the envelope does not decrypt
    pub fn verify_and_unlock(
        &self,
        note: &Note,
        password: &str,
        unlocked: &mut UnlockedSet,
    ) -> Result<String> {
        if !note.is_password_protected {
            return Err(NotelockError::NotProtected);
        }

        let plaintext = self.verify_and_decrypt(note, password)?;
        unlocked.insert(note.id, UnlockedNote::new(plaintext.clone(), password));
        debug!(note_id = %note.id, "note unlocked");
        Ok(plaintext)
    }

    /// Relock a note. The caller must drop any plaintext it copied out.
    pub fn relock(&self, note_id: &Uuid, unlocked: &mut UnlockedSet) {
        if unlocked.remove(note_id) {
            debug!(note_id = %note_id, "note relocked");
        }
    }

    /// Copy a protected note under a fresh envelope.
    ///
    /// The copy is encrypted again under the same password with a new salt
    /// and nonce; the original envelope bytes are never reused. A locked
    /// source requires `password_if_locked`. The copy starts locked and the
    /// source's unlock state is unchanged.
    ///
    /// # Errors
    ///
    /// - `NotelockError::NotProtected` if the note is not protected
    /// - `NotelockError::StillLocked` if locked and no password was given
    /// - `NotelockError::WrongPassword` / `DecryptionFailed` on a bad password
    pub fn duplicate_protected(
        &self,
        note: &Note,
        unlocked: &UnlockedSet,
        password_if_locked: Option<&str>,
    ) -> Result<Note> {
        if !note.is_password_protected {
            return Err(NotelockError::NotProtected);
        }

        let (ciphertext, hash) = match (unlocked.get(&note.id), password_if_locked) {
            (Some(entry), _) => (
                encrypt(entry.plaintext(), entry.password())?,
                hash_password(entry.password()),
            ),
            (None, Some(password)) => {
                let plaintext = Zeroizing::new(self.verify_and_decrypt(note, password)?);
                (encrypt(&plaintext, password)?, hash_password(password))
            }
            (None, None) => return Err(NotelockError::StillLocked),
        };

        let now = Utc::now();
        let copy = Note {
            id: Uuid::new_v4(),
            title: format!("{}{}", note.title, COPY_SUFFIX),
            content: ciphertext,
            is_password_protected: true,
            password_hash: Some(hash),
            tags: note.tags.clone(),
            pinned: false,
            created_at: now,
            updated_at: now,
        };
        debug!(source_id = %note.id, copy_id = %copy.id, "protected note duplicated");
        Ok(copy)
    }

    /// Read the plaintext of a note.
    ///
    /// # Errors
    ///
    /// Returns `NotelockError::StillLocked` for a locked protected note.
    pub fn read_content(&self, note: &Note, unlocked: &UnlockedSet) -> Result<String> {
        if !note.is_password_protected {
            return Ok(note.content.clone());
        }
        unlocked
            .get(&note.id)
            .map(|entry| entry.plaintext().to_string())
            .ok_or(NotelockError::StillLocked)
    }

    /// Save new text into a note.
    ///
    /// A protected note is re-encrypted with the session password (fresh
    /// salt and nonce) before it is handed back for persistence, so edited
    /// plaintext is never written out.
    ///
    /// # Errors
    ///
    /// Returns `NotelockError::StillLocked` for a locked protected note.
    pub fn save_content(
        &self,
        note: &Note,
        new_content: &str,
        unlocked: &mut UnlockedSet,
    ) -> Result<Note> {
        let mut updated = note.clone();
        updated.updated_at = Utc::now();

        if !note.is_password_protected {
            updated.content = new_content.to_string();
            return Ok(updated);
        }

        let entry = unlocked
            .get_mut(&note.id)
            .ok_or(NotelockError::StillLocked)?;
        updated.content = encrypt(new_content, entry.password())?;
        entry.replace_plaintext(new_content.to_string());

        debug!(note_id = %note.id, "protected note re-encrypted on save");
        Ok(updated)
    }

    fn verify_and_decrypt(&self, note: &Note, password: &str) -> Result<String> {
        match note.password_hash.as_deref() {
            Some(stored) if !password_matches(password, stored) => {
                debug!(note_id = %note.id, "password rejected by hash check");
                return Err(NotelockError::WrongPassword);
            }
            Some(_) => {}
            None => {
                warn!(note_id = %note.id, "protected note has no password hash");
            }
        }

        decrypt(&note.content, password).map_err(|err| {
            debug!(note_id = %note.id, error = ?err, "envelope failed to decrypt");
            if err.is_auth_failure() {
                NotelockError::DecryptionFailed
            } else {
                err
            }
        })
    }
}
