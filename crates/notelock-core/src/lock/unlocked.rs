//! Session-scoped record of unlocked notes.

use std::collections::HashMap;
use std::time::Instant;

use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Decrypted state held for one unlocked note.
///
/// Both the plaintext and the password are wiped from memory on drop.
pub(crate) struct UnlockedNote {
    plaintext: Zeroizing<String>,
    password: SecretString,
    unlocked_at: Instant,
}

impl UnlockedNote {
    pub(crate) fn new(plaintext: String, password: &str) -> Self {
        Self {
            plaintext: Zeroizing::new(plaintext),
            password: SecretString::from(password.to_string()),
            unlocked_at: Instant::now(),
        }
    }

    pub(crate) fn plaintext(&self) -> &str {
        &self.plaintext
    }

    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// Replace the held plaintext after a re-encrypting save.
    pub(crate) fn replace_plaintext(&mut self, plaintext: String) {
        self.plaintext = Zeroizing::new(plaintext);
    }
}

/// The set of protected notes whose content is currently decrypted.
///
/// Never persisted: a fresh session starts with an empty set and dropping
/// the set zeroizes everything it held.
#[derive(Default)]
pub struct UnlockedSet {
    entries: HashMap<Uuid, UnlockedNote>,
}

impl UnlockedSet {
    /// Create an empty set (all notes locked).
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the note is currently unlocked.
    pub fn contains(&self, id: &Uuid) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of unlocked notes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of all unlocked notes.
    pub fn ids(&self) -> Vec<Uuid> {
        self.entries.keys().copied().collect()
    }

    /// When the note was unlocked, if it is.
    pub fn unlocked_at(&self, id: &Uuid) -> Option<Instant> {
        self.entries.get(id).map(|entry| entry.unlocked_at)
    }

    /// Relock every note (session end).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn get(&self, id: &Uuid) -> Option<&UnlockedNote> {
        self.entries.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &Uuid) -> Option<&mut UnlockedNote> {
        self.entries.get_mut(id)
    }

    pub(crate) fn insert(&mut self, id: Uuid, entry: UnlockedNote) {
        self.entries.insert(id, entry);
    }

    /// Drop the note's decrypted state. Returns whether it was unlocked.
    pub(crate) fn remove(&mut self, id: &Uuid) -> bool {
        self.entries.remove(id).is_some()
    }
}

impl std::fmt::Debug for UnlockedSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnlockedSet")
            .field("ids", &self.entries.keys().collect::<Vec<_>>())
            .field("content", &"[REDACTED]")
            .finish()
    }
}
