//! One CLI invocation's view of the store.
//!
//! A session loads every note into a [`Notebook`], so protected notes start
//! locked and are unlocked at most for the lifetime of the process.

use std::path::Path;

use notelock_core::{Note, NoteStore, Notebook, SqliteNoteStore};
use tracing::debug;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::constants::MAX_PASSWORD_ATTEMPTS;
use crate::errors::CliError;
use crate::helpers::{env_password, prompt_password, resolve_note_id};
use crate::ui;

use super::resolver::missing_store_message;

pub struct Session {
    store: SqliteNoteStore,
    notebook: Notebook,
    interactive: bool,
}

impl Session {
    pub fn open(path: &Path, interactive: bool) -> anyhow::Result<Self> {
        if !path.exists() {
            return Err(missing_store_message(path).into());
        }
        let store = SqliteNoteStore::open(path)?;
        let notebook = Notebook::from_notes(store.list_notes()?);
        debug!(path = %path.display(), notes = notebook.len(), "session opened");
        Ok(Self {
            store,
            notebook,
            interactive,
        })
    }

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    pub fn notebook_mut(&mut self) -> &mut Notebook {
        &mut self.notebook
    }

    pub fn store(&self) -> &SqliteNoteStore {
        &self.store
    }

    pub fn interactive(&self) -> bool {
        self.interactive
    }

    /// Resolve a UUID or unique prefix to a note id.
    pub fn resolve_id(&self, input: &str) -> anyhow::Result<Uuid> {
        let ids: Vec<Uuid> = self.notebook.notes().iter().map(|note| note.id).collect();
        let id = resolve_note_id(input, &ids)?;
        self.require(&id)?;
        Ok(id)
    }

    /// Look up a note that must exist.
    pub fn require(&self, id: &Uuid) -> anyhow::Result<&Note> {
        self.notebook.get(id).ok_or_else(|| {
            CliError::not_found(
                format!("Note not found: {}", id),
                "Hint: Run `notelock list` to find note IDs.",
            )
            .into()
        })
    }

    /// Unlock a protected note, returning its plaintext.
    ///
    /// NOTELOCK_PASSWORD gets a single attempt. At a prompt the user gets
    /// three tries before the command fails.
    pub fn unlock(&mut self, id: &Uuid) -> anyhow::Result<Zeroizing<String>> {
        if let Some(password) = env_password() {
            return self.try_unlock(id, &password).map_err(into_cli_error);
        }

        let max_attempts = if self.interactive {
            MAX_PASSWORD_ATTEMPTS
        } else {
            1
        };
        for attempt in 1..=max_attempts {
            let password = prompt_password(self.interactive)?;
            match self.try_unlock(id, &password) {
                Ok(plaintext) => return Ok(plaintext),
                Err(err) if err.is_auth_failure() => {
                    let remaining = max_attempts - attempt;
                    if remaining == 0 {
                        break;
                    }
                    eprintln!(
                        "Incorrect password. {} attempt{} remaining.",
                        remaining,
                        if remaining == 1 { "" } else { "s" }
                    );
                }
                Err(err) => return Err(into_cli_error(err)),
            }
        }

        Err(CliError::auth_failed_with_hint(
            "Too many failed password attempts.",
            "Hint: Check the password, or set NOTELOCK_PASSWORD for scripted use.",
        )
        .into())
    }

    /// Unlock unless this session already holds the note's plaintext.
    pub fn ensure_unlocked(&mut self, id: &Uuid) -> anyhow::Result<()> {
        if self.require(id)?.is_password_protected && !self.notebook.is_unlocked(id) {
            self.unlock(id)?;
        }
        Ok(())
    }

    fn try_unlock(
        &mut self,
        id: &Uuid,
        password: &str,
    ) -> notelock_core::Result<Zeroizing<String>> {
        let spinner = ui::spinner("Unlocking");
        let result = self.notebook.unlock(id, password).map(Zeroizing::new);
        spinner.finish_and_clear();
        result
    }

    /// Write the notebook's current version of a note to the store.
    pub fn persist(&mut self, id: &Uuid) -> anyhow::Result<()> {
        let note = self.require(id)?.clone();
        self.store.save_note(&note)?;
        Ok(())
    }

    /// Remove a note from the notebook and the store.
    pub fn delete(&mut self, id: &Uuid) -> anyhow::Result<Note> {
        let note = self.notebook.delete(id)?;
        self.store.delete_note(id)?;
        Ok(note)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Plaintext held for this process is zeroized with the unlocked set.
        self.notebook.relock_all();
    }
}

fn into_cli_error(err: notelock_core::NotelockError) -> anyhow::Error {
    CliError::from(err).into()
}
