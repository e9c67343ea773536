//! SQLite note store.
//!
//! Notes live in a plain SQLite file. Confidentiality of protected notes
//! comes from their per-note cipher envelopes, not from the database file.

mod row;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;
use uuid::Uuid;

use crate::error::{NotelockError, Result};
use crate::note::Note;
use crate::storage::traits::NoteStore;
use crate::storage::types::{StoreMetadata, FORMAT_VERSION};

use row::{NoteRow, NOTE_COLUMNS};

/// SQLite-backed note store.
pub struct SqliteNoteStore {
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl SqliteNoteStore {
    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| NotelockError::Storage("SQLite connection poisoned".to_string()))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_meta(conn: &Connection, key: &str) -> Result<String> {
        conn.query_row("SELECT value FROM meta WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?
        .ok_or_else(|| NotelockError::Storage(format!("Missing metadata key: {}", key)))
    }
}

impl NoteStore for SqliteNoteStore {
    fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(NotelockError::Storage(
                "Note store already exists".to_string(),
            ));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            r#"
            CREATE TABLE meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE notes (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                is_password_protected INTEGER NOT NULL DEFAULT 0,
                password_hash TEXT,
                tags_json TEXT,
                pinned INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,

                CHECK ((is_password_protected = 1) = (password_hash IS NOT NULL))
            );

            CREATE INDEX notes_updated_at ON notes(updated_at);
            "#,
        )?;

        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO meta (key, value) VALUES ('format_version', ?1), ('created_at', ?2)",
            params![FORMAT_VERSION, now],
        )?;

        debug!(path = %path.display(), "note store created");
        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(conn),
        })
    }

    fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NotelockError::Storage(format!(
                "Note store not found: {}",
                path.display()
            )));
        }

        let conn = Connection::open(path)?;
        let format_version = Self::read_meta(&conn, "format_version")?;
        if format_version != FORMAT_VERSION {
            return Err(NotelockError::Storage(format!(
                "Unsupported store format version: {}",
                format_version
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(conn),
        })
    }

    fn metadata(&self) -> Result<StoreMetadata> {
        let conn = self.lock_conn()?;

        let format_version = Self::read_meta(&conn, "format_version")?;
        let created_at_str = Self::read_meta(&conn, "created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| NotelockError::Storage(format!("Invalid created_at timestamp: {}", e)))?
            .with_timezone(&Utc);

        let (note_count, protected_count): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(is_password_protected), 0) FROM notes",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(StoreMetadata {
            format_version,
            created_at,
            note_count: note_count as usize,
            protected_count: protected_count as usize,
        })
    }

    fn list_notes(&self) -> Result<Vec<Note>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM notes ORDER BY updated_at DESC",
            NOTE_COLUMNS
        ))?;
        let rows = stmt.query_map([], NoteRow::from_row)?;

        let mut notes = Vec::new();
        for row in rows {
            notes.push(Note::try_from(row?)?);
        }
        Ok(notes)
    }

    fn get_note(&self, id: &Uuid) -> Result<Option<Note>> {
        let conn = self.lock_conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM notes WHERE id = ?1", NOTE_COLUMNS),
                [id.to_string()],
                NoteRow::from_row,
            )
            .optional()?;

        row.map(Note::try_from).transpose()
    }

    fn save_note(&mut self, note: &Note) -> Result<()> {
        note.validate_protection()?;

        let tags_json = if note.tags.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&note.tags)?)
        };

        let conn = self.lock_conn()?;
        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO notes ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                NOTE_COLUMNS
            ),
            params![
                note.id.to_string(),
                note.title,
                note.content,
                note.is_password_protected,
                note.password_hash,
                tags_json,
                note.pinned,
                note.created_at.to_rfc3339(),
                note.updated_at.to_rfc3339(),
            ],
        )?;

        debug!(note_id = %note.id, protected = note.is_password_protected, "note saved");
        Ok(())
    }

    fn delete_note(&mut self, id: &Uuid) -> Result<bool> {
        let conn = self.lock_conn()?;
        let removed = conn.execute("DELETE FROM notes WHERE id = ?1", [id.to_string()])?;
        Ok(removed > 0)
    }

    fn check_integrity(&self) -> Result<()> {
        {
            let conn = self.lock_conn()?;
            let status: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
            if status != "ok" {
                return Err(NotelockError::Storage(format!(
                    "SQLite integrity check failed: {}",
                    status
                )));
            }
        }

        for note in self.list_notes()? {
            note.validate_protection()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{decrypt, encrypt, hash_password};
    use tempfile::tempdir;

    fn protected(plaintext: &str, password: &str) -> Note {
        let mut note = Note::new("Secret", "");
        note.content = encrypt(plaintext, password).unwrap();
        note.is_password_protected = true;
        note.password_hash = Some(hash_password(password));
        note
    }

    #[test]
    fn test_create_and_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.db");

        let mut store = SqliteNoteStore::create(&path).unwrap();
        let note = Note::new("Hello", "world").with_tags(vec!["a".to_string()]);
        store.save_note(&note).unwrap();
        drop(store);

        let store = SqliteNoteStore::open(&path).unwrap();
        let loaded = store.get_note(&note.id).unwrap().unwrap();
        assert_eq!(loaded, note);
        assert_eq!(store.metadata().unwrap().note_count, 1);
        assert_eq!(store.metadata().unwrap().format_version, FORMAT_VERSION);
    }

    #[test]
    fn test_create_existing_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.db");
        SqliteNoteStore::create(&path).unwrap();
        assert!(SqliteNoteStore::create(&path).is_err());
    }

    #[test]
    fn test_open_missing_fails() {
        let dir = tempdir().unwrap();
        assert!(SqliteNoteStore::open(&dir.path().join("missing.db")).is_err());
    }

    #[test]
    fn test_protected_note_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = SqliteNoteStore::create(&dir.path().join("notes.db")).unwrap();
        let note = protected("Hello world", "pw");

        store.save_note(&note).unwrap();
        let loaded = store.get_note(&note.id).unwrap().unwrap();
        assert!(loaded.is_password_protected);
        assert_eq!(decrypt(&loaded.content, "pw").unwrap(), "Hello world");

        let meta = store.metadata().unwrap();
        assert_eq!(meta.protected_count, 1);
    }

    #[test]
    fn test_rejects_protected_plaintext() {
        let dir = tempdir().unwrap();
        let mut store = SqliteNoteStore::create(&dir.path().join("notes.db")).unwrap();
        let mut note = Note::new("Leak", "plain secret");
        note.is_password_protected = true;
        note.password_hash = Some(hash_password("pw"));

        let result = store.save_note(&note);
        assert!(matches!(result, Err(NotelockError::Validation(_))));
        assert!(store.get_note(&note.id).unwrap().is_none());
    }

    #[test]
    fn test_rejects_base64_looking_plaintext() {
        let dir = tempdir().unwrap();
        let mut store = SqliteNoteStore::create(&dir.path().join("notes.db")).unwrap();
        let mut note = Note::new("Leak", "dearDiaryTodayIwentToTheParkAndSawADogXY");
        note.is_password_protected = true;
        note.password_hash = Some(hash_password("pw"));

        assert!(matches!(
            store.save_note(&note),
            Err(NotelockError::Validation(_))
        ));
        assert!(store.get_note(&note.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_note() {
        let dir = tempdir().unwrap();
        let mut store = SqliteNoteStore::create(&dir.path().join("notes.db")).unwrap();
        let note = Note::new("Temp", "x");
        store.save_note(&note).unwrap();

        assert!(store.delete_note(&note.id).unwrap());
        assert!(!store.delete_note(&note.id).unwrap());
        assert!(store.list_notes().unwrap().is_empty());
    }

    #[test]
    fn test_check_integrity() {
        let dir = tempdir().unwrap();
        let mut store = SqliteNoteStore::create(&dir.path().join("notes.db")).unwrap();
        store.save_note(&Note::new("Plain", "x")).unwrap();
        store.save_note(&protected("y", "pw")).unwrap();
        assert!(store.check_integrity().is_ok());

        {
            let conn = store.lock_conn().unwrap();
            conn.execute(
                "UPDATE notes SET content = 'plain again' WHERE is_password_protected = 1",
                [],
            )
            .unwrap();
        }
        assert!(store.check_integrity().is_err());
    }
}
