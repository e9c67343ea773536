//! Note row type for database queries.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{NotelockError, Result};
use crate::note::Note;

/// Column list matching the field order of [`NoteRow`].
pub const NOTE_COLUMNS: &str = "id, title, content, is_password_protected, password_hash, \
     tags_json, pinned, created_at, updated_at";

/// Raw row data from the notes table, before parsing into domain types.
#[derive(Debug)]
pub struct NoteRow {
    pub id: String,
    pub title: String,
    pub content: String,
    pub is_password_protected: bool,
    pub password_hash: Option<String>,
    pub tags_json: Option<String>,
    pub pinned: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl NoteRow {
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            is_password_protected: row.get(3)?,
            password_hash: row.get(4)?,
            tags_json: row.get(5)?,
            pinned: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(|e| NotelockError::Storage(format!("Invalid timestamp: {}", e)))?
        .with_timezone(&Utc))
}

impl TryFrom<NoteRow> for Note {
    type Error = NotelockError;

    fn try_from(row: NoteRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| NotelockError::Storage(format!("Invalid note UUID: {}", e)))?;
        let tags: Vec<String> = match row.tags_json {
            Some(ref value) => serde_json::from_str(value)
                .map_err(|e| NotelockError::Storage(format!("Invalid tags JSON: {}", e)))?,
            None => Vec::new(),
        };

        Ok(Note {
            id,
            title: row.title,
            content: row.content,
            is_password_protected: row.is_password_protected,
            password_hash: row.password_hash,
            tags,
            pinned: row.pinned,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}
