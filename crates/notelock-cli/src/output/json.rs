//! JSON output formatting for notes.

use notelock_core::Note;

/// Convert a note to JSON for output.
///
/// Protected notes never expose their envelope; `content` is only present
/// when the caller passes readable plaintext.
pub fn note_json(note: &Note, content: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "id": note.id,
        "title": note.title,
        "content": content,
        "is_password_protected": note.is_password_protected,
        "tags": note.tags,
        "pinned": note.pinned,
        "created_at": note.created_at,
        "updated_at": note.updated_at,
    })
}

/// Convert notes to a JSON array for listing; protected bodies are omitted.
pub fn notes_json(notes: &[&Note]) -> Vec<serde_json::Value> {
    notes
        .iter()
        .map(|note| {
            let content = (!note.is_password_protected).then_some(note.content.as_str());
            note_json(note, content)
        })
        .collect()
}
