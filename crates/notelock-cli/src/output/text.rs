//! Text output formatting for notes.

use notelock_core::Note;

use crate::ui::{dim, UiContext};

pub const LIST_HEADERS: [&str; 5] = ["ID", "TITLE", "TAGS", "UPDATED", "PREVIEW"];

const PREVIEW_CHARS: usize = 40;

/// First 8 characters of a note id.
pub fn short_id(note: &Note) -> String {
    note.id.to_string()[..8].to_string()
}

/// One-line preview of note content. Locked notes never preview.
pub fn preview(ctx: &UiContext, note: &Note) -> String {
    if note.is_password_protected {
        return dim(ctx, "(locked)");
    }
    let first_line = note.content.lines().next().unwrap_or("");
    if first_line.chars().count() > PREVIEW_CHARS {
        let truncated: String = first_line.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{}...", truncated)
    } else {
        first_line.to_string()
    }
}

/// Table rows for `list`.
pub fn list_rows(ctx: &UiContext, notes: &[&Note]) -> Vec<Vec<String>> {
    notes
        .iter()
        .map(|note| {
            let mut title = note.title.clone();
            if note.pinned {
                title.push_str(" *");
            }
            vec![
                short_id(note),
                title,
                note.tags.join(","),
                note.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                preview(ctx, note),
            ]
        })
        .collect()
}
