//! Output formatting for notes.

mod json;
mod text;

pub use json::{note_json, notes_json};
pub use text::{list_rows, short_id, LIST_HEADERS};
