//! Helper functions for CLI operations.

mod input;
mod parsing;

pub use input::{confirm, env_password, prompt_new_password, prompt_password, read_note_body};
pub use parsing::{normalize_tags, resolve_note_id};
