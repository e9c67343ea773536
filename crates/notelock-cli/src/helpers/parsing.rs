//! Parsing helpers for note ids and tags.

use uuid::Uuid;

use crate::constants::MIN_ID_PREFIX_LEN;
use crate::errors::CliError;

/// Resolve a full UUID or a unique id prefix against the known note ids.
pub fn resolve_note_id<'a>(
    input: &str,
    ids: impl IntoIterator<Item = &'a Uuid>,
) -> Result<Uuid, CliError> {
    let trimmed = input.trim();
    if let Ok(id) = Uuid::parse_str(trimmed) {
        return Ok(id);
    }

    let prefix = trimmed.to_lowercase();
    if prefix.len() < MIN_ID_PREFIX_LEN
        || !prefix.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
    {
        return Err(CliError::invalid_input(format!(
            "Invalid note id: {} (use a UUID or a prefix of at least {} characters)",
            input, MIN_ID_PREFIX_LEN
        )));
    }

    let matches: Vec<Uuid> = ids
        .into_iter()
        .filter(|id| id.to_string().starts_with(&prefix))
        .copied()
        .collect();

    match matches.as_slice() {
        [] => Err(CliError::not_found(
            format!("No note matches id prefix {}", prefix),
            "Hint: Run `notelock list` to find note IDs.",
        )),
        [id] => Ok(*id),
        _ => Err(CliError::invalid_input(format!(
            "Id prefix {} is ambiguous ({} notes match); use more characters",
            prefix,
            matches.len()
        ))),
    }
}

/// Trim, lowercase and dedupe tags, keeping first-seen order.
pub fn normalize_tags(tags: &[String]) -> Result<Vec<String>, CliError> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let value = tag.trim().to_lowercase();
        if value.is_empty() {
            return Err(CliError::invalid_input("Tags cannot be empty"));
        }
        if !normalized.contains(&value) {
            normalized.push(value);
        }
    }
    Ok(normalized)
}
