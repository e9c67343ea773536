//! Data types for the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current on-disk schema version.
pub const FORMAT_VERSION: &str = "0.1";

/// Metadata for a note store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMetadata {
    /// Format version (e.g., "0.1")
    pub format_version: String,

    /// When this store was created
    pub created_at: DateTime<Utc>,

    /// Number of notes in the store
    pub note_count: usize,

    /// Number of password-protected notes
    pub protected_count: usize,
}
