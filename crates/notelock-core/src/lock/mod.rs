//! Session lock state for password-protected notes.
//!
//! ## Lifecycle
//!
//! ```text
//! unprotected --set_protection--> locked --verify_and_unlock--> unlocked
//!      ^                            ^                              |
//!      |                            +------------relock------------+
//!      +-----------------------remove_protection-------------------+
//! ```
//!
//! The [`UnlockedSet`] is explicit state owned by the caller's session and
//! threaded through every [`LockController`] call; there is no global
//! "currently unlocked" singleton. Mutations to a set must be serialized by
//! its owner.

mod controller;
mod unlocked;

pub use controller::{LockController, COPY_SUFFIX};
pub use unlocked::UnlockedSet;
