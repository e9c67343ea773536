//! Application-level utilities for the Notelock CLI.
//!
//! This module provides:
//! - Path resolution for config and store files
//! - A per-process session pairing the store with an in-memory notebook
//! - Password handling with retry logic

mod context;
mod resolver;
mod session;

pub use context::AppContext;
pub use resolver::resolve_config_path;
