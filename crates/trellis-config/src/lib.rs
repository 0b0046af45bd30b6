//! Project description loading for Trellis
//!
//! This crate reads dependency descriptions (`Dependencies.toml` or
//! `Dependencies.json`) and file selector lists, validates them, and locates
//! description files inside a project tree.

pub mod description;
pub mod files;
pub mod loader;

// Re-export main types
pub use description::{DescriptionFormat, parse_dependencies, serialize_dependencies};
pub use files::{encode_file_list, parse_file_list};
pub use loader::{DescriptionLoader, DescriptionSource};

use trellis_core::error::TrellisError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, TrellisError>;
