//! Core configuration model.
//!
//! This module provides the value types a project description is built from:
//! - File selectors (globs and folder references)
//! - Package references and their version requirements
//! - Dependency sets with product and deployment overrides

pub mod dependencies;
pub mod file_selector;
pub mod package;
pub mod path;
pub mod platform;
pub mod requirement;

// Re-export all public types
pub use dependencies::DependencySet;
pub use file_selector::{FileList, FileSelector};
pub use package::PackageSpec;
pub use path::PathValue;
pub use platform::{DeploymentDevice, DeploymentTarget, ProductType};
pub use requirement::PackageRequirement;
