//! # trellis-core
//!
//! Core configuration model shared across all Trellis crates.
//!
//! This crate provides:
//! - File selection rules with a stable structured encoding
//! - Package references and version requirements
//! - `DependencySet` and its `Package.swift` rendering
//! - Error types for schema and dispatch failures
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Value types of the configuration model
//! - `schema`: Discriminator-first decoding helpers
//! - `manifest`: Manifest synthesis
//! - `error`: Error types and result aliases

pub mod error;
pub mod manifest;
pub mod schema;
pub mod types;

// Re-export commonly used types
pub use error::{DispatchError, SchemaError, TrellisError, TrellisResult};
pub use manifest::synthesize;
pub use types::{
    DependencySet, DeploymentDevice, DeploymentTarget, FileList, FileSelector, PackageRequirement,
    PackageSpec, PathValue, ProductType,
};
