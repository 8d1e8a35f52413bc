//! # rcctl-proto
//!
//! Shared wire types for the rcctl workspace.
//!
//! This crate provides:
//! - `ConfigTemplate` and its parameter, group, and condition types
//! - `Version` metadata and the `VersionNumber` newtype
//! - `ProjectId`, the opaque project identifier
//!
//! Everything here is plain data: serde-(de)serialisable, no I/O.

mod project;
mod template;
mod version;

pub use project::ProjectId;
pub use template::{Condition, ConfigTemplate, ParameterGroup, ParameterValue, RemoteConfigParameter};
pub use version::{ListVersionsResult, ParseVersionNumberError, UpdateUser, Version, VersionNumber};

/// Product name used in user-facing error messages.
pub const PRODUCT_NAME: &str = "Firebase Remote Config";
