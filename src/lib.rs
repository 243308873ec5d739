//! Stagekit - packaging preparation for distributable libraries
//!
//! This crate provides the core library functionality for Stagekit: deriving
//! a public-API umbrella header bundle from a source tree, and normalizing
//! localized resource bundles so downstream packagers can stage them without
//! code-signing failures.

pub mod core;
pub mod ops;
pub mod plist;
pub mod util;

pub use crate::core::{
    config::ProjectConfig, manifest::HeaderManifest, placement::PlacementPolicy,
    umbrella::UmbrellaHeader,
};

pub use crate::ops::{HeaderOptions, HeaderReport, PipelineError, ResourceOptions, ResourceReport};
pub use crate::plist::{PlistConverter, Plutil};
