//! Core data model: manifests, umbrella headers, placement, configuration.

pub mod config;
pub mod manifest;
pub mod placement;
pub mod umbrella;

pub use config::{HeadersConfig, ProjectConfig, ResourcesConfig};
pub use manifest::HeaderManifest;
pub use placement::PlacementPolicy;
pub use umbrella::UmbrellaHeader;
