//! High-level operations.
//!
//! This module contains the implementation of the two packaging pipelines.

pub mod errors;
pub mod headers;
pub mod resources;

pub use errors::{ConversionFailure, PipelineError};
pub use headers::{materialize, HeaderOptions, HeaderReport, PlacedHeader};
pub use resources::{normalize, ResourceOptions, ResourceReport};
