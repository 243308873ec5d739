//! Command implementations

pub mod completions;
pub mod headers;
pub mod resources;
