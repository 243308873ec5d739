//! Project configuration file support.
//!
//! A `Stagekit.toml` next to the invocation supplies defaults for both
//! pipelines so a packaging step can run plain `stagekit headers` /
//! `stagekit resources`. Command-line flags override file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::placement::PlacementPolicy;

/// Conventional configuration file name.
pub const CONFIG_FILE_NAME: &str = "Stagekit.toml";

/// Project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Header pipeline defaults
    pub headers: HeadersConfig,

    /// Resource pipeline defaults
    pub resources: ResourcesConfig,
}

/// Defaults for the header materialization pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadersConfig {
    /// Root of the source tree searched for public headers
    pub source_root: Option<PathBuf>,

    /// Public header manifest file (one filename per line)
    pub manifest: Option<PathBuf>,

    /// Prefix header prepended verbatim to the umbrella header
    pub prefix: Option<PathBuf>,

    /// Staging directory for the materialized bundle
    pub staging: Option<PathBuf>,

    /// Placement policy (move, copy, or symlink)
    pub policy: Option<PlacementPolicy>,

    /// Library namespace used in `#import <Namespace/...>` directives
    pub namespace: Option<String>,

    /// Umbrella header file name override (defaults to `<namespace>.h`)
    pub umbrella: Option<String>,
}

/// Defaults for the resource normalization pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Root of the resources tree searched for localization bundles
    pub resources_root: Option<PathBuf>,

    /// Staging directory for the normalized bundles
    pub staging: Option<PathBuf>,
}

impl ProjectConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }
}
