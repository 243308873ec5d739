//! Header placement policies.
//!
//! One shared placement routine parameterized by policy, rather than one
//! near-duplicate routine per policy.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::util::fs::symlink;

/// How a located header is materialized into the staging directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementPolicy {
    /// Relocate the file, removing it from the source tree. Used when staged
    /// headers must be the only copy consumers can reference.
    Move,
    /// Duplicate the file, leaving the source tree unmodified.
    Copy,
    /// Create a symbolic link back to the original location.
    Symlink,
}

impl PlacementPolicy {
    /// Place `source` at `dest` according to the policy.
    ///
    /// An existing file at `dest` is replaced; when several source matches
    /// collide on one destination name, the last placement wins.
    pub fn place(self, source: &Path, dest: &Path) -> Result<()> {
        match self {
            PlacementPolicy::Move => move_file(source, dest),
            PlacementPolicy::Copy => {
                fs::copy(source, dest).map(|_| ()).with_context(|| {
                    format!("failed to copy {} to {}", source.display(), dest.display())
                })
            }
            PlacementPolicy::Symlink => {
                // Link to the absolute source path so the link stays valid
                // regardless of where the staging directory is consumed from.
                let target = source.canonicalize().with_context(|| {
                    format!("failed to resolve symlink target: {}", source.display())
                })?;
                if dest.symlink_metadata().is_ok() {
                    fs::remove_file(dest).with_context(|| {
                        format!("failed to replace existing file: {}", dest.display())
                    })?;
                }
                symlink(&target, dest).with_context(|| {
                    format!(
                        "failed to symlink {} to {}",
                        dest.display(),
                        target.display()
                    )
                })
            }
        }
    }
}

impl fmt::Display for PlacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementPolicy::Move => write!(f, "move"),
            PlacementPolicy::Copy => write!(f, "copy"),
            PlacementPolicy::Symlink => write!(f, "symlink"),
        }
    }
}

/// Rename, falling back to copy-and-delete across filesystems.
fn move_file(source: &Path, dest: &Path) -> Result<()> {
    if fs::rename(source, dest).is_ok() {
        return Ok(());
    }
    fs::copy(source, dest)
        .with_context(|| format!("failed to copy {} to {}", source.display(), dest.display()))?;
    fs::remove_file(source)
        .with_context(|| format!("failed to remove source file: {}", source.display()))
}
