//! Public header materialization.
//!
//! Derives the umbrella header from the public header manifest and
//! materializes every referenced header out of the source tree into a
//! packaging-ready staging directory.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use walkdir::WalkDir;

use crate::core::manifest::HeaderManifest;
use crate::core::placement::PlacementPolicy;
use crate::core::umbrella::UmbrellaHeader;
use crate::ops::errors::PipelineError;
use crate::util::fs::{read_to_string, reset_dir, write_string};

/// Options for a header materialization run.
#[derive(Debug, Clone)]
pub struct HeaderOptions {
    /// Source tree searched (at any depth) for the manifest's headers.
    pub source_root: PathBuf,

    /// Public header manifest, one filename per line.
    pub manifest: PathBuf,

    /// Optional prefix header prepended verbatim to the umbrella header.
    pub prefix: Option<PathBuf>,

    /// Staging directory; destructively recreated on every run.
    pub staging: PathBuf,

    /// How matched headers are placed into staging.
    pub policy: PlacementPolicy,

    /// Library namespace for `#import <Namespace/...>` directives.
    pub namespace: String,

    /// Umbrella header file name override; defaults to `<namespace>.h`.
    pub umbrella: Option<String>,

    /// Downgrade unmatched manifest entries from a hard failure to warnings.
    pub allow_unmatched: bool,
}

/// A header that was materialized into staging.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedHeader {
    /// Manifest entry this placement satisfies.
    pub name: String,
    /// Where the header was found in the source tree.
    pub source: PathBuf,
    /// Where it was placed.
    pub dest: PathBuf,
}

/// Outcome of a header materialization run.
#[derive(Debug, Serialize)]
pub struct HeaderReport {
    /// Path of the generated umbrella header.
    pub umbrella: PathBuf,
    /// Every placement performed, in manifest order.
    pub placed: Vec<PlacedHeader>,
    /// Manifest entries with no match in the source tree.
    pub unmatched: Vec<String>,
}

/// Materialize the public header bundle.
///
/// Reads the manifest, resets the staging directory, writes the umbrella
/// header, then places every source-tree match for every manifest entry.
/// Unmatched entries fail the run in aggregate unless
/// [`HeaderOptions::allow_unmatched`] is set.
pub fn materialize(opts: &HeaderOptions) -> Result<HeaderReport> {
    // Inputs are validated before the destructive staging reset so a
    // configuration mistake cannot wipe the previous run's output.
    let manifest = HeaderManifest::load(&opts.manifest)?;
    let prelude = opts
        .prefix
        .as_deref()
        .map(read_to_string)
        .transpose()
        .context("failed to read prefix header")?;
    if !opts.source_root.is_dir() {
        bail!(
            "source root is not a directory: {}",
            opts.source_root.display()
        );
    }

    reset_dir(&opts.staging)?;

    let mut umbrella = UmbrellaHeader::new(&opts.namespace, manifest.entries());
    if let Some(prelude) = prelude {
        umbrella = umbrella.with_prelude(prelude);
    }
    let umbrella_name = opts.umbrella.clone().unwrap_or_else(|| umbrella.file_name());
    let umbrella_path = opts.staging.join(&umbrella_name);
    write_string(&umbrella_path, &umbrella.render())?;
    tracing::debug!("Generated umbrella header: {}", umbrella_path.display());

    let mut placed = Vec::new();
    let mut unmatched = Vec::new();

    for name in manifest.entries() {
        let matches = find_headers(&opts.source_root, name)?;

        if matches.is_empty() {
            if opts.allow_unmatched {
                tracing::warn!("public header `{}` not found in the source tree", name);
            }
            unmatched.push(name.clone());
            continue;
        }

        if matches.len() > 1 {
            tracing::warn!(
                "ambiguous public header `{}`: {} matches in the source tree",
                name,
                matches.len()
            );
        }

        for source in matches {
            let dest = opts.staging.join(name);
            opts.policy
                .place(&source, &dest)
                .with_context(|| format!("failed to place public header `{}`", name))?;
            tracing::debug!(
                "Placed {} -> {} ({})",
                source.display(),
                dest.display(),
                opts.policy
            );
            placed.push(PlacedHeader {
                name: name.clone(),
                source,
                dest,
            });
        }
    }

    if !unmatched.is_empty() && !opts.allow_unmatched {
        return Err(PipelineError::UnmatchedHeaders(unmatched).into());
    }

    Ok(HeaderReport {
        umbrella: umbrella_path,
        placed,
        unmatched,
    })
}

/// Find every file under `root` whose base name equals `name`, at any depth.
fn find_headers(root: &Path, name: &str) -> Result<Vec<PathBuf>> {
    let mut matches = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if entry.file_type().is_file() && entry.file_name().to_string_lossy() == name {
            matches.push(entry.into_path());
        }
    }
    Ok(matches)
}
