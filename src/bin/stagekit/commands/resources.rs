//! `stagekit resources` command

use anyhow::{Context, Result};

use crate::cli::ResourcesArgs;
use stagekit::core::config::ProjectConfig;
use stagekit::ops::resources::{normalize, ResourceOptions};
use stagekit::Plutil;

pub fn execute(args: ResourcesArgs, config: &ProjectConfig) -> Result<()> {
    let defaults = &config.resources;

    let opts = ResourceOptions {
        resources_root: args
            .resources_root
            .or_else(|| defaults.resources_root.clone())
            .context("missing --resources-root (or [resources] resources_root in Stagekit.toml)")?,
        staging: args
            .staging
            .or_else(|| defaults.staging.clone())
            .context("missing --staging (or [resources] staging in Stagekit.toml)")?,
        keep_going: args.keep_going,
    };

    // Resolve the converter up front so a missing tool aborts before the
    // staging directory is touched.
    let converter = Plutil::with_program(&args.plutil)?;

    let report = normalize(&opts, &converter).context("resource normalization failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        eprintln!(
            "     Normalized {} bundle(s) ({} string table(s)) into {}",
            report.bundles.len(),
            report.converted.len(),
            opts.staging.display()
        );
        for failure in &report.failed {
            eprintln!("         Failed {failure}");
        }
    }

    Ok(())
}
