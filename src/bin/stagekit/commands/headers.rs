//! `stagekit headers` command

use anyhow::{Context, Result};

use crate::cli::HeadersArgs;
use stagekit::core::config::ProjectConfig;
use stagekit::ops::headers::{materialize, HeaderOptions};
use stagekit::PlacementPolicy;

pub fn execute(args: HeadersArgs, config: &ProjectConfig) -> Result<()> {
    let defaults = &config.headers;

    let opts = HeaderOptions {
        source_root: args
            .source_root
            .or_else(|| defaults.source_root.clone())
            .context("missing --source-root (or [headers] source_root in Stagekit.toml)")?,
        manifest: args
            .manifest
            .or_else(|| defaults.manifest.clone())
            .context("missing --manifest (or [headers] manifest in Stagekit.toml)")?,
        prefix: args.prefix.or_else(|| defaults.prefix.clone()),
        staging: args
            .staging
            .or_else(|| defaults.staging.clone())
            .context("missing --staging (or [headers] staging in Stagekit.toml)")?,
        policy: args
            .policy
            .or(defaults.policy)
            .unwrap_or(PlacementPolicy::Copy),
        namespace: args
            .namespace
            .or_else(|| defaults.namespace.clone())
            .context("missing --namespace (or [headers] namespace in Stagekit.toml)")?,
        umbrella: args.umbrella.or_else(|| defaults.umbrella.clone()),
        allow_unmatched: args.allow_unmatched,
    };

    let report = materialize(&opts).context("header materialization failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        eprintln!(
            "   Materialized {} header(s) into {}",
            report.placed.len(),
            opts.staging.display()
        );
        for name in &report.unmatched {
            eprintln!("        Skipped {name} (no match in source tree)");
        }
    }

    Ok(())
}
