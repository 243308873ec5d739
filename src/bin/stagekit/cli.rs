//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use stagekit::PlacementPolicy;

/// Stagekit - packaging preparation for distributable libraries
#[derive(Parser)]
#[command(name = "stagekit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project configuration file (defaults to Stagekit.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Materialize the public header bundle into a staging directory
    Headers(HeadersArgs),

    /// Normalize localized resources into a staging directory
    Resources(ResourcesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct HeadersArgs {
    /// Root of the source tree searched for public headers
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Public header manifest file (one filename per line)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Prefix header prepended verbatim to the umbrella header
    #[arg(long)]
    pub prefix: Option<PathBuf>,

    /// Staging directory (destructively recreated on every run)
    #[arg(long)]
    pub staging: Option<PathBuf>,

    /// How matched headers are placed into staging
    #[arg(long, value_enum)]
    pub policy: Option<PlacementPolicy>,

    /// Library namespace used in #import directives
    #[arg(long)]
    pub namespace: Option<String>,

    /// Umbrella header file name (defaults to <namespace>.h)
    #[arg(long)]
    pub umbrella: Option<String>,

    /// Warn instead of failing when a manifest entry has no match
    #[arg(long)]
    pub allow_unmatched: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ResourcesArgs {
    /// Root of the resources tree searched for .lproj bundles
    #[arg(long)]
    pub resources_root: Option<PathBuf>,

    /// Staging directory (destructively recreated on every run)
    #[arg(long)]
    pub staging: Option<PathBuf>,

    /// Property-list converter program
    #[arg(long, env = "STAGEKIT_PLUTIL", default_value = stagekit::plist::DEFAULT_PROGRAM)]
    pub plutil: String,

    /// Warn instead of failing when a string table fails to convert
    #[arg(long)]
    pub keep_going: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
