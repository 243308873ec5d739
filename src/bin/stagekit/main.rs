//! Stagekit CLI - packaging preparation for distributable libraries

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use stagekit::core::config::{ProjectConfig, CONFIG_FILE_NAME};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("stagekit=debug")
    } else {
        EnvFilter::new("stagekit=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Load project configuration; an explicitly given path must load,
    // the conventional one is optional.
    let config = match &cli.config {
        Some(path) => ProjectConfig::load(path)?,
        None => ProjectConfig::load_or_default(Path::new(CONFIG_FILE_NAME)),
    };

    // Execute command
    match cli.command {
        Commands::Headers(args) => commands::headers::execute(args, &config),
        Commands::Resources(args) => commands::resources::execute(args, &config),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
