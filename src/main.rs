//! Sassbuild - batch sass/scss build orchestrator.

mod build;
mod cli;
mod config;
mod engine;
mod logger;
mod paths;
mod utils;
mod walker;
mod writer;

use anyhow::Result;
use build::build_tree;
use clap::Parser;
use cli::{Cli, Commands};
use config::SassConfig;
use engine::SasscEngine;
use std::path::Path;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SassConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Build { .. } => {
            let engine = SasscEngine::from_config(config);
            build_tree(config, &engine).map(|_| ())
        }
    }
}

/// Load configuration from the config file (when present) and merge CLI
/// overrides on top. A missing config file means defaults apply.
fn load_config(cli: &'static Cli) -> Result<SassConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SassConfig::from_path(&config_path)?
    } else {
        SassConfig::default()
    };
    config.update_with_cli(cli);

    Ok(config)
}
