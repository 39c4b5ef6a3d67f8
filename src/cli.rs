//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::config::{InputSyntax, OutputStyle};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sassbuild batch compiler CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: sassbuild.toml)
    #[arg(short = 'C', long, default_value = "sassbuild.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Build arguments, overriding `sassbuild.toml` values
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Source root scanned for sass/scss files (relative to project root)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output root for compiled css (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output root for source map files (defaults to the css output root)
    #[arg(long = "source-map-output")]
    pub source_map_output: Option<PathBuf>,

    /// Input syntax of the scanned files
    #[arg(short, long)]
    pub syntax: Option<InputSyntax>,

    /// Output style for the generated css
    #[arg(long)]
    pub style: Option<OutputStyle>,

    /// Precision for fractional numbers
    #[arg(short, long)]
    pub precision: Option<u8>,

    /// generate source map files
    #[arg(long = "source-map", action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub source_map: Option<bool>,

    /// fail the run when any file fails to compile
    #[arg(long = "fail-on-error", action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub fail_on_error: Option<bool>,

    /// copy raw source files into the output tree before compiling
    #[arg(long = "copy-source", action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub copy_source: Option<bool>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile every sass/scss file under the input root
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },
}

impl Cli {
    /// Build arguments of the current invocation.
    pub const fn build_args(&self) -> &BuildArgs {
        match &self.command {
            Commands::Build { build_args } => build_args,
        }
    }
}
