//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//!
//! Non-responsibilities:
//! - Does not load or render configuration (see `main`).

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "envmode")]
#[command(about = "Inspect the merged configuration for a deployment mode", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envmode ./config\n  envmode --mode test ./config\n  envmode --output json ./config-common ./config\n  APP_ENV=stage envmode ./config\n"
)]
pub struct Cli {
    /// Configuration directories, in precedence order (later directories
    /// override earlier ones)
    #[arg(required = true, value_name = "CONFIG_DIR")]
    pub config_dirs: Vec<PathBuf>,

    /// Deployment mode (dev, test, stage, prod); defaults to $APP_ENV,
    /// then prod
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Output format for the merged configuration
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}
