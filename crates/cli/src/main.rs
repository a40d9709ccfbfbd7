//! envmode - inspect mode-driven layered configuration.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Resolve the deployment mode and assemble the merged configuration via
//!   the shared config library.
//! - Render the result to stdout as YAML or JSON.
//!
//! Does NOT handle:
//! - Merge semantics or source loading (see `crates/config`).
//!
//! Invariants:
//! - `.env` is loaded BEFORE mode resolution so `APP_ENV` can come from a
//!   dotenv file; `DOTENV_DISABLED=1` skips it (useful for testing).
//! - Any loading error exits non-zero with a diagnostic on stderr; nothing
//!   partial is ever printed.

mod args;

use anyhow::Context;
use args::{Cli, OutputFormat};
use clap::Parser;
use envmode_config::Environment;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    load_dotenv();

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let environment = Environment::new(&cli.config_dirs, cli.mode.as_deref())?;
    tracing::debug!(mode = %environment.mode(), "configuration loaded");

    let rendered = match cli.output {
        OutputFormat::Yaml => serde_yaml::to_string(&environment.config().to_yaml())
            .context("failed to render configuration as YAML")?,
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(&environment.config().to_json())
                .context("failed to render configuration as JSON")?;
            text.push('\n');
            text
        }
    };
    print!("{rendered}");
    Ok(())
}

/// Load environment variables from a `.env` file if present, unless
/// `DOTENV_DISABLED` is set to "true" or "1".
fn load_dotenv() {
    let disabled = matches!(
        std::env::var("DOTENV_DISABLED").ok().as_deref(),
        Some("true") | Some("1")
    );
    if !disabled {
        dotenvy::dotenv().ok();
    }
}
