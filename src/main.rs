//! limebar — a lemonbar-style status bar.
//!
//! Run with:  `RUST_LOG=debug limebar -g x24 -B '#1a1a1a'`

use anyhow::{Context, Result};
use limebar_config::{BarConfig, ConfigError};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    // Structured logging on stderr — RUST_LOG controls verbosity (default: warn).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let program = std::env::args()
        .next()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    let config = match limebar_config::parse_env() {
        Ok(config) => config,
        Err(ConfigError::HelpRequested) => {
            print!("{}", limebar_config::usage(&program));
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            tracing::debug!(flag = ?e.flag(), "argument parsing failed");
            eprintln!("{program}: {e}");
            eprintln!("Try '{program} -h' for more information.");
            return Ok(ExitCode::from(2));
        }
    };

    tracing::info!(
        "limebar v{} starting as '{}' on {}",
        env!("CARGO_PKG_VERSION"),
        config.effective_window_name(),
        describe_outputs(&config),
    );

    // Hand the resolved configuration to whatever draws the bar.
    let rendered = toml::to_string(&config).context("serialising configuration")?;
    print!("{rendered}");

    Ok(ExitCode::SUCCESS)
}

fn describe_outputs(config: &BarConfig) -> String {
    if config.all_outputs() {
        "all outputs".to_string()
    } else {
        config.outputs.join(", ")
    }
}
