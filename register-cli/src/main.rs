use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, warn};

use register_cli::config::RegisterConfig;
use register_cli::{app, logging, script};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Conference registration form, driven headlessly.
///
/// Loads the form catalog, replays a CSV event script against it and prints
/// the resulting page and every submission outcome. Exits with a failure
/// status when the last submission was cancelled.
#[derive(Debug, Parser)]
#[command(name = "register", version, about)]
struct Cli {
    /// TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Event script (CSV with columns event,target,value).
    #[arg(long)]
    script: PathBuf,

    /// Log filter, e.g. `debug` or `info,register_core=trace`.
    /// Overrides the config file and RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Suppress log output on stdout.
    #[arg(short, long)]
    quiet: bool,

    /// Print the page after every event, not just at the end.
    #[arg(long)]
    snapshot_each: bool,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
    logging::init("info");

    let cli = Cli::parse();

    let config = RegisterConfig::load_or_default(cli.config.as_deref())?;
    let overrides = logging::LogOverrides {
        level: cli.log_level.clone(),
        file: cli.log_file.clone(),
        quiet: cli.quiet,
    };
    logging::apply(&config.logging, &overrides)?;
    debug!(?config, "configuration loaded");

    let definition = app::build_definition(&config.catalog)?;
    let events = script::load(&cli.script)
        .with_context(|| format!("Failed to read script: {}", cli.script.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let replay = app::replay(definition, &events, cli.snapshot_each, &mut out)?;
    out.flush()?;

    if replay.last_submission_cancelled() {
        warn!("last submission was cancelled");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
