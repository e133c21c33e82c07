//! # Saber
//!
//! Entry point for the headless NoobSaber runner. Loads the environment
//! configuration, installs the log subscriber and hands over to [`app::run`].
//! A mission that cannot be started ends the process with a non-zero status.

mod app;
mod device;
mod synthetic;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use harness::{EnvConfig, EnvError};
use mission::SystemClock;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "saber", about = "Run NoobSaber episodes against a synthetic mission host")]
struct Args {
    /// JSON environment configuration; defaults apply to missing fields.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Scenario document forwarded to the mission host.
    #[arg(long)]
    scenario: Option<PathBuf>,
    #[arg(long, default_value_t = 3)]
    episodes: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Where to write the `steps<TAB>return` history.
    #[arg(long, default_value = "returns.tsv")]
    history: PathBuf,
    /// Directory for PNG dumps of each episode's first observation.
    #[arg(long)]
    dump_frames: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let options = load_options(args)?;

    if let Err(err) = app::run(&options, SystemClock) {
        if err.chain().any(|cause| cause.downcast_ref::<EnvError>().is_some_and(EnvError::is_fatal)) {
            tracing::error!("fatal: {err:#}");
            std::process::exit(1);
        }
        return Err(err);
    }
    Ok(())
}

fn load_options(args: Args) -> Result<app::RunOptions> {
    let mut config = match &args.config {
        Some(path) => EnvConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EnvConfig::default(),
    };
    if let Some(path) = &args.scenario {
        config.mission.scenario = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
    }

    Ok(app::RunOptions {
        config,
        episodes: args.episodes,
        seed: args.seed,
        history: Some(args.history),
        dump_frames: args.dump_frames,
    })
}
