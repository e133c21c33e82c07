//! # Saber Runner
//!
//! Drives the NoobSaber environment headless: a [`SyntheticSim`] plays the
//! mission host, a [`TracingDevice`] stands in for the pointer, and a seeded
//! uniform random policy picks the actions. This is the loop an external
//! trainer would run, minus the learning.
//!
//! After the run the episode history is written as `steps<TAB>return` lines,
//! and with `--dump-frames` the first observation of every episode is saved
//! as a PNG for checking the crop.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use harness::{Env, EnvConfig, SaberEnv};
use input::{Action, Pickaxe, Rig};
use mission::Clock;
use serde::Serialize;
use tracing::info;

use crate::device::TracingDevice;
use crate::synthetic::SyntheticSim;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: EnvConfig,
    pub episodes: usize,
    pub seed: u64,
    pub history: Option<PathBuf>,
    pub dump_frames: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionCount {
    pub action: Action,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EpisodeSummary {
    pub episode: usize,
    pub steps: u32,
    pub episode_return: f64,
    pub final_pickaxe: Pickaxe,
    pub actions: Vec<ActionCount>,
    /// Where the emulated pointer ended up, relative to where the run began.
    pub pointer: (i64, i64),
}

/// Run `options.episodes` episodes with a random policy.
///
/// # Errors
///
/// Fails on an invalid configuration, when a mission cannot be started (the
/// caller should treat this as fatal), or on I/O errors writing outputs.
pub fn run<C: Clock>(options: &RunOptions, clock: C) -> Result<Vec<EpisodeSummary>> {
    // one extra command for the trigger hit in the start pose
    let sim = SyntheticSim::new(options.config.max_episode_steps + 1, options.seed);
    let rig = Rig::new(sim, TracingDevice::default(), clock);
    let mut env = SaberEnv::new(options.config.clone(), rig)
        .context("invalid environment configuration")?;
    let mut rng = fastrand::Rng::with_seed(options.seed);

    if let Some(dir) = &options.dump_frames {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create frame dump directory {}", dir.display()))?;
    }

    info!(
        "running {} episodes, observation {} values, {} actions",
        options.episodes,
        env.obs_size(),
        env.action_size()
    );

    let mut summaries = Vec::with_capacity(options.episodes);
    for episode in 0..options.episodes {
        let observation = env
            .reset()
            .with_context(|| format!("failed to start episode {episode}"))?;

        if let Some(dir) = &options.dump_frames {
            let path = dir.join(format!("episode-{episode:04}.png"));
            observation
                .save_png(&path)
                .with_context(|| format!("failed to dump frame to {}", path.display()))?;
        }

        let mut counts = [0u32; Action::COUNT];
        loop {
            let index = rng.usize(..env.action_size());
            let step = env.step(index)?;
            if step.done {
                break;
            }
            counts[index] += 1;
        }

        let summary = EpisodeSummary {
            episode,
            steps: env.episode().step_count,
            episode_return: env.episode().cumulative_return,
            final_pickaxe: env.episode().pickaxe,
            actions: Action::ALL
                .iter()
                .map(|&action| ActionCount { action, count: counts[action.index()] })
                .collect(),
            pointer: env.rig().device.position(),
        };
        info!("{}", serde_json::to_string(&summary)?);
        summaries.push(summary);
    }

    if let Some(path) = &options.history {
        let file = File::create(path)
            .with_context(|| format!("failed to create history file {}", path.display()))?;
        env.history().write_tsv(BufWriter::new(file))?;
        info!("wrote {} history entries to {}", env.history().len(), path.display());
    }

    Ok(summaries)
}
