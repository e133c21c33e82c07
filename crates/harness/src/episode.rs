use std::io::{self, Write};

use input::Pickaxe;
use serde::Serialize;

/// Counters of the episode in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Episode {
    pub step_count: u32,
    pub cumulative_return: f64,
    pub pickaxe: Pickaxe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No mission started yet.
    Idle,
    Running,
    /// Step cap reached or mission ended; waiting for the next reset.
    Done,
}

/// One finished episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// Steps taken across all episodes up to and including this one.
    pub steps: u64,
    pub episode_return: f64,
}

/// Append-only record of finished episodes, kept for logging.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, episode: &Episode) -> HistoryEntry {
        let entry = HistoryEntry {
            steps: self.total_steps() + u64::from(episode.step_count),
            episode_return: episode.cumulative_return,
        };
        self.entries.push(entry);
        entry
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn total_steps(&self) -> u64 {
        self.entries.last().map_or(0, |e| e.steps)
    }

    /// Trailing box average of episode returns, one value per entry.
    ///
    /// The first `window - 1` values average over the shorter prefix.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn moving_average(&self, window: usize) -> Vec<f64> {
        let window = window.max(1);
        let returns: Vec<f64> = self.entries.iter().map(|e| e.episode_return).collect();
        (0..returns.len())
            .map(|i| {
                let lo = (i + 1).saturating_sub(window);
                let slice = &returns[lo..=i];
                slice.iter().sum::<f64>() / slice.len() as f64
            })
            .collect()
    }

    /// `steps<TAB>return` per line.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    pub fn write_tsv<W: Write>(&self, mut out: W) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(out, "{}\t{}", entry.steps, entry.episode_return)?;
        }
        out.flush()
    }
}
