//! Reward shaping.
//!
//! The mission reports raw codes: collecting light-blue wool yields one code,
//! yellow wool another. Whether a pickup was good depends on the pickaxe held
//! at the time (diamond for light blue, golden for yellow), which only the
//! harness knows. Every other code (time penalty ticks, mission end, touching
//! blocks) is already a reward and passes through.

use input::Pickaxe;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardTable {
    pub light_blue_code: f64,
    pub yellow_code: f64,
    /// Pickup with the matching pickaxe.
    pub hit: f64,
    /// Pickup with the wrong pickaxe.
    pub miss: f64,
}

impl Default for RewardTable {
    fn default() -> Self {
        Self { light_blue_code: 55.0, yellow_code: 66.0, hit: 10.0, miss: -1.0 }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RewardShaper {
    table: RewardTable,
}

impl RewardShaper {
    #[must_use]
    pub fn new(table: RewardTable) -> Self {
        Self { table }
    }

    // Codes are small integers sent verbatim by the host, exact comparison is intended.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn shape(&self, code: f64, pickaxe: Pickaxe) -> f64 {
        let t = &self.table;
        if code == t.light_blue_code {
            if pickaxe == Pickaxe::Diamond { t.hit } else { t.miss }
        } else if code == t.yellow_code {
            if pickaxe == Pickaxe::Diamond { t.miss } else { t.hit }
        } else {
            code
        }
    }

    /// Shaped sum over every event of one step. Zero when there were none.
    #[must_use]
    pub fn total(&self, codes: &[f64], pickaxe: Pickaxe) -> f64 {
        codes.iter().map(|&code| self.shape(code, pickaxe)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yellow_wants_golden() {
        let shaper = RewardShaper::default();
        assert_eq!(shaper.shape(66.0, Pickaxe::Golden), 10.0);
        assert_eq!(shaper.shape(66.0, Pickaxe::Diamond), -1.0);
    }

    #[test]
    fn custom_table_is_honoured() {
        let shaper = RewardShaper::new(RewardTable { hit: 3.0, miss: -3.0, ..RewardTable::default() });
        assert_eq!(shaper.shape(55.0, Pickaxe::Diamond), 3.0);
        assert_eq!(shaper.shape(55.0, Pickaxe::Golden), -3.0);
    }

    #[test]
    fn empty_step_is_zero() {
        assert_eq!(RewardShaper::default().total(&[], Pickaxe::Diamond), 0.0);
    }
}
