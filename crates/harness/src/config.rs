use std::path::Path;

use mission::MissionSpec;
use serde::{Deserialize, Serialize};

use crate::reward::RewardTable;
use crate::EnvError;

/// Everything the environment needs besides its rig. Every field has a
/// default, so a config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub obs_width: usize,
    pub obs_height: usize,
    pub max_episode_steps: u32,
    /// Log smoothed returns every this many episodes.
    pub log_frequency: usize,
    pub reward: RewardTable,
    pub mission: MissionSpec,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            obs_width: 396,
            obs_height: 314,
            max_episode_steps: 100,
            log_frequency: 10,
            reward: RewardTable::default(),
            mission: MissionSpec::default(),
        }
    }
}

impl EnvConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// [`EnvError::Parse`] for malformed JSON, [`EnvError::Config`] for values
    /// rejected by [`EnvConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, EnvError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Same as [`EnvConfig::from_json`], plus [`EnvError::Io`] if the file
    /// cannot be read.
    pub fn load(path: &Path) -> Result<Self, EnvError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// # Errors
    ///
    /// [`EnvError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), EnvError> {
        let m = &self.mission;
        if self.obs_width == 0 || self.obs_height == 0 {
            return Err(EnvError::Config("observation size must be non-zero".into()));
        }
        if self.obs_width > m.video_width || self.obs_height > m.video_height {
            return Err(EnvError::Config(format!(
                "observation {}x{} larger than video {}x{}",
                self.obs_width, self.obs_height, m.video_width, m.video_height
            )));
        }
        if m.start_retries == 0 {
            return Err(EnvError::Config("mission.start_retries must be at least 1".into()));
        }
        if self.log_frequency == 0 {
            return Err(EnvError::Config("log_frequency must be at least 1".into()));
        }
        Ok(())
    }

    #[must_use]
    pub fn observation_len(&self) -> usize {
        self.obs_width * self.obs_height * 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config = EnvConfig::from_json("{}").unwrap();
        assert_eq!(config, EnvConfig::default());
        assert_eq!(config.observation_len(), 396 * 314 * 3);
    }

    #[test]
    fn nested_overrides() {
        let config = EnvConfig::from_json(
            r#"{
                "max_episode_steps": 20,
                "reward": { "hit": 5.0 },
                "mission": { "video_width": 640, "video_height": 360, "retry_backoff_ms": 10 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.max_episode_steps, 20);
        assert_eq!(config.reward.hit, 5.0);
        assert_eq!(config.reward.light_blue_code, 55.0);
        assert_eq!(config.mission.video_width, 640);
        assert_eq!(config.mission.experiment_id, "NoobSaber");
    }

    #[test]
    fn observation_must_fit_video() {
        let err = EnvConfig::from_json(r#"{ "obs_width": 1000 }"#).unwrap_err();
        assert!(matches!(err, EnvError::Config(_)), "got {err:?}");
    }

    #[test]
    fn zero_retries_rejected() {
        let err = EnvConfig::from_json(r#"{ "mission": { "start_retries": 0 } }"#).unwrap_err();
        assert!(matches!(err, EnvError::Config(_)));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(EnvConfig::from_json("{ nope"), Err(EnvError::Parse(_))));
    }
}
