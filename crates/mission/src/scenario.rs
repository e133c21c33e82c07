//! Static mission configuration.
//!
//! The scenario document itself (world layout, reward handlers, quit
//! conditions) is opaque to the harness and forwarded verbatim to the host.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientInfo {
    pub address: String,
    pub port: u16,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self { address: "127.0.0.1".to_string(), port: 10000 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionSpec {
    /// Scenario document sent with every start request.
    pub scenario: String,
    pub client: ClientInfo,
    pub experiment_id: String,
    pub video_width: usize,
    pub video_height: usize,
    pub start_retries: u32,
    pub retry_backoff_ms: u64,
}

impl Default for MissionSpec {
    fn default() -> Self {
        Self {
            scenario: String::new(),
            client: ClientInfo::default(),
            experiment_id: "NoobSaber".to_string(),
            video_width: 960,
            video_height: 540,
            start_retries: 3,
            retry_backoff_ms: 2000,
        }
    }
}

impl MissionSpec {
    #[must_use]
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    #[must_use]
    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = scenario.into();
        self
    }
}
