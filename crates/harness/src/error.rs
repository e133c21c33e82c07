use mission::MissionError;
use thiserror::Error;
use vision::VisionError;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("action index {index} out of range (action count {count})")]
    InvalidAction { index: usize, count: usize },
    #[error("step called before the first reset")]
    NotStarted,
    #[error(transparent)]
    Mission(#[from] MissionError),
    #[error(transparent)]
    Vision(#[from] VisionError),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl EnvError {
    /// True when the mission host could not be started at all.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, EnvError::Mission(err) if err.is_fatal())
    }
}
