use std::collections::BTreeMap;

use vision::Observation;

use crate::EnvError;

/// Auxiliary per-step diagnostics. Currently always empty.
pub type Info = BTreeMap<String, serde_json::Value>;

/// Result of one [`Env::step`].
#[derive(Debug, Clone)]
pub struct Step {
    pub observation: Observation,
    pub reward: f64,
    pub done: bool,
    pub info: Info,
}

/// Reinforcement learning environment trait.
///
/// The Gym-style contract an external trainer drives: [`reset`] starts an
/// episode and returns its first observation, [`step`] applies the action with
/// the given index and reports what happened.
///
/// [`reset`]: Env::reset
/// [`step`]: Env::step
pub trait Env {
    /// Advance the environment by one action.
    ///
    /// # Errors
    ///
    /// [`EnvError::InvalidAction`] when `action >= action_size()`.
    fn step(&mut self, action: usize) -> Result<Step, EnvError>;

    /// Start a new episode and return its initial observation.
    ///
    /// # Errors
    ///
    /// Fails when no episode can be started at all.
    fn reset(&mut self) -> Result<Observation, EnvError>;

    /// Length of every observation vector.
    fn obs_size(&self) -> usize;

    /// Number of discrete actions.
    fn action_size(&self) -> usize;
}
