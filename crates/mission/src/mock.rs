//! Scripted doubles for the mission host, used by tests across the workspace.

use std::collections::VecDeque;
use std::time::Duration;

use crate::{Clock, MissionError, MissionSpec, Simulation, WorldState};

/// Replays a fixed sequence of world states.
///
/// Once the script runs out every poll returns the fallback state, which is
/// an ended mission unless [`ScriptedSim::otherwise`] says differently.
#[derive(Debug, Clone)]
pub struct ScriptedSim {
    script: VecDeque<WorldState>,
    fallback: WorldState,
    start_failures: u32,
    pub start_attempts: u32,
    pub commands: Vec<String>,
    pub polls: usize,
}

impl Default for ScriptedSim {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedSim {
    #[must_use]
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            fallback: WorldState::ended(),
            start_failures: 0,
            start_attempts: 0,
            commands: Vec::new(),
            polls: 0,
        }
    }

    /// Refuse the first `n` start requests.
    #[must_use]
    pub fn failing_starts(mut self, n: u32) -> Self {
        self.start_failures = n;
        self
    }

    #[must_use]
    pub fn then(mut self, state: WorldState) -> Self {
        self.script.push_back(state);
        self
    }

    #[must_use]
    pub fn then_repeat(mut self, times: usize, state: &WorldState) -> Self {
        self.script.extend(std::iter::repeat(state).take(times).cloned());
        self
    }

    #[must_use]
    pub fn otherwise(mut self, state: WorldState) -> Self {
        self.fallback = state;
        self
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Simulation for ScriptedSim {
    fn start_mission(&mut self, _spec: &MissionSpec) -> Result<(), MissionError> {
        self.start_attempts += 1;
        if self.start_attempts <= self.start_failures {
            return Err(MissionError::StartRejected(format!(
                "attempt {} refused by scripted host",
                self.start_attempts
            )));
        }
        Ok(())
    }

    fn send_command(&mut self, command: &str) {
        self.commands.push(command.to_string());
    }

    fn world_state(&mut self) -> WorldState {
        self.polls += 1;
        self.script.pop_front().unwrap_or_else(|| self.fallback.clone())
    }
}

/// Records requested sleeps instead of blocking.
#[derive(Debug, Default, Clone)]
pub struct RecordingClock {
    pub sleeps: Vec<Duration>,
}

impl RecordingClock {
    #[must_use]
    pub fn count(&self, duration: Duration) -> usize {
        self.sleeps.iter().filter(|&&d| d == duration).count()
    }
}

impl Clock for RecordingClock {
    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }
}
