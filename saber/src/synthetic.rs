//! # Synthetic Mission Host
//!
//! A stand-in for the real mission host so the environment can be exercised
//! headless. It follows the same request/poll protocol: a start request is
//! accepted immediately, the mission begins a few polls later, and from then
//! on every poll carries one colour frame plus whatever rewards accumulated.
//!
//! Rewards mimic the scenario: a small time penalty per poll, and attacks may
//! collect light-blue or yellow wool, reported with the raw pickup codes. The
//! mission quits once the avatar has issued its command quota.

use std::collections::VecDeque;

use mission::{FrameType, MissionError, MissionSpec, Simulation, VideoFrame, WorldState};
use tracing::{debug, trace};

const TIME_PENALTY: f64 = -0.1;
const LIGHT_BLUE_CODE: f64 = 55.0;
const YELLOW_CODE: f64 = 66.0;
/// Polls between an accepted start request and the mission beginning.
const BEGIN_DELAY: u32 = 3;

pub struct SyntheticSim {
    rng: fastrand::Rng,
    width: usize,
    height: usize,
    command_quota: u32,
    commands_left: u32,
    begin_in: u32,
    started: bool,
    running: bool,
    tick: usize,
    pending: VecDeque<f64>,
}

impl SyntheticSim {
    /// `command_quota` commands end the mission, including the one the start
    /// pose spends on the trigger.
    #[must_use]
    pub fn new(command_quota: u32, seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            width: 0,
            height: 0,
            command_quota,
            commands_left: 0,
            begin_in: 0,
            started: false,
            running: false,
            tick: 0,
            pending: VecDeque::new(),
        }
    }

    fn frame(&self) -> VideoFrame {
        let mut pixels = Vec::with_capacity(self.width * self.height * 3);
        for y in 0..self.height {
            for x in 0..self.width {
                pixels.extend_from_slice(&[
                    ((x + self.tick) % 256) as u8,
                    (y % 256) as u8,
                    (((x + y) / 4) % 256) as u8,
                ]);
            }
        }
        VideoFrame::new(self.width, self.height, FrameType::ColourMap, pixels)
    }

    fn strike(&mut self) {
        if self.rng.bool() {
            let code = if self.rng.bool() { LIGHT_BLUE_CODE } else { YELLOW_CODE };
            self.pending.push_back(code);
        }
    }
}

impl Simulation for SyntheticSim {
    fn start_mission(&mut self, spec: &MissionSpec) -> Result<(), MissionError> {
        if spec.video_width == 0 || spec.video_height == 0 {
            return Err(MissionError::StartRejected("video size must be non-zero".into()));
        }
        self.width = spec.video_width;
        self.height = spec.video_height;
        self.commands_left = self.command_quota;
        self.begin_in = BEGIN_DELAY;
        self.started = true;
        self.running = false;
        self.tick = 0;
        self.pending.clear();
        debug!("synthetic mission '{}' accepted", spec.experiment_id);
        Ok(())
    }

    fn send_command(&mut self, command: &str) {
        if !self.running {
            return;
        }
        trace!("synthetic host got '{command}'");
        if command.starts_with("attack") {
            self.strike();
        }
        self.commands_left = self.commands_left.saturating_sub(1);
        if self.commands_left == 0 {
            debug!("command quota reached, mission ends");
            self.running = false;
            self.pending.push_back(0.0);
        }
    }

    fn world_state(&mut self) -> WorldState {
        if !self.started {
            return WorldState::default();
        }
        if self.begin_in > 0 {
            self.begin_in -= 1;
            if self.begin_in == 0 {
                self.running = true;
            }
            return WorldState {
                is_mission_running: self.running,
                has_mission_begun: self.running,
                ..WorldState::default()
            };
        }

        let mut state = WorldState {
            is_mission_running: self.running,
            has_mission_begun: true,
            rewards: self.pending.drain(..).collect(),
            ..WorldState::default()
        };
        if self.running {
            self.tick += 1;
            state.rewards.push(TIME_PENALTY);
            state = state.with_frame(self.frame());
        } else {
            self.started = false;
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> MissionSpec {
        MissionSpec { video_width: 16, video_height: 8, ..MissionSpec::default() }
    }

    #[test]
    fn mission_begins_after_delay() {
        let mut sim = SyntheticSim::new(10, 1);
        assert!(!sim.world_state().has_mission_begun);
        sim.start_mission(&spec()).unwrap();

        let begun: Vec<bool> = (0..BEGIN_DELAY).map(|_| sim.world_state().has_mission_begun).collect();
        assert_eq!(begun, vec![false, false, true]);

        let state = sim.world_state();
        assert!(state.is_mission_running);
        assert_eq!(state.video_frames_since_last_state, 1);
        assert_eq!(state.video_frames[0].pixels.len(), 16 * 8 * 3);
        assert_eq!(state.rewards, vec![TIME_PENALTY]);
    }

    #[test]
    fn quota_ends_mission() {
        let mut sim = SyntheticSim::new(2, 7);
        sim.start_mission(&spec()).unwrap();
        while !sim.world_state().is_mission_running {}

        sim.send_command("hotbar.2 1");
        assert!(sim.world_state().is_mission_running);
        sim.send_command("hotbar.1 1");

        let last = sim.world_state();
        assert!(!last.is_mission_running);
        assert!(last.video_frames.is_empty());
        assert_eq!(last.rewards, vec![0.0]);
    }

    #[test]
    fn rejects_empty_video() {
        let mut sim = SyntheticSim::new(2, 7);
        let spec = MissionSpec { video_width: 0, ..MissionSpec::default() };
        assert!(sim.start_mission(&spec).is_err());
    }
}
