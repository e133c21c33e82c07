#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Mission Boundary
//!
//! The game simulation runs out of process. This crate describes how the rest
//! of the workspace talks to it: commands are fire-and-forget, and everything
//! the simulation produces (frames, reward events, errors, run state) is
//! collected by polling a [`WorldState`] snapshot.
//!
//! ## Key Components
//!
//! -   **[`Simulation`]:** the request/poll protocol. A production client wraps
//!     the real mission host; tests use the scripted doubles from the `mock`
//!     feature.
//! -   **[`MissionSpec`]:** the static mission configuration handed to the
//!     simulation on every start request.
//! -   **[`Poller`]:** the single cooperative polling loop used both while a
//!     mission is starting and while waiting for a fresh frame.
//! -   **[`Clock`]:** every wait goes through it so tests can run without
//!     sleeping and count the back-offs that were taken.

use thiserror::Error;

pub mod clock;
pub mod poll;
pub mod scenario;

#[cfg(feature = "mock")]
pub mod mock;

pub use clock::{Clock, SystemClock};
pub use poll::{OnError, Polled, Poller, POLL_INTERVAL};
pub use scenario::{ClientInfo, MissionSpec};

#[cfg(feature = "mock")]
pub use mock::{RecordingClock, ScriptedSim};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MissionError {
    /// One start request was refused. Usually transient (client still busy).
    #[error("mission start rejected: {0}")]
    StartRejected(String),
    /// Every start attempt failed. Nothing can continue after this.
    #[error("mission failed to start after {attempts} attempts: {last}")]
    StartExhausted { attempts: u32, last: String },
}

impl MissionError {
    /// Whether the process is expected to stop on this error.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, MissionError::StartExhausted { .. })
    }
}

/// Video channel a frame was produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameType {
    Video,
    DepthMap,
    LuminanceMap,
    ColourMap,
}

/// One captured frame. Pixels are row-major with `channels` bytes per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFrame {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub frame_type: FrameType,
    pub pixels: Vec<u8>,
}

impl VideoFrame {
    #[must_use]
    pub fn new(width: usize, height: usize, frame_type: FrameType, pixels: Vec<u8>) -> Self {
        Self { width, height, channels: 3, frame_type, pixels }
    }

    #[must_use]
    pub fn is_colour_map(&self) -> bool {
        self.frame_type == FrameType::ColourMap
    }
}

/// Snapshot returned by [`Simulation::world_state`].
///
/// Rewards, errors and frames are the ones accumulated since the previous
/// snapshot; fetching a new one drains them on the simulation side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldState {
    pub is_mission_running: bool,
    pub has_mission_begun: bool,
    pub errors: Vec<String>,
    pub rewards: Vec<f64>,
    pub video_frames: Vec<VideoFrame>,
    pub video_frames_since_last_state: usize,
}

impl WorldState {
    /// A running mission with nothing new to report.
    #[must_use]
    pub fn running() -> Self {
        Self { is_mission_running: true, has_mission_begun: true, ..Self::default() }
    }

    /// The mission is over (or never started).
    #[must_use]
    pub fn ended() -> Self {
        Self { is_mission_running: false, has_mission_begun: true, ..Self::default() }
    }

    #[must_use]
    pub fn with_frame(mut self, frame: VideoFrame) -> Self {
        self.video_frames.push(frame);
        self.video_frames_since_last_state += 1;
        self
    }

    #[must_use]
    pub fn with_reward(mut self, code: f64) -> Self {
        self.rewards.push(code);
        self
    }

    #[must_use]
    pub fn with_error(mut self, text: impl Into<String>) -> Self {
        self.errors.push(text.into());
        self
    }
}

/// Request/poll protocol spoken with the mission host.
pub trait Simulation {
    /// Ask the host to start a mission. Returns once the request is accepted;
    /// the mission itself begins asynchronously.
    ///
    /// # Errors
    ///
    /// Returns [`MissionError::StartRejected`] when the host refuses the request.
    fn start_mission(&mut self, spec: &MissionSpec) -> Result<(), MissionError>;

    /// Send a game command such as `attack 1` or `hotbar.2 1`. No acknowledgement.
    fn send_command(&mut self, command: &str);

    /// Fetch everything accumulated since the previous call.
    fn world_state(&mut self) -> WorldState;
}

impl<S: Simulation + ?Sized> Simulation for &mut S {
    fn start_mission(&mut self, spec: &MissionSpec) -> Result<(), MissionError> {
        (**self).start_mission(spec)
    }

    fn send_command(&mut self, command: &str) {
        (**self).send_command(command);
    }

    fn world_state(&mut self) -> WorldState {
        (**self).world_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_start_is_fatal() {
        let rejected = MissionError::StartRejected("busy".into());
        let exhausted = MissionError::StartExhausted { attempts: 3, last: "busy".into() };
        assert!(!rejected.is_fatal());
        assert!(exhausted.is_fatal());
        assert_eq!(
            exhausted.to_string(),
            "mission failed to start after 3 attempts: busy"
        );
    }

    #[test]
    fn builder_counts_frames() {
        let frame = VideoFrame::new(2, 1, FrameType::ColourMap, vec![0; 6]);
        let state = WorldState::running().with_frame(frame.clone()).with_frame(frame);
        assert_eq!(state.video_frames_since_last_state, 2);
        assert!(state.video_frames[0].is_colour_map());
    }
}
