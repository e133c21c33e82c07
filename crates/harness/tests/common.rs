#![allow(dead_code)]

use harness::{EnvConfig, SaberEnv};
use input::{RecordingDevice, Rig};
use mission::{FrameType, MissionSpec, RecordingClock, ScriptedSim, VideoFrame, WorldState};

pub type TestRig = Rig<ScriptedSim, RecordingDevice, RecordingClock>;
pub type TestEnv = SaberEnv<ScriptedSim, RecordingDevice, RecordingClock>;

pub const VIDEO_W: usize = 8;
pub const VIDEO_H: usize = 6;
pub const OBS_W: usize = 4;
pub const OBS_H: usize = 2;

pub fn config(max_episode_steps: u32) -> EnvConfig {
    EnvConfig {
        obs_width: OBS_W,
        obs_height: OBS_H,
        max_episode_steps,
        mission: MissionSpec {
            video_width: VIDEO_W,
            video_height: VIDEO_H,
            ..MissionSpec::default()
        },
        ..EnvConfig::default()
    }
}

pub fn rig(sim: ScriptedSim) -> TestRig {
    Rig::new(sim, RecordingDevice::default(), RecordingClock::default())
}

pub fn env(sim: ScriptedSim, max_episode_steps: u32) -> TestEnv {
    SaberEnv::new(config(max_episode_steps), rig(sim)).unwrap()
}

/// Colour frame whose every byte is `fill`.
pub fn colour_frame(fill: u8) -> VideoFrame {
    VideoFrame::new(VIDEO_W, VIDEO_H, FrameType::ColourMap, vec![fill; VIDEO_W * VIDEO_H * 3])
}

/// Running mission that has just delivered one colour frame.
pub fn framed(fill: u8) -> WorldState {
    WorldState::running().with_frame(colour_frame(fill))
}

/// Mission accepted by the host but not begun yet.
pub fn pending() -> WorldState {
    WorldState { is_mission_running: false, has_mission_begun: false, ..WorldState::default() }
}
