//! # Environment Adapter
//!
//! [`SaberEnv`] is the bridge between the asynchronous mission host and the
//! synchronous [`Env`] contract. It owns the [`Rig`] and the episode counters
//! and runs one step as:
//!
//! 1. fetch the world state and decide `done` (step cap or mission over);
//! 2. if not done, inject the action between two command-channel commits and
//!    let it settle;
//! 3. poll until a fresh colour frame arrives, the mission stops, or the host
//!    reports an error;
//! 4. crop the frame (or use the zero sentinel) and shape every reward event
//!    seen since the previous poll.

use std::time::Duration;

use input::{Action, InputDevice, InputEmulator, Key, Rig};
use mission::{Clock, Poller, Simulation, WorldState};
use tracing::{debug, info, warn};
use vision::{first_colour_frame, FrameResizer, Observation};

use crate::env::{Env, Info, Step};
use crate::episode::{Episode, History, Phase};
use crate::lifecycle::MissionLauncher;
use crate::reward::RewardShaper;
use crate::{EnvConfig, EnvError};

/// Wait after an action before looking for its effect.
pub const SETTLE_DELAY: Duration = Duration::from_millis(50);

pub struct SaberEnv<S, D, C> {
    rig: Rig<S, D, C>,
    config: EnvConfig,
    launcher: MissionLauncher,
    emulator: InputEmulator,
    shaper: RewardShaper,
    resizer: FrameResizer,
    poller: Poller,
    episode: Episode,
    history: History,
    phase: Phase,
}

impl<S, D, C> SaberEnv<S, D, C>
where
    S: Simulation,
    D: InputDevice,
    C: Clock,
{
    /// # Errors
    ///
    /// [`EnvError::Config`] if `config` does not validate.
    pub fn new(config: EnvConfig, rig: Rig<S, D, C>) -> Result<Self, EnvError> {
        config.validate()?;
        Ok(Self {
            rig,
            launcher: MissionLauncher::new(),
            emulator: InputEmulator::new(),
            shaper: RewardShaper::new(config.reward),
            resizer: FrameResizer::new(config.obs_width, config.obs_height),
            poller: Poller::steady(),
            episode: Episode::default(),
            history: History::new(),
            phase: Phase::Idle,
            config,
        })
    }

    #[must_use]
    pub fn episode(&self) -> &Episode {
        &self.episode
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn rig(&self) -> &Rig<S, D, C> {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut Rig<S, D, C> {
        &mut self.rig
    }

    /// Start a fresh mission and return its first observation.
    ///
    /// The episode that was running (if any) is folded into the history first.
    ///
    /// # Errors
    ///
    /// [`EnvError::Mission`] when the mission could not be started; this is
    /// fatal, see [`EnvError::is_fatal`].
    pub fn reset(&mut self) -> Result<Observation, EnvError> {
        let state = self.launcher.start_episode(&mut self.rig, &self.config.mission)?;

        let finished = self.history.record(&self.episode);
        if self.phase != Phase::Idle {
            info!(
                "episode {} finished: {} steps, return {}",
                self.history.len() - 1,
                self.episode.step_count,
                finished.episode_return
            );
        }
        self.episode = Episode::default();
        self.phase = Phase::Running;
        self.log_returns();

        let (observation, _) = self.capture(state);
        observation
    }

    /// Apply the action at `index` and report the outcome.
    ///
    /// Once the step cap is reached or the mission has stopped, the action is
    /// skipped and `done` is set; the observation and reward are still
    /// collected.
    ///
    /// # Errors
    ///
    /// [`EnvError::InvalidAction`] for an index outside the action set,
    /// [`EnvError::NotStarted`] before the first [`SaberEnv::reset`].
    pub fn step(&mut self, index: usize) -> Result<Step, EnvError> {
        let action = Action::from_index(index)
            .ok_or(EnvError::InvalidAction { index, count: Action::COUNT })?;
        if self.phase == Phase::Idle {
            return Err(EnvError::NotStarted);
        }

        let mut state = self.rig.sim.world_state();
        let done = self.episode.step_count >= self.config.max_episode_steps
            || !state.is_mission_running;

        if !done {
            self.rig.device.press(Key::Enter);
            self.episode.pickaxe = self.emulator.apply(action, self.episode.pickaxe, &mut self.rig);
            self.rig.pause(SETTLE_DELAY);
            self.episode.step_count += 1;
            self.rig.device.press(Key::Enter);
        }

        let mut codes = std::mem::take(&mut state.rewards);
        for text in &state.errors {
            warn!("mission error: {text}");
        }
        let (observation, polled) = self.capture(state);
        codes.extend(polled);

        // rewards are booked before a crop error surfaces
        let reward = self.shaper.total(&codes, self.episode.pickaxe);
        self.episode.cumulative_return += reward;
        debug!(
            "step {} action {action}: reward {reward} from {} events, return {}",
            self.episode.step_count,
            codes.len(),
            self.episode.cumulative_return
        );

        if done {
            self.phase = Phase::Done;
            info!("episode done, return {}", self.episode.cumulative_return);
        }

        Ok(Step { observation: observation?, reward, done, info: Info::new() })
    }

    /// Poll for the next colour frame and return it cropped (or the sentinel),
    /// together with the reward codes of every state fetched on the way.
    ///
    /// The codes are returned even when the frame cannot be cropped.
    fn capture(&mut self, initial: WorldState) -> (Result<Observation, EnvError>, Vec<f64>) {
        let polled = self.poller.poll(
            &mut self.rig.sim,
            &mut self.rig.clock,
            initial,
            |state| state.is_mission_running,
            |state| (state.video_frames_since_last_state > 0).then_some(()),
        );

        // a batch without a colour frame still ends the wait
        let frame = polled.value.and_then(|()| first_colour_frame(&polled.last.video_frames));
        if frame.is_none() {
            debug!("no colour frame this tick, using sentinel observation");
        }
        let observation = self.resizer.resize(frame).map_err(EnvError::from);
        (observation, polled.rewards)
    }

    fn log_returns(&self) {
        let n = self.history.len();
        let every = self.config.log_frequency;
        if n > every && n % every == 0 {
            if let Some(smoothed) = self.history.moving_average(every).last() {
                info!(
                    "{n} episodes, {} steps: smoothed return {smoothed:.3}",
                    self.history.total_steps()
                );
            }
        }
    }
}

impl<S, D, C> Env for SaberEnv<S, D, C>
where
    S: Simulation,
    D: InputDevice,
    C: Clock,
{
    fn step(&mut self, action: usize) -> Result<Step, EnvError> {
        SaberEnv::step(self, action)
    }

    fn reset(&mut self) -> Result<Observation, EnvError> {
        SaberEnv::reset(self)
    }

    fn obs_size(&self) -> usize {
        self.resizer.observation_len()
    }

    fn action_size(&self) -> usize {
        Action::COUNT
    }
}
