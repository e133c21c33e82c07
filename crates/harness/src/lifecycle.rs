//! # Mission Lifecycle
//!
//! Starting an episode means three things in order: getting the host to accept
//! the mission (with bounded retries), waiting for the mission to actually
//! begin, and putting the avatar into its canonical pose. The pose sequence is
//! the same on every reset so the first observation of every episode is taken
//! from the same viewpoint.

use std::time::Duration;

use input::{Button, InputDevice, Key, Rig, AIM_SWING, ATTACK_COMMAND};
use mission::{Clock, MissionError, MissionSpec, Poller, Simulation, WorldState};
use tracing::{error, info, warn};

/// Pause around the trigger hit during setup.
pub const SETUP_DELAY: Duration = Duration::from_millis(100);

/// Pitch the view up from the spawn placement.
const LOOK_UP: [(i32, i32); 3] = [(0, -200), (0, -200), (0, -50)];

/// Turn to face the trigger block behind the spawn point.
const TURN_AROUND: [(i32, i32); 6] = [(-200, 0); 6];

#[derive(Debug, Clone, Copy)]
pub struct MissionLauncher {
    poller: Poller,
}

impl Default for MissionLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl MissionLauncher {
    #[must_use]
    pub fn new() -> Self {
        Self { poller: Poller::startup() }
    }

    /// Start a mission and leave the avatar ready to act.
    ///
    /// Returns the world state in which the mission was first seen running.
    ///
    /// # Errors
    ///
    /// [`MissionError::StartExhausted`] when every start attempt was refused.
    /// This error is fatal: there is no mission to step.
    pub fn start_episode<S, D, C>(
        &self,
        rig: &mut Rig<S, D, C>,
        spec: &MissionSpec,
    ) -> Result<WorldState, MissionError>
    where
        S: Simulation,
        D: InputDevice,
        C: Clock,
    {
        request_start(rig, spec)?;
        let state = self.await_begin(rig);
        canonical_pose(rig);
        info!("mission running, avatar in start pose");
        Ok(state)
    }

    fn await_begin<S, D, C>(&self, rig: &mut Rig<S, D, C>) -> WorldState
    where
        S: Simulation,
        D: InputDevice,
        C: Clock,
    {
        let initial = rig.sim.world_state();
        for text in &initial.errors {
            warn!("mission reported error while starting: {text}");
        }
        let polled = self.poller.poll(
            &mut rig.sim,
            &mut rig.clock,
            initial,
            |state| !state.has_mission_begun,
            |_| None::<()>,
        );
        polled.last
    }
}

fn request_start<S, D, C>(rig: &mut Rig<S, D, C>, spec: &MissionSpec) -> Result<(), MissionError>
where
    S: Simulation,
    D: InputDevice,
    C: Clock,
{
    let attempts = spec.start_retries.max(1);
    let mut attempt = 1;
    loop {
        match rig.sim.start_mission(spec) {
            Ok(()) => {
                info!(
                    "mission '{}' accepted by {}:{} (attempt {attempt}/{attempts})",
                    spec.experiment_id, spec.client.address, spec.client.port
                );
                return Ok(());
            }
            Err(err) if attempt >= attempts => {
                error!("error starting mission: {err}");
                return Err(MissionError::StartExhausted { attempts, last: err.to_string() });
            }
            Err(err) => {
                warn!("mission start attempt {attempt}/{attempts} failed: {err}, retrying");
                rig.pause(spec.retry_backoff());
                attempt += 1;
            }
        }
    }
}

fn canonical_pose<S, D, C>(rig: &mut Rig<S, D, C>)
where
    S: Simulation,
    D: InputDevice,
    C: Clock,
{
    rig.device.press(Key::Enter);
    rig.device.click(Button::Right);

    for (dx, dy) in LOOK_UP.into_iter().chain(TURN_AROUND) {
        rig.device.move_relative(dx, dy);
    }

    // hit the redstone trigger to start the run
    rig.device.move_relative(AIM_SWING, 0);
    rig.pause(SETUP_DELAY);
    rig.command(ATTACK_COMMAND);
    rig.pause(SETUP_DELAY);
    rig.device.move_relative(-AIM_SWING, 0);

    rig.device.press(Key::Enter);
}
