//! Discrete action to device/command primitives.

use std::time::Duration;

use mission::{Clock, Simulation};
use tracing::debug;

use crate::{Action, InputDevice, Pickaxe, Rig};

/// Horizontal pointer travel for one swing, in device units.
pub const AIM_SWING: i32 = 200;

/// Time the host needs to register an attack before the aim is restored.
pub const SWING_DELAY: Duration = Duration::from_millis(10);

pub const ATTACK_COMMAND: &str = "attack 1";

#[derive(Debug, Default, Clone, Copy)]
pub struct InputEmulator;

impl InputEmulator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Perform `action` and return the pickaxe held afterwards.
    ///
    /// Attacks leave the pointer where they found it. Only [`Action::Switch`]
    /// changes the pickaxe.
    pub fn apply<S, D, C>(&self, action: Action, pickaxe: Pickaxe, rig: &mut Rig<S, D, C>) -> Pickaxe
    where
        S: Simulation,
        D: InputDevice,
        C: Clock,
    {
        debug!("action: {action} ({})", action.index());
        match action {
            Action::Nop => pickaxe,
            Action::AttackLeft => {
                swing(rig, -AIM_SWING);
                pickaxe
            }
            Action::AttackRight => {
                swing(rig, AIM_SWING);
                pickaxe
            }
            Action::Switch => {
                let next = pickaxe.toggled();
                rig.command(next.hotbar_command());
                rig.pause(SWING_DELAY);
                next
            }
        }
    }
}

fn swing<S, D, C>(rig: &mut Rig<S, D, C>, dx: i32)
where
    S: Simulation,
    D: InputDevice,
    C: Clock,
{
    rig.device.move_relative(dx, 0);
    rig.command(ATTACK_COMMAND);
    rig.pause(SWING_DELAY);
    rig.device.move_relative(-dx, 0);
}
