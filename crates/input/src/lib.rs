#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Avatar Input
//!
//! The avatar's aim cannot be set through the mission host's command channel;
//! it follows the system pointer. This crate therefore works against two
//! outputs at once: the [`InputDevice`] (pointer and keyboard, emulated at the
//! OS level) and the mission host's command channel.
//!
//! [`InputEmulator`] turns one discrete [`Action`] into the matching sequence
//! of device and command primitives. [`Rig`] bundles the simulation, the
//! device and the clock so callers hold exclusive access to all three for the
//! duration of an action.

use std::time::Duration;

use mission::{Clock, Simulation};
use tracing::trace;

pub mod action;
pub mod emulator;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use action::{Action, Pickaxe};
pub use emulator::{InputEmulator, AIM_SWING, ATTACK_COMMAND, SWING_DELAY};

#[cfg(any(test, feature = "mock"))]
pub use mock::{InputEvent, RecordingDevice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Opens and closes the in-game command channel.
    Enter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
}

/// OS-level pointer and keyboard. Every call is fire-and-forget.
///
/// The pointer is one global resource; implementations assume they are the
/// only writer.
pub trait InputDevice {
    fn move_relative(&mut self, dx: i32, dy: i32);
    fn press(&mut self, key: Key);
    fn click(&mut self, button: Button);
}

impl<D: InputDevice + ?Sized> InputDevice for &mut D {
    fn move_relative(&mut self, dx: i32, dy: i32) {
        (**self).move_relative(dx, dy);
    }

    fn press(&mut self, key: Key) {
        (**self).press(key);
    }

    fn click(&mut self, button: Button) {
        (**self).click(button);
    }
}

/// Everything an action touches: the mission host, the input device and the
/// clock used for settle delays.
#[derive(Debug)]
pub struct Rig<S, D, C> {
    pub sim: S,
    pub device: D,
    pub clock: C,
}

impl<S, D, C> Rig<S, D, C>
where
    S: Simulation,
    D: InputDevice,
    C: Clock,
{
    pub fn new(sim: S, device: D, clock: C) -> Self {
        Self { sim, device, clock }
    }

    pub fn command(&mut self, command: &str) {
        trace!("command: {command}");
        self.sim.send_command(command);
    }

    pub fn pause(&mut self, duration: Duration) {
        self.clock.sleep(duration);
    }
}
