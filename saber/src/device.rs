use input::{Button, InputDevice, Key};
use tracing::trace;

/// Pointer stand-in for headless runs: logs input and tracks where the
/// pointer would be.
#[derive(Debug, Default)]
pub struct TracingDevice {
    x: i64,
    y: i64,
}

impl TracingDevice {
    #[must_use]
    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }
}

impl InputDevice for TracingDevice {
    fn move_relative(&mut self, dx: i32, dy: i32) {
        self.x += i64::from(dx);
        self.y += i64::from(dy);
        trace!("pointer move ({dx}, {dy}) -> ({}, {})", self.x, self.y);
    }

    fn press(&mut self, key: Key) {
        trace!("key press {key:?}");
    }

    fn click(&mut self, button: Button) {
        trace!("click {button:?}");
    }
}
