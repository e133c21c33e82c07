use crate::{Button, InputDevice, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Move { dx: i32, dy: i32 },
    Press(Key),
    Click(Button),
}

/// Input device that only remembers what it was asked to do.
#[derive(Debug, Default, Clone)]
pub struct RecordingDevice {
    pub events: Vec<InputEvent>,
}

impl RecordingDevice {
    /// Sum of all pointer moves so far.
    #[must_use]
    pub fn displacement(&self) -> (i64, i64) {
        self.events.iter().fold((0, 0), |(x, y), event| match event {
            InputEvent::Move { dx, dy } => (x + i64::from(*dx), y + i64::from(*dy)),
            _ => (x, y),
        })
    }

    #[must_use]
    pub fn moves(&self) -> Vec<(i32, i32)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                InputEvent::Move { dx, dy } => Some((*dx, *dy)),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn presses(&self, key: Key) -> usize {
        self.events.iter().filter(|e| **e == InputEvent::Press(key)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl InputDevice for RecordingDevice {
    fn move_relative(&mut self, dx: i32, dy: i32) {
        self.events.push(InputEvent::Move { dx, dy });
    }

    fn press(&mut self, key: Key) {
        self.events.push(InputEvent::Press(key));
    }

    fn click(&mut self, button: Button) {
        self.events.push(InputEvent::Click(button));
    }
}
