use std::time::Duration;

/// Source of every deliberate wait in the harness.
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// Blocks the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration);
    }
}
