//! # Cooperative Polling
//!
//! The mission host runs asynchronously, so the harness resynchronises with it
//! by sleeping a fixed interval and fetching a fresh [`WorldState`] until a
//! condition is met. Two loops need this: waiting for a mission to begin and
//! waiting for the next frame. They differ only in how reported errors are
//! treated, which is what [`OnError`] selects.

use std::time::Duration;

use tracing::{error, warn};

use crate::{Clock, Simulation, WorldState};

/// Sleep between two world-state fetches.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    /// Log reported errors as warnings and keep polling.
    Tolerate,
    /// Stop at the first state that reports errors, yielding no value.
    Abort,
}

/// Outcome of one [`Poller::poll`] run.
#[derive(Debug, Clone)]
pub struct Polled<T> {
    pub value: Option<T>,
    /// Last state seen (the initial one when the loop never ran).
    pub last: WorldState,
    /// Reward events from every state fetched by the loop, in arrival order.
    pub rewards: Vec<f64>,
    pub aborted: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Poller {
    interval: Duration,
    on_error: OnError,
}

impl Poller {
    #[must_use]
    pub const fn new(interval: Duration, on_error: OnError) -> Self {
        Self { interval, on_error }
    }

    /// Poller used while a mission is starting: errors are noise.
    #[must_use]
    pub const fn startup() -> Self {
        Self::new(POLL_INTERVAL, OnError::Tolerate)
    }

    /// Poller used between steps: errors end the wait for this tick.
    #[must_use]
    pub const fn steady() -> Self {
        Self::new(POLL_INTERVAL, OnError::Abort)
    }

    /// Poll while `keep_going` holds for the current state.
    ///
    /// Each round sleeps, fetches a new state, applies the error policy and
    /// then offers the state to `inspect`; a `Some` from `inspect` ends the
    /// loop with that value. The initial state is only tested against
    /// `keep_going`; its rewards are the caller's to account for.
    pub fn poll<S, C, T, K, F>(
        &self,
        sim: &mut S,
        clock: &mut C,
        initial: WorldState,
        mut keep_going: K,
        mut inspect: F,
    ) -> Polled<T>
    where
        S: Simulation + ?Sized,
        C: Clock + ?Sized,
        K: FnMut(&WorldState) -> bool,
        F: FnMut(&WorldState) -> Option<T>,
    {
        let mut state = initial;
        let mut rewards = Vec::new();

        while keep_going(&state) {
            clock.sleep(self.interval);
            state = sim.world_state();
            rewards.extend_from_slice(&state.rewards);

            if !state.errors.is_empty() {
                match self.on_error {
                    OnError::Abort => {
                        for (idx, text) in state.errors.iter().enumerate() {
                            error!("error #{idx}: {text}");
                        }
                        return Polled { value: None, last: state, rewards, aborted: true };
                    }
                    OnError::Tolerate => {
                        for text in &state.errors {
                            warn!("mission reported error while polling: {text}");
                        }
                    }
                }
            }

            if let Some(value) = inspect(&state) {
                return Polled { value: Some(value), last: state, rewards, aborted: false };
            }
        }

        Polled { value: None, last: state, rewards, aborted: false }
    }
}
