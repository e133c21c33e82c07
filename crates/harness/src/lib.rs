#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # NoobSaber Environment
//!
//! A Gym-style environment around a mission host in which the avatar breaks
//! coloured blocks with one of two pickaxes. The trainer picks one of four
//! discrete actions per step; the environment answers with a center-cropped
//! colour frame, a shaped reward and a `done` flag.
//!
//! ## Key Components
//!
//! -   **[`SaberEnv`]:** the environment adapter and the only type a trainer
//!     needs. It implements [`Env`].
//! -   **[`MissionLauncher`]:** starts a mission with bounded retries and puts
//!     the avatar into its canonical pose.
//! -   **[`RewardShaper`]:** rewrites pickup codes according to the pickaxe
//!     held at the time.
//! -   **[`History`]:** per-episode returns for external logging.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use harness::{Env, EnvConfig, SaberEnv};
//! use input::Rig;
//! use mission::SystemClock;
//!
//! let rig = Rig::new(host_client, pointer, SystemClock);
//! let mut env = SaberEnv::new(EnvConfig::default(), rig)?;
//! let obs = env.reset()?;
//! let step = env.step(2)?; // ATK_R
//! ```

mod error;

pub mod adapter;
pub mod config;
pub mod env;
pub mod episode;
pub mod lifecycle;
pub mod reward;

pub use adapter::{SaberEnv, SETTLE_DELAY};
pub use config::EnvConfig;
pub use env::{Env, Info, Step};
pub use episode::{Episode, History, HistoryEntry, Phase};
pub use error::EnvError;
pub use lifecycle::{MissionLauncher, SETUP_DELAY};
pub use reward::{RewardShaper, RewardTable};
