//! Simulation logic and episode management.
//!
//! This module advances the plain data in [`crate::core`] through time:
//!
//! - [`advance`] - Per-tick update rule (physics, scrolling, scoring, collisions)
//! - [`Observation`] / [`ObservationBounds`] - Observation vector handed to agents
//! - [`EpisodeController`] - Reset/step interface owning the active [`WorldState`]
//! - [`GapSource`] - Injected randomness for gap placement ([`SeededGapSource`],
//!   [`ScriptedGapSource`])
//!
//! # Episode Flow
//!
//! 1. [`EpisodeController::reset`] builds a fresh [`WorldState`] and returns its observation
//! 2. The agent picks an [`Action`] from the observation
//! 3. [`EpisodeController::step`] advances one tick and returns observation, reward and
//!    terminal flag
//! 4. Repeat until the terminal flag is set, then reset
//!
//! # Example
//!
//! ```
//! use flappy_engine::{Action, EpisodeController, SeededGapSource, WorldConfig, WorldSeed};
//!
//! let seed = WorldSeed::from_bytes([1; 16]);
//! let mut controller =
//!     EpisodeController::with_source(WorldConfig::default(), SeededGapSource::with_seed(seed))?;
//!
//! let mut observation = controller.reset();
//! loop {
//!     let action = if observation.bird_y() > 300.0 { Action::Flap } else { Action::Idle };
//!     let outcome = controller.step(action)?;
//!     observation = outcome.observation;
//!     if outcome.terminal || controller.stats().ticks() >= 200 {
//!         break;
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`Action`]: crate::Action
//! [`WorldState`]: crate::WorldState

pub use self::{episode::*, gap_source::*, observation::*, simulation::*};

mod episode;
mod gap_source;
mod observation;
mod simulation;
