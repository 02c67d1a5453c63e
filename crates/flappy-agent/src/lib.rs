//! Agents and driver loops for the flappy-bird environment.
//!
//! The engine crate only knows how to advance one tick. This crate sits on
//! the agent side of that boundary:
//!
//! - [`policy`] - Observation-to-action policies ([`Policy`] and built-in implementations)
//! - [`rollout`] - Playing and replaying whole episodes through an
//!   [`EpisodeController`](flappy_engine::EpisodeController)
//! - [`evaluation`] - Aggregate statistics over many episodes
//!
//! # Example
//!
//! ```
//! use flappy_agent::{GapTrackingPolicy, run_episode};
//! use flappy_engine::{EpisodeController, ScriptedGapSource, WorldConfig};
//!
//! let config = WorldConfig::default();
//! let mut controller = EpisodeController::with_source(config, ScriptedGapSource::constant(256))?;
//! let mut policy = GapTrackingPolicy::new(&config);
//!
//! let rollout = run_episode(&mut controller, &mut policy, Some(200))?;
//! assert_eq!(rollout.summary.score, 2);
//! assert!(!rollout.summary.terminated);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{policy::*, rollout::*};

pub mod evaluation;
pub mod policy;
pub mod rollout;
