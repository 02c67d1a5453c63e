//! Action selection from observations.
//!
//! A [`Policy`] sees only the [`Observation`] vector, never the world state,
//! so any policy here could be swapped for a trained model with the same
//! inputs. Three hand-written policies are provided:
//!
//! - [`IdlePolicy`] - Never flaps; the bird falls to the ground
//! - [`RandomPolicy`] - Flaps with a fixed probability
//! - [`GapTrackingPolicy`] - Flaps when the bird is falling below the gap center
//!
//! [`PolicyKind`] names them for command-line selection and recordings.

use std::str::FromStr;

use flappy_engine::{Action, Observation, WorldConfig, WorldSeed};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Chooses one action per tick.
pub trait Policy {
    fn select_action(&mut self, observation: &Observation) -> Action;
}

impl<P> Policy for Box<P>
where
    P: Policy + ?Sized,
{
    fn select_action(&mut self, observation: &Observation) -> Action {
        (**self).select_action(observation)
    }
}

/// Never flaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdlePolicy;

impl Policy for IdlePolicy {
    fn select_action(&mut self, _observation: &Observation) -> Action {
        Action::Idle
    }
}

/// Flaps with probability `flap_probability`, independent of the observation.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    flap_probability: f64,
    rng: Pcg32,
}

impl RandomPolicy {
    /// Default flap probability; roughly balances gravity against flap lift.
    pub const DEFAULT_FLAP_PROBABILITY: f64 = 0.08;

    /// # Panics
    ///
    /// Panics if `flap_probability` is outside `[0, 1]`.
    #[must_use]
    pub fn with_seed(flap_probability: f64, seed: WorldSeed) -> Self {
        assert!(
            (0.0..=1.0).contains(&flap_probability),
            "flap probability must be within [0, 1], got {flap_probability}"
        );
        Self {
            flap_probability,
            rng: Pcg32::from_seed(seed.to_bytes()),
        }
    }

    #[must_use]
    pub fn flap_probability(&self) -> f64 {
        self.flap_probability
    }
}

impl Policy for RandomPolicy {
    fn select_action(&mut self, _observation: &Observation) -> Action {
        if self.rng.random_bool(self.flap_probability) {
            Action::Flap
        } else {
            Action::Idle
        }
    }
}

/// Keeps the bird hovering around the gap center.
///
/// Flaps when the bird is moving downward and its center is more than
/// `tolerance` pixels below the gap center. One flap lifts the bird by
/// roughly 68 pixels under the default physics, which stays inside the
/// 150-pixel gap.
#[derive(Debug, Clone, Copy)]
pub struct GapTrackingPolicy {
    bird_half_height: f32,
    tolerance: f32,
}

impl GapTrackingPolicy {
    pub const DEFAULT_TOLERANCE: f32 = 10.0;

    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        Self::with_tolerance(config, Self::DEFAULT_TOLERANCE)
    }

    #[must_use]
    pub fn with_tolerance(config: &WorldConfig, tolerance: f32) -> Self {
        Self {
            bird_half_height: f32::from(config.bird_height) / 2.0,
            tolerance,
        }
    }
}

impl Policy for GapTrackingPolicy {
    fn select_action(&mut self, observation: &Observation) -> Action {
        let bird_center = observation.bird_y() + self.bird_half_height;
        let below_target = bird_center > observation.gap_center_y() + self.tolerance;
        if below_target && observation.bird_vel() > 0.0 {
            Action::Flap
        } else {
            Action::Idle
        }
    }
}

/// Selectable built-in policies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    #[display("idle")]
    Idle,
    #[display("random")]
    Random,
    #[default]
    #[display("gap-tracking")]
    GapTracking,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown policy {name:?}, expected one of: idle, random, gap-tracking")]
pub struct ParsePolicyKindError {
    name: String,
}

impl FromStr for PolicyKind {
    type Err = ParsePolicyKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "idle" => Ok(Self::Idle),
            "random" => Ok(Self::Random),
            "gap-tracking" | "gap_tracking" | "gaptracking" => Ok(Self::GapTracking),
            _ => Err(ParsePolicyKindError { name: s.to_owned() }),
        }
    }
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [Self::Idle, Self::Random, Self::GapTracking];

    /// Instantiates the policy.
    ///
    /// `flap_probability` and `seed` only affect [`PolicyKind::Random`].
    #[must_use]
    pub fn build(
        self,
        config: &WorldConfig,
        flap_probability: f64,
        seed: WorldSeed,
    ) -> Box<dyn Policy> {
        match self {
            Self::Idle => Box::new(IdlePolicy),
            Self::Random => Box::new(RandomPolicy::with_seed(flap_probability, seed)),
            Self::GapTracking => Box::new(GapTrackingPolicy::new(config)),
        }
    }
}
