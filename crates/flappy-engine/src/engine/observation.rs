use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::core::{config::WorldConfig, world_state::WorldState};

/// Number of components in an [`Observation`].
pub const OBSERVATION_LEN: usize = 4;

/// Observation handed to an agent after every reset and step.
///
/// Layout: `[bird_y, bird_vel, obstacle_x, gap_center_y]`, copied from the
/// world state without scaling or clamping.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Observation([f32; OBSERVATION_LEN]);

impl Observation {
    pub const BIRD_Y: usize = 0;
    pub const BIRD_VEL: usize = 1;
    pub const OBSTACLE_X: usize = 2;
    pub const GAP_CENTER_Y: usize = 3;

    #[must_use]
    pub fn encode(state: &WorldState) -> Self {
        Self([
            state.bird_y,
            state.bird_vel,
            state.obstacle_x,
            state.gap_center_y,
        ])
    }

    #[must_use]
    pub const fn from_array(values: [f32; OBSERVATION_LEN]) -> Self {
        Self(values)
    }

    #[must_use]
    pub const fn as_array(&self) -> &[f32; OBSERVATION_LEN] {
        &self.0
    }

    #[must_use]
    pub fn bird_y(&self) -> f32 {
        self.0[Self::BIRD_Y]
    }

    #[must_use]
    pub fn bird_vel(&self) -> f32 {
        self.0[Self::BIRD_VEL]
    }

    #[must_use]
    pub fn obstacle_x(&self) -> f32 {
        self.0[Self::OBSTACLE_X]
    }

    #[must_use]
    pub fn gap_center_y(&self) -> f32 {
        self.0[Self::GAP_CENTER_Y]
    }
}

impl Index<usize> for Observation {
    type Output = f32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Observation> for [f32; OBSERVATION_LEN] {
    fn from(observation: Observation) -> Self {
        observation.0
    }
}

/// Declared per-component bounds of the observation space.
///
/// These are advisory: observations are never clamped, and values outside
/// the bounds occur (for example a bird velocity above the bound after a long
/// fall, or an obstacle briefly left of zero before it is recycled).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationBounds {
    pub low: [f32; OBSERVATION_LEN],
    pub high: [f32; OBSERVATION_LEN],
}

impl ObservationBounds {
    #[must_use]
    pub fn from_config(config: &WorldConfig) -> Self {
        let height = f32::from(config.screen_height);
        let width = f32::from(config.screen_width);
        Self {
            low: [0.0, -config.velocity_bound, 0.0, 0.0],
            high: [height, config.velocity_bound, width, height],
        }
    }

    /// Returns `true` if every component lies within its declared bounds.
    #[must_use]
    pub fn contains(&self, observation: &Observation) -> bool {
        observation
            .as_array()
            .iter()
            .zip(self.low.iter().zip(&self.high))
            .all(|(value, (low, high))| (low..=high).contains(&value))
    }
}
