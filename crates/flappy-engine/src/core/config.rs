use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, core::geometry::Rect};

/// World constants shared by the simulation and any renderer.
///
/// Extents are stored as `u16` pixels so they convert losslessly into the
/// `f32` coordinates used by [`WorldState`](crate::WorldState). Physics and
/// reward values are `f32`.
///
/// # Example
///
/// ```
/// use flappy_engine::WorldConfig;
///
/// let config = WorldConfig::default();
/// assert_eq!(config.floor_y(), 412.0);
/// assert_eq!(config.gap_center_range(), 150..=362);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the visible world in pixels.
    pub screen_width: u16,
    /// Height of the visible world in pixels.
    pub screen_height: u16,
    /// Height of the ground strip at the bottom of the screen.
    pub ground_height: u16,
    /// Fixed horizontal position of the bird's left edge.
    pub bird_x: u16,
    pub bird_width: u16,
    pub bird_height: u16,
    pub obstacle_width: u16,
    /// Vertical size of the passable band in an obstacle.
    pub gap_height: u16,
    /// Distance kept between a sampled gap center and the top/bottom of the screen.
    pub gap_margin: u16,
    /// The obstacle is recycled once `obstacle_x + recycle_margin < bird_x`.
    pub recycle_margin: u16,
    /// Downward acceleration added to the bird velocity every tick.
    pub gravity: f32,
    /// Velocity assigned (not added) when the bird flaps.
    pub flap_impulse: f32,
    /// Obstacle displacement per tick.
    pub scroll_speed: f32,
    /// Published magnitude bound of the velocity observation.
    pub velocity_bound: f32,
    pub survival_reward: f32,
    pub pass_bonus: f32,
    pub collision_penalty: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl WorldConfig {
    pub const DEFAULT: Self = Self {
        screen_width: 288,
        screen_height: 512,
        ground_height: 100,
        bird_x: 50,
        bird_width: 34,
        bird_height: 24,
        obstacle_width: 52,
        gap_height: 150,
        gap_margin: 150,
        recycle_margin: 52,
        gravity: 0.5,
        flap_impulse: -8.0,
        scroll_speed: 3.0,
        velocity_bound: 10.0,
        survival_reward: 0.1,
        pass_bonus: 10.0,
        collision_penalty: -100.0,
    };

    /// Checks that the constants describe a playable world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ground_height >= self.screen_height {
            return Err(ConfigError::GroundTooTall {
                ground_height: self.ground_height,
                screen_height: self.screen_height,
            });
        }
        if u32::from(self.gap_margin) * 2 > u32::from(self.screen_height) {
            return Err(ConfigError::EmptyGapRange {
                gap_margin: self.gap_margin,
                screen_height: self.screen_height,
            });
        }
        if self.bird_height >= self.gap_height {
            return Err(ConfigError::BirdTallerThanGap {
                bird_height: self.bird_height,
                gap_height: self.gap_height,
            });
        }
        for (field, value) in self.physics_fields() {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        if self.scroll_speed <= 0.0 {
            return Err(ConfigError::NonPositiveScrollSpeed(self.scroll_speed));
        }
        let bird_bottom = self.initial_bird_y() + f32::from(self.bird_height);
        if bird_bottom > self.floor_y() {
            return Err(ConfigError::StartBelowFloor {
                bird_bottom,
                floor_y: self.floor_y(),
            });
        }
        Ok(())
    }

    fn physics_fields(&self) -> [(&'static str, f32); 7] {
        [
            ("gravity", self.gravity),
            ("flap_impulse", self.flap_impulse),
            ("scroll_speed", self.scroll_speed),
            ("velocity_bound", self.velocity_bound),
            ("survival_reward", self.survival_reward),
            ("pass_bonus", self.pass_bonus),
            ("collision_penalty", self.collision_penalty),
        ]
    }

    /// Y coordinate of the ground line. The bird dies when its bottom edge passes it.
    ///
    /// A ground strip taller than the screen puts the floor at 0.
    #[must_use]
    pub fn floor_y(&self) -> f32 {
        f32::from(self.screen_height.saturating_sub(self.ground_height))
    }

    /// Half of the gap height, rounded down.
    #[must_use]
    pub fn gap_half_height(&self) -> f32 {
        f32::from(self.gap_height / 2)
    }

    /// Inclusive range of gap centers a new obstacle may receive.
    #[must_use]
    pub fn gap_center_range(&self) -> RangeInclusive<u16> {
        self.gap_margin..=self.screen_height.saturating_sub(self.gap_margin)
    }

    /// Starting height of the bird: vertically centered, rounded down.
    #[must_use]
    pub fn initial_bird_y(&self) -> f32 {
        f32::from(self.screen_height / 2)
    }

    /// Rectangle covered by the ground strip.
    #[must_use]
    pub fn ground_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.floor_y(),
            f32::from(self.screen_width),
            f32::from(self.ground_height),
        )
    }
}
