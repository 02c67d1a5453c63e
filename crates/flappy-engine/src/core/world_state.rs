use serde::{Deserialize, Serialize};

use crate::core::{config::WorldConfig, geometry::Rect};

/// Instantaneous state of one episode.
///
/// The bird never moves horizontally; it sits at [`WorldConfig::bird_x`]
/// while the single live obstacle scrolls toward it. All coordinates are
/// screen pixels with `y` growing downward.
///
/// # Example
///
/// ```
/// use flappy_engine::{WorldConfig, WorldState};
///
/// let config = WorldConfig::default();
/// let state = WorldState::new(&config, 300.0);
///
/// assert_eq!(state.bird_y, 256.0);
/// assert_eq!(state.obstacle_x, 288.0);
/// assert_eq!(state.score, 0);
/// assert!(!state.terminal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// Top edge of the bird.
    pub bird_y: f32,
    /// Vertical velocity in pixels per tick, positive downward.
    pub bird_vel: f32,
    /// Left edge of the obstacle.
    pub obstacle_x: f32,
    /// Vertical center of the obstacle's gap.
    pub gap_center_y: f32,
    /// Obstacles passed so far.
    pub score: u32,
    /// Set once the bird collides or leaves the playable area.
    pub terminal: bool,
}

impl WorldState {
    /// Creates the state of a fresh episode with the given gap center.
    #[must_use]
    pub fn new(config: &WorldConfig, gap_center_y: f32) -> Self {
        Self {
            bird_y: config.initial_bird_y(),
            bird_vel: 0.0,
            obstacle_x: f32::from(config.screen_width),
            gap_center_y,
            score: 0,
            terminal: false,
        }
    }

    #[must_use]
    pub fn bird_rect(&self, config: &WorldConfig) -> Rect {
        Rect::new(
            f32::from(config.bird_x),
            self.bird_y,
            f32::from(config.bird_width),
            f32::from(config.bird_height),
        )
    }

    /// Top edge of the gap band.
    #[must_use]
    pub fn gap_top(&self, config: &WorldConfig) -> f32 {
        self.gap_center_y - config.gap_half_height()
    }

    /// Bottom edge of the gap band.
    #[must_use]
    pub fn gap_bottom(&self, config: &WorldConfig) -> f32 {
        self.gap_center_y + config.gap_half_height()
    }

    /// The two solid parts of the obstacle: above and below the gap.
    ///
    /// The lower part extends to the bottom of the screen, behind the ground strip.
    #[must_use]
    pub fn obstacle_rects(&self, config: &WorldConfig) -> [Rect; 2] {
        let width = f32::from(config.obstacle_width);
        let gap_top = self.gap_top(config);
        let gap_bottom = self.gap_bottom(config);
        let screen_height = f32::from(config.screen_height);
        [
            Rect::new(self.obstacle_x, 0.0, width, gap_top.max(0.0)),
            Rect::new(
                self.obstacle_x,
                gap_bottom,
                width,
                (screen_height - gap_bottom).max(0.0),
            ),
        ]
    }
}
