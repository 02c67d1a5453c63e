//! Single-lane flappy-bird simulation exposed as a reinforcement-learning environment.
//!
//! - [`core`](crate::core) - Plain data: [`WorldConfig`], [`WorldState`], [`Action`], [`Rect`]
//! - [`engine`](crate::engine) - Tick update, observation encoding, episode control and gap randomness

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// An action index outside the action space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid action index {index}, expected 0..{}", Action::COUNT)]
pub struct InvalidActionError {
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StepError {
    #[display("step called before the first reset")]
    NotStarted,
    #[display("episode already terminated, reset before stepping")]
    EpisodeTerminated,
    #[display("{_0}")]
    InvalidAction(InvalidActionError),
}

impl From<InvalidActionError> for StepError {
    fn from(err: InvalidActionError) -> Self {
        StepError::InvalidAction(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("ground height {ground_height} must be below screen height {screen_height}")]
    GroundTooTall {
        ground_height: u16,
        screen_height: u16,
    },
    #[display("gap margin {gap_margin} leaves no room for gaps in screen height {screen_height}")]
    EmptyGapRange {
        gap_margin: u16,
        screen_height: u16,
    },
    #[display("bird height {bird_height} does not fit through gap height {gap_height}")]
    BirdTallerThanGap { bird_height: u16, gap_height: u16 },
    #[display("scroll speed must be positive, got {_0}")]
    NonPositiveScrollSpeed(#[error(not(source))] f32),
    #[display("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[display("bird starts with its bottom at {bird_bottom}, below the floor at {floor_y}")]
    StartBelowFloor { bird_bottom: f32, floor_y: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid hex: expected 32 characters, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid hex: not a hexadecimal number")]
    InvalidHex,
}
