use serde::{Deserialize, Serialize};

use crate::InvalidActionError;

/// The discrete action an agent takes once per tick.
///
/// Indices follow the usual discrete action space layout: `0` leaves the bird
/// to gravity, `1` flaps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::IsVariant,
)]
pub enum Action {
    #[default]
    Idle,
    Flap,
}

impl Action {
    /// Number of actions in the action space.
    pub const COUNT: usize = 2;

    /// All actions, ordered by index.
    pub const ALL: [Action; Self::COUNT] = [Action::Idle, Action::Flap];

    /// Converts a raw action index into an [`Action`].
    ///
    /// Indices outside the action space are rejected instead of being
    /// mapped to [`Action::Idle`].
    pub fn from_index(index: usize) -> Result<Self, InvalidActionError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(InvalidActionError { index })
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Action::Idle => 0,
            Action::Flap => 1,
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = InvalidActionError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}
