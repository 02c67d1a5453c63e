pub use self::{action::*, config::*, geometry::*, world_state::*};

pub(crate) mod action;
pub(crate) mod config;
pub(crate) mod geometry;
pub(crate) mod world_state;
