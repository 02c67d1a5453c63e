//! The per-tick update rule.
//!
//! [`advance`] moves a [`WorldState`] forward by one tick in a fixed order:
//!
//! 1. Gravity is added to the bird velocity.
//! 2. A flap overwrites the velocity with the flap impulse.
//! 3. The bird position is integrated (`bird_y += bird_vel`).
//! 4. The obstacle scrolls left.
//! 5. An obstacle that has fully passed the bird is recycled to the right
//!    edge with a new gap, scoring a point and the pass bonus.
//! 6. Collisions are checked against the updated positions. A collision
//!    replaces the tick's reward with the collision penalty, even if an
//!    obstacle was passed in the same tick.

use crate::{
    core::{action::Action, config::WorldConfig, world_state::WorldState},
    engine::gap_source::GapSource,
};

/// What ended an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum CollisionKind {
    /// The bird's top edge went above the screen.
    #[display("ceiling")]
    Ceiling,
    /// The bird's bottom edge went below the ground line.
    #[display("floor")]
    Floor,
    /// The bird overlapped a solid part of the obstacle.
    #[display("obstacle")]
    Obstacle,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub reward: f32,
    pub terminal: bool,
    /// The obstacle was recycled during this tick.
    pub passed: bool,
    pub collision: Option<CollisionKind>,
}

/// Advances `state` by one tick.
///
/// `state` must not be terminal; [`EpisodeController`](crate::EpisodeController)
/// guards against that before calling in.
///
/// # Example
///
/// ```
/// use flappy_engine::{Action, ScriptedGapSource, WorldConfig, WorldState, advance};
///
/// let config = WorldConfig::default();
/// let mut source = ScriptedGapSource::constant(300);
/// let mut state = WorldState::new(&config, 300.0);
///
/// let outcome = advance(&mut state, Action::Flap, &config, &mut source);
/// assert_eq!(state.bird_vel, -8.0);
/// assert_eq!(state.bird_y, 248.0);
/// assert!(!outcome.terminal);
/// ```
pub fn advance<S>(
    state: &mut WorldState,
    action: Action,
    config: &WorldConfig,
    source: &mut S,
) -> TickOutcome
where
    S: GapSource + ?Sized,
{
    debug_assert!(!state.terminal, "advancing a terminal world state");

    let mut reward = config.survival_reward;

    state.bird_vel += config.gravity;
    if action.is_flap() {
        state.bird_vel = config.flap_impulse;
    }
    state.bird_y += state.bird_vel;

    state.obstacle_x -= config.scroll_speed;

    let passed = state.obstacle_x + f32::from(config.recycle_margin) < f32::from(config.bird_x);
    if passed {
        state.obstacle_x = f32::from(config.screen_width);
        state.gap_center_y = f32::from(source.sample_gap_center(config.gap_center_range()));
        state.score += 1;
        reward += config.pass_bonus;
        log::debug!(
            "obstacle passed: score={}, next gap_center_y={}",
            state.score,
            state.gap_center_y
        );
    }

    let collision = detect_collision(state, config);
    if collision.is_some() {
        reward = config.collision_penalty;
        state.terminal = true;
    }

    TickOutcome {
        reward,
        terminal: state.terminal,
        passed,
        collision,
    }
}

/// Checks the bird against the world bounds and the live obstacle.
///
/// Touching the top of the screen or the ground line exactly is allowed.
#[must_use]
pub fn detect_collision(state: &WorldState, config: &WorldConfig) -> Option<CollisionKind> {
    let bird = state.bird_rect(config);
    if bird.top() < 0.0 {
        return Some(CollisionKind::Ceiling);
    }
    if bird.bottom() > config.floor_y() {
        return Some(CollisionKind::Floor);
    }

    let [obstacle, _] = state.obstacle_rects(config);
    if bird.overlaps_horizontally(&obstacle)
        && !bird.within_vertical_band(state.gap_top(config), state.gap_bottom(config))
    {
        return Some(CollisionKind::Obstacle);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::gap_source::ScriptedGapSource;

    const CONFIG: WorldConfig = WorldConfig::DEFAULT;

    fn state(bird_y: f32, bird_vel: f32, obstacle_x: f32, gap_center_y: f32) -> WorldState {
        WorldState {
            bird_y,
            bird_vel,
            obstacle_x,
            gap_center_y,
            score: 0,
            terminal: false,
        }
    }

    fn step(state: &mut WorldState, action: Action) -> TickOutcome {
        let mut source = ScriptedGapSource::constant(200);
        advance(state, action, &CONFIG, &mut source)
    }

    mod physics {
        use super::*;

        #[test]
        fn test_idle_accumulates_gravity() {
            let mut s = state(200.0, 1.5, 200.0, 256.0);
            step(&mut s, Action::Idle);
            assert_eq!(s.bird_vel, 2.0);
            assert_eq!(s.bird_y, 202.0);
        }

        #[test]
        fn test_flap_overwrites_velocity() {
            for prior in [-8.0, -3.0, 0.0, 4.5, 9.5] {
                let mut s = state(200.0, prior, 200.0, 256.0);
                step(&mut s, Action::Flap);
                assert_eq!(s.bird_vel, -8.0);
                assert_eq!(s.bird_y, 192.0);
            }
        }

        #[test]
        fn test_obstacle_scrolls() {
            let mut s = state(200.0, 0.0, 200.0, 256.0);
            step(&mut s, Action::Idle);
            assert_eq!(s.obstacle_x, 197.0);
            assert_eq!(s.score, 0);
        }
    }

    mod recycle {
        use super::*;
        use crate::engine::gap_source::{SeededGapSource, WorldSeed};

        #[test]
        fn test_no_recycle_at_threshold() {
            // -2 + 52 == 50 is not behind the bird yet
            let mut s = state(200.0, 0.0, 1.0, 256.0);
            let outcome = step(&mut s, Action::Idle);
            assert_eq!(s.obstacle_x, -2.0);
            assert!(!outcome.passed);
            assert_eq!(s.score, 0);
        }

        #[test]
        fn test_recycle_past_threshold() {
            let mut s = state(200.0, 0.0, 0.0, 256.0);
            let outcome = step(&mut s, Action::Idle);
            assert!(outcome.passed);
            assert_eq!(s.obstacle_x, 288.0);
            assert_eq!(s.gap_center_y, 200.0);
            assert_eq!(s.score, 1);
            assert!((outcome.reward - 10.1).abs() < 1e-4);
        }

        #[test]
        fn test_recycled_gap_uses_configured_range() {
            let mut source = SeededGapSource::with_seed(WorldSeed::from_bytes([3; 16]));
            for _ in 0..200 {
                let mut s = state(200.0, 0.0, 0.0, 256.0);
                advance(&mut s, Action::Idle, &CONFIG, &mut source);
                assert!((150.0..=362.0).contains(&s.gap_center_y));
            }
        }
    }

    mod collision {
        use super::*;

        #[test]
        fn test_ceiling_boundary_is_inclusive() {
            let s = state(0.0, 0.0, 200.0, 256.0);
            assert_eq!(detect_collision(&s, &CONFIG), None);

            let s = state(-0.5, 0.0, 200.0, 256.0);
            assert_eq!(detect_collision(&s, &CONFIG), Some(CollisionKind::Ceiling));
        }

        #[test]
        fn test_floor_boundary_is_inclusive() {
            let s = state(388.0, 0.0, 200.0, 256.0);
            assert_eq!(detect_collision(&s, &CONFIG), None);

            let s = state(388.5, 0.0, 200.0, 256.0);
            assert_eq!(detect_collision(&s, &CONFIG), Some(CollisionKind::Floor));
        }

        #[test]
        fn test_inside_gap_is_safe() {
            // gap band [225, 375]; bird spans [225, 249] and [351, 375]
            let s = state(225.0, 0.0, 60.0, 300.0);
            assert_eq!(detect_collision(&s, &CONFIG), None);
            let s = state(351.0, 0.0, 60.0, 300.0);
            assert_eq!(detect_collision(&s, &CONFIG), None);
        }

        #[test]
        fn test_outside_gap_collides() {
            let s = state(224.5, 0.0, 60.0, 300.0);
            assert_eq!(detect_collision(&s, &CONFIG), Some(CollisionKind::Obstacle));
            let s = state(351.5, 0.0, 60.0, 300.0);
            assert_eq!(detect_collision(&s, &CONFIG), Some(CollisionKind::Obstacle));
        }

        #[test]
        fn test_no_collision_without_horizontal_overlap() {
            // obstacle [84, 136] only touches the bird's right edge at 84
            let s = state(100.0, 0.0, 84.0, 300.0);
            assert_eq!(detect_collision(&s, &CONFIG), None);
            // obstacle [-2, 50] only touches the bird's left edge at 50
            let s = state(100.0, 0.0, -2.0, 300.0);
            assert_eq!(detect_collision(&s, &CONFIG), None);
        }

        #[test]
        fn test_collision_sets_terminal_and_penalty() {
            let mut s = state(388.0, 0.0, 200.0, 256.0);
            let outcome = step(&mut s, Action::Idle);
            assert_eq!(outcome.collision, Some(CollisionKind::Floor));
            assert!(outcome.terminal);
            assert!(s.terminal);
            assert_eq!(outcome.reward, -100.0);
        }

        #[test]
        fn test_collision_overrides_pass_bonus() {
            // Recycles this tick while the bird drops through the floor.
            let mut s = state(400.0, 0.0, 0.0, 256.0);
            let outcome = step(&mut s, Action::Idle);
            assert!(outcome.passed);
            assert_eq!(s.score, 1);
            assert!(outcome.terminal);
            assert_eq!(outcome.reward, -100.0);
        }
    }
}
