//! End-to-end episodes driven through the public reset/step interface.

use flappy_engine::{
    Action, EpisodeController, ScriptedGapSource, StepError, WorldConfig, WorldState,
};

fn controller(gaps: &[u16]) -> EpisodeController<ScriptedGapSource> {
    EpisodeController::with_source(WorldConfig::default(), ScriptedGapSource::new(gaps)).unwrap()
}

fn forced_state(bird_y: f32, obstacle_x: f32, gap_center_y: f32) -> WorldState {
    WorldState {
        bird_y,
        bird_vel: 0.0,
        obstacle_x,
        gap_center_y,
        score: 0,
        terminal: false,
    }
}

#[test]
fn ten_idle_ticks_from_start_only_earn_survival_reward() {
    let mut controller = controller(&[300]);
    let initial = controller.reset();
    assert_eq!(initial.as_array(), &[256.0, 0.0, 288.0, 300.0]);

    let mut total = 0.0;
    let mut expected_vel = 0.0;
    let mut expected_y = 256.0;
    for _ in 0..10 {
        let outcome = controller.step(Action::Idle).unwrap();
        expected_vel += 0.5;
        expected_y += expected_vel;

        assert!((outcome.reward - 0.1).abs() < 1e-6);
        assert!(!outcome.terminal);
        assert_eq!(outcome.observation.bird_vel(), expected_vel);
        assert_eq!(outcome.observation.bird_y(), expected_y);
        total += outcome.reward;
    }

    assert!((total - 1.0).abs() < 1e-4);
    assert!((controller.stats().total_reward() - 1.0).abs() < 1e-4);
    assert_eq!(controller.state().unwrap().score, 0);
    assert_eq!(controller.state().unwrap().obstacle_x, 258.0);
}

#[test]
fn bird_outside_gap_over_obstacle_collides() {
    let mut controller = controller(&[300]);
    // gap band is [225, 375]; the bird at 100 is far above it
    controller.reset_from(forced_state(100.0, 50.0, 300.0));

    let outcome = controller.step(Action::Idle).unwrap();
    assert_eq!(outcome.reward, -100.0);
    assert!(outcome.terminal);
    assert!(controller.is_terminal());
    assert_eq!(
        controller.step(Action::Idle),
        Err(StepError::EpisodeTerminated)
    );
}

#[test]
fn obstacle_behind_bird_is_recycled_with_bonus() {
    let mut controller = controller(&[300, 180]);
    controller.reset_from(forced_state(256.0, -3.0, 300.0));

    let outcome = controller.step(Action::Idle).unwrap();
    let state = controller.state().unwrap();
    assert_eq!(state.obstacle_x, 288.0);
    assert_eq!(state.score, 1);
    assert_eq!(state.gap_center_y, 300.0);
    assert!((outcome.reward - 10.1).abs() < 1e-4);
    assert!(!outcome.terminal);

    let next = controller.reset();
    assert_eq!(next.gap_center_y(), 180.0);
}

#[test]
fn obstacle_at_threshold_is_not_recycled() {
    let mut controller = controller(&[300]);
    controller.reset_from(forced_state(256.0, 4.0, 300.0));

    // scrolls to 1: 1 + 52 < 50 is false
    let outcome = controller.step(Action::Idle).unwrap();
    let state = controller.state().unwrap();
    assert_eq!(state.obstacle_x, 1.0);
    assert_eq!(state.score, 0);
    assert!((outcome.reward - 0.1).abs() < 1e-6);
}

#[test]
fn collision_wins_over_same_tick_pass() {
    let mut controller = controller(&[300]);
    // falls below the ground line in the tick the obstacle is recycled
    controller.reset_from(forced_state(400.0, 0.0, 300.0));

    let outcome = controller.step(Action::Idle).unwrap();
    assert_eq!(outcome.reward, -100.0);
    assert!(outcome.terminal);
    assert_eq!(controller.state().unwrap().score, 1);
}

#[test]
fn bird_resting_on_boundaries_survives() {
    let config = WorldConfig::default();
    let mut controller = controller(&[300]);

    // Flap from y=8 lands exactly on the ceiling.
    controller.reset_from(forced_state(8.0, 200.0, 300.0));
    let outcome = controller.step(Action::Flap).unwrap();
    assert_eq!(outcome.observation.bird_y(), 0.0);
    assert!(!outcome.terminal);

    // Falling 0.5 from 387.5 puts the bottom edge exactly on the ground line.
    controller.reset_from(forced_state(387.5, 200.0, 300.0));
    let outcome = controller.step(Action::Idle).unwrap();
    let bird_bottom = outcome.observation.bird_y() + f32::from(config.bird_height);
    assert_eq!(bird_bottom, config.floor_y());
    assert!(!outcome.terminal);
}

#[test]
fn flapping_through_a_fixed_gap_scores_repeatedly() {
    let mut controller = controller(&[256]);
    let mut observation = controller.reset();
    for _ in 0..1000 {
        let centered_low = observation.bird_y() + 12.0 > observation.gap_center_y() + 10.0;
        let action = if centered_low && observation.bird_vel() > 0.0 {
            Action::Flap
        } else {
            Action::Idle
        };
        let outcome = controller.step(action).unwrap();
        assert!(!outcome.terminal);
        observation = outcome.observation;
    }
    // one pass every 97 ticks
    assert_eq!(controller.state().unwrap().score, 10);
}
