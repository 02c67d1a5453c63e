use flappy_engine::{Action, EpisodeController, GapSource, StepError};
use serde::{Deserialize, Serialize};

use crate::policy::Policy;

/// Final numbers of one episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub ticks: u64,
    pub total_reward: f32,
    pub score: u32,
    /// `false` if the episode was cut off by the tick limit before reaching a terminal state.
    pub terminated: bool,
}

/// An episode's summary together with every action taken.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeRollout {
    pub summary: EpisodeSummary,
    pub actions: Vec<Action>,
}

/// Plays one episode from a fresh reset.
///
/// Stops when the episode terminates or after `max_ticks` ticks, whichever
/// comes first. Without a limit, a policy that never crashes keeps the loop
/// running forever.
pub fn run_episode<S, P>(
    controller: &mut EpisodeController<S>,
    policy: &mut P,
    max_ticks: Option<u64>,
) -> Result<EpisodeRollout, StepError>
where
    S: GapSource,
    P: Policy + ?Sized,
{
    let mut observation = controller.reset();
    let mut actions = vec![];
    let mut terminated = false;

    while max_ticks.is_none_or(|limit| controller.stats().ticks() < limit) {
        let action = policy.select_action(&observation);
        let outcome = controller.step(action)?;
        actions.push(action);
        observation = outcome.observation;
        if outcome.terminal {
            terminated = true;
            break;
        }
    }

    let summary = EpisodeSummary {
        ticks: controller.stats().ticks(),
        total_reward: controller.stats().total_reward(),
        score: controller.state().map_or(0, |state| state.score),
        terminated,
    };
    log::debug!("episode finished: {summary:?}");
    Ok(EpisodeRollout { summary, actions })
}

/// Re-applies recorded actions from a fresh reset.
///
/// Stops early if the episode terminates before the actions run out; the
/// returned summary then covers only the ticks actually played.
pub fn replay_actions<S>(
    controller: &mut EpisodeController<S>,
    actions: &[Action],
) -> Result<EpisodeSummary, StepError>
where
    S: GapSource,
{
    controller.reset();
    let mut terminated = false;
    for &action in actions {
        if controller.step(action)?.terminal {
            terminated = true;
            break;
        }
    }
    Ok(EpisodeSummary {
        ticks: controller.stats().ticks(),
        total_reward: controller.stats().total_reward(),
        score: controller.state().map_or(0, |state| state.score),
        terminated,
    })
}
