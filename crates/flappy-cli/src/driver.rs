use anyhow::{Context, ensure};
use flappy_agent::{EpisodeRollout, PolicyKind};
use flappy_engine::{EpisodeController, SeededGapSource, WorldConfig, WorldSeed};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

/// Everything that stays fixed across the episodes of one invocation.
#[derive(Debug, Clone, Copy)]
pub struct EpisodeSettings {
    pub config: WorldConfig,
    pub policy: PolicyKind,
    pub flap_probability: f64,
    pub max_ticks: Option<u64>,
}

impl EpisodeSettings {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.flap_probability),
            "flap probability must be within [0, 1], got {}",
            self.flap_probability
        );
        Ok(())
    }
}

/// Derives per-episode seeds from one master seed.
///
/// The same master seed yields the same sequence of episodes.
#[derive(Debug, Clone)]
pub struct SeedSchedule {
    master: WorldSeed,
    rng: Pcg32,
}

impl SeedSchedule {
    pub fn new(master: Option<WorldSeed>) -> Self {
        let master = master.unwrap_or_else(|| rand::rng().random());
        Self {
            master,
            rng: Pcg32::from_seed(master.to_bytes()),
        }
    }

    pub fn master(&self) -> WorldSeed {
        self.master
    }

    /// Returns `(world_seed, policy_seed)` for the next episode.
    pub fn next_seeds(&mut self) -> (WorldSeed, WorldSeed) {
        (self.rng.random(), self.rng.random())
    }
}

#[derive(Debug, Clone)]
pub struct PlayedEpisode {
    pub world_seed: WorldSeed,
    pub rollout: EpisodeRollout,
}

pub fn play_episode(
    settings: &EpisodeSettings,
    world_seed: WorldSeed,
    policy_seed: WorldSeed,
) -> anyhow::Result<PlayedEpisode> {
    let mut controller =
        EpisodeController::with_source(settings.config, SeededGapSource::with_seed(world_seed))
            .context("Invalid world configuration")?;
    let mut policy = settings
        .policy
        .build(&settings.config, settings.flap_probability, policy_seed);
    let rollout = flappy_agent::run_episode(&mut controller, &mut policy, settings.max_ticks)
        .with_context(|| format!("Episode with seed {world_seed} failed"))?;
    Ok(PlayedEpisode {
        world_seed,
        rollout,
    })
}

/// Plays `episodes` episodes, calling `on_episode` after each one.
pub fn play_episodes<F>(
    settings: &EpisodeSettings,
    schedule: &mut SeedSchedule,
    episodes: usize,
    mut on_episode: F,
) -> anyhow::Result<Vec<PlayedEpisode>>
where
    F: FnMut(usize, &PlayedEpisode) -> anyhow::Result<()>,
{
    settings.validate()?;
    let mut played = Vec::with_capacity(episodes);
    for index in 0..episodes {
        let (world_seed, policy_seed) = schedule.next_seeds();
        let episode = play_episode(settings, world_seed, policy_seed)?;
        on_episode(index, &episode)?;
        played.push(episode);
    }
    Ok(played)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(policy: PolicyKind, max_ticks: Option<u64>) -> EpisodeSettings {
        EpisodeSettings {
            config: WorldConfig::DEFAULT,
            policy,
            flap_probability: 0.08,
            max_ticks,
        }
    }

    #[test]
    fn test_schedule_is_deterministic_for_master_seed() {
        let master = WorldSeed::from_bytes([9; 16]);
        let mut a = SeedSchedule::new(Some(master));
        let mut b = SeedSchedule::new(Some(master));
        assert_eq!(a.master(), master);
        for _ in 0..5 {
            assert_eq!(a.next_seeds(), b.next_seeds());
        }
    }

    #[test]
    fn test_idle_episode_crashes_on_floor() {
        let seed = WorldSeed::from_bytes([1; 16]);
        let episode = play_episode(&settings(PolicyKind::Idle, None), seed, seed).unwrap();
        assert_eq!(episode.world_seed, seed);
        assert!(episode.rollout.summary.terminated);
        assert_eq!(episode.rollout.summary.ticks, 23);
        assert_eq!(episode.rollout.actions.len(), 23);
    }

    #[test]
    fn test_play_episodes_repeats_with_same_master() {
        let master = WorldSeed::from_bytes([4; 16]);
        let settings = settings(PolicyKind::Random, Some(300));

        let mut calls = 0;
        let first = play_episodes(&settings, &mut SeedSchedule::new(Some(master)), 3, |_, _| {
            calls += 1;
            Ok(())
        })
        .unwrap();
        let second =
            play_episodes(&settings, &mut SeedSchedule::new(Some(master)), 3, |_, _| Ok(()))
                .unwrap();

        assert_eq!(calls, 3);
        assert_eq!(first.len(), 3);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.world_seed, b.world_seed);
            assert_eq!(a.rollout.actions, b.rollout.actions);
            assert_eq!(a.rollout.summary, b.rollout.summary);
        }
    }

    #[test]
    fn test_rejects_out_of_range_flap_probability() {
        let mut settings = settings(PolicyKind::Random, Some(10));
        settings.flap_probability = 1.5;
        let result = play_episodes(&settings, &mut SeedSchedule::new(None), 1, |_, _| Ok(()));
        assert!(result.is_err());
    }
}
