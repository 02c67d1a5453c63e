use crate::{
    ConfigError, StepError,
    core::{action::Action, config::WorldConfig, world_state::WorldState},
    engine::{
        gap_source::{GapSource, SeededGapSource},
        observation::Observation,
        simulation::{self, TickOutcome},
    },
};

/// What a successful [`EpisodeController::step`] hands back to the agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub observation: Observation,
    pub reward: f32,
    pub terminal: bool,
}

/// Running totals for the current episode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EpisodeStats {
    ticks: u64,
    total_reward: f32,
}

impl EpisodeStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ticks: 0,
            total_reward: 0.0,
        }
    }

    /// Number of ticks advanced since the last reset.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Sum of the rewards returned since the last reset.
    #[must_use]
    pub const fn total_reward(&self) -> f32 {
        self.total_reward
    }

    fn record_tick(&mut self, outcome: &TickOutcome) {
        self.ticks += 1;
        self.total_reward += outcome.reward;
    }
}

/// Owns the active [`WorldState`] and exposes the reset/step interface.
///
/// Contract violations (stepping before the first reset, stepping a
/// terminal episode, passing an out-of-range action index) are rejected
/// with a [`StepError`] before anything is mutated.
///
/// # Example
///
/// ```
/// use flappy_engine::{Action, EpisodeController, ScriptedGapSource, WorldConfig};
///
/// let mut controller =
///     EpisodeController::with_source(WorldConfig::default(), ScriptedGapSource::constant(300))?;
///
/// let observation = controller.reset();
/// assert_eq!(observation.as_array(), &[256.0, 0.0, 288.0, 300.0]);
///
/// let outcome = controller.step(Action::Idle).unwrap();
/// assert_eq!(outcome.observation.bird_y(), 256.5);
/// assert!(!outcome.terminal);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct EpisodeController<S = SeededGapSource> {
    config: WorldConfig,
    source: S,
    state: Option<WorldState>,
    stats: EpisodeStats,
}

impl EpisodeController<SeededGapSource> {
    /// Creates a controller whose gap placement is seeded from the thread-local generator.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        Self::with_source(config, SeededGapSource::new())
    }
}

impl<S> EpisodeController<S>
where
    S: GapSource,
{
    /// Creates a controller drawing gap centers from `source`.
    ///
    /// No episode is active until [`Self::reset`] is called. The
    /// configuration is validated here so that later steps cannot fail on it.
    pub fn with_source(config: WorldConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            state: None,
            stats: EpisodeStats::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The active world state, if an episode has been started.
    ///
    /// Renderers read the state through this accessor.
    #[must_use]
    pub fn state(&self) -> Option<&WorldState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_some_and(|state| state.terminal)
    }

    /// Starts a new episode, abandoning the current one if any.
    pub fn reset(&mut self) -> Observation {
        let gap_center_y = self
            .source
            .sample_gap_center(self.config.gap_center_range());
        let state = WorldState::new(&self.config, f32::from(gap_center_y));
        self.reset_from(state)
    }

    /// Starts a new episode from an explicit world state.
    pub fn reset_from(&mut self, state: WorldState) -> Observation {
        log::trace!("episode reset: {state:?}");
        self.stats = EpisodeStats::new();
        let observation = Observation::encode(&state);
        self.state = Some(state);
        observation
    }

    /// Advances the active episode by one tick.
    pub fn step(&mut self, action: Action) -> Result<StepOutcome, StepError> {
        let state = self.state.as_mut().ok_or(StepError::NotStarted)?;
        if state.terminal {
            return Err(StepError::EpisodeTerminated);
        }

        let outcome = simulation::advance(state, action, &self.config, &mut self.source);
        self.stats.record_tick(&outcome);
        log::trace!(
            "tick {}: action={action:?} reward={} state={state:?}",
            self.stats.ticks(),
            outcome.reward
        );
        if let Some(kind) = outcome.collision {
            log::debug!(
                "episode terminated by {kind} collision after {} ticks: score={}, return={}",
                self.stats.ticks(),
                state.score,
                self.stats.total_reward()
            );
        }

        Ok(StepOutcome {
            observation: Observation::encode(state),
            reward: outcome.reward,
            terminal: outcome.terminal,
        })
    }

    /// Like [`Self::step`], but takes a raw action index.
    pub fn step_index(&mut self, index: usize) -> Result<StepOutcome, StepError> {
        let action = Action::from_index(index)?;
        self.step(action)
    }
}
