use std::path::PathBuf;

use clap::{Parser, Subcommand};
use flappy_agent::{PolicyKind, RandomPolicy};
use flappy_engine::WorldSeed;

use self::{config::ConfigArg, evaluate::EvaluateArg, replay::ReplayArg, run::RunArg};
use crate::{driver::EpisodeSettings, util};

mod config;
mod evaluate;
mod replay;
mod run;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play episodes and print a line per episode
    Run(#[clap(flatten)] RunArg),
    /// Play episodes and write aggregate statistics as JSON
    Evaluate(#[clap(flatten)] EvaluateArg),
    /// Re-simulate a recorded episode and check it matches
    Replay(#[clap(flatten)] ReplayArg),
    /// Print the effective world configuration as JSON
    Config(#[clap(flatten)] ConfigArg),
}

/// Options shared by every mode that plays episodes.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EpisodeArg {
    /// World configuration file (JSON); missing fields use the defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Master seed as 32 hex digits; random if omitted
    #[arg(long)]
    seed: Option<WorldSeed>,
    /// Policy choosing the actions (idle, random, gap-tracking)
    #[arg(long, default_value_t = PolicyKind::GapTracking)]
    policy: PolicyKind,
    /// Number of episodes to play
    #[arg(long, default_value_t = 1)]
    episodes: usize,
    /// Cut each episode off after this many ticks (0 disables the limit)
    #[arg(long, default_value_t = EpisodeArg::DEFAULT_MAX_TICKS)]
    max_ticks: u64,
    /// Per-tick flap probability of the random policy
    #[arg(long, default_value_t = RandomPolicy::DEFAULT_FLAP_PROBABILITY)]
    flap_probability: f64,
}

impl Default for EpisodeArg {
    fn default() -> Self {
        Self {
            config: None,
            seed: None,
            policy: PolicyKind::default(),
            episodes: 1,
            max_ticks: Self::DEFAULT_MAX_TICKS,
            flap_probability: RandomPolicy::DEFAULT_FLAP_PROBABILITY,
        }
    }
}

impl EpisodeArg {
    const DEFAULT_MAX_TICKS: u64 = 10_000;

    fn settings(&self) -> anyhow::Result<EpisodeSettings> {
        let config = util::load_world_config(self.config.as_deref())?;
        let settings = EpisodeSettings {
            config,
            policy: self.policy,
            flap_probability: self.flap_probability,
            max_ticks: (self.max_ticks > 0).then_some(self.max_ticks),
        };
        settings.validate()?;
        Ok(settings)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Run(RunArg::default())) {
        Mode::Run(arg) => run::run(&arg)?,
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
        Mode::Replay(arg) => replay::run(&arg)?,
        Mode::Config(arg) => config::run(&arg)?,
    }
    Ok(())
}
