use std::path::PathBuf;

use anyhow::Context;
use flappy_agent::{EpisodeSummary, evaluation::EvaluationSummary};

use super::EpisodeArg;
use crate::{
    driver::{self, SeedSchedule},
    util::Output,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    #[clap(flatten)]
    episode: EpisodeArg,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let EvaluateArg { episode, output } = arg;

    let settings = episode.settings()?;
    let mut schedule = SeedSchedule::new(episode.seed);
    eprintln!(
        "Evaluating {} policy over {} episodes (master seed {})...",
        settings.policy,
        episode.episodes,
        schedule.master()
    );

    let played = driver::play_episodes(&settings, &mut schedule, episode.episodes, |_, _| Ok(()))?;
    let summaries = played
        .iter()
        .map(|p| p.rollout.summary)
        .collect::<Vec<EpisodeSummary>>();
    let evaluation =
        EvaluationSummary::from_summaries(&summaries).context("No episodes were played")?;

    eprintln!(
        "Mean return {:.2}, mean score {:.2}, best score {}",
        evaluation.returns.mean, evaluation.scores.mean, evaluation.best_score
    );
    Output::save_json(&evaluation, output.clone())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use flappy_agent::PolicyKind;
    use flappy_engine::WorldSeed;

    use super::*;
    use crate::util;

    #[test]
    fn test_writes_summary_json_to_output() {
        let dir = util::scratch_dir("evaluate");
        std::fs::create_dir_all(&dir).unwrap();
        let output = dir.join("evaluation.json");

        let arg = EvaluateArg {
            episode: EpisodeArg {
                seed: Some(WorldSeed::from_bytes([2; 16])),
                policy: PolicyKind::Idle,
                episodes: 4,
                ..EpisodeArg::default()
            },
            output: Some(output.clone()),
        };
        run(&arg).unwrap();

        let evaluation: EvaluationSummary = util::read_json_file("evaluation", &output).unwrap();
        assert_eq!(evaluation.episodes, 4);
        assert_eq!(evaluation.terminated, 4);
        assert_eq!(evaluation.best_score, 0);
        assert_eq!(evaluation.ticks.min, 23.0);
        assert_eq!(evaluation.ticks.max, 23.0);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_zero_episodes_is_an_error() {
        let arg = EvaluateArg {
            episode: EpisodeArg {
                episodes: 0,
                ..EpisodeArg::default()
            },
            output: None,
        };
        assert!(run(&arg).is_err());
    }
}
