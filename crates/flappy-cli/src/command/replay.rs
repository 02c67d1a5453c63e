use std::path::PathBuf;

use anyhow::{Context, ensure};
use flappy_agent::EpisodeSummary;
use flappy_engine::{EpisodeController, SeededGapSource};

use crate::{schema::record::RecordedEpisode, util};

/// Tolerance for comparing accumulated rewards.
const REWARD_EPSILON: f32 = 1e-3;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Path to the recording file (JSON format)
    recording_path: PathBuf,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg { recording_path } = arg;

    let recording: RecordedEpisode = util::read_json_file("recording", recording_path)?;

    eprintln!(
        "Replaying {} actions recorded at {} (seed {})...",
        recording.actions.len(),
        recording.recorded_at,
        recording.seed
    );
    let replayed = replay(&recording)?;
    verify(&recording.summary, &replayed)?;

    eprintln!(
        "Replay matches: ticks={} score={} reward={:.1}",
        replayed.ticks, replayed.score, replayed.total_reward
    );
    Ok(())
}

fn replay(recording: &RecordedEpisode) -> anyhow::Result<EpisodeSummary> {
    let mut controller = EpisodeController::with_source(
        recording.config,
        SeededGapSource::with_seed(recording.seed),
    )
    .context("Recording contains an invalid world configuration")?;
    let summary = flappy_agent::replay_actions(&mut controller, &recording.actions)
        .context("Failed to replay recorded actions")?;
    Ok(summary)
}

fn verify(expected: &EpisodeSummary, actual: &EpisodeSummary) -> anyhow::Result<()> {
    ensure!(
        expected.ticks == actual.ticks,
        "Tick count mismatch: recorded {}, replayed {}",
        expected.ticks,
        actual.ticks
    );
    ensure!(
        expected.score == actual.score,
        "Score mismatch: recorded {}, replayed {}",
        expected.score,
        actual.score
    );
    ensure!(
        expected.terminated == actual.terminated,
        "Termination mismatch: recorded {}, replayed {}",
        expected.terminated,
        actual.terminated
    );
    ensure!(
        (expected.total_reward - actual.total_reward).abs() <= REWARD_EPSILON,
        "Total reward mismatch: recorded {}, replayed {}",
        expected.total_reward,
        actual.total_reward
    );
    Ok(())
}
