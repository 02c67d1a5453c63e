use std::path::PathBuf;

use chrono::Utc;

use super::EpisodeArg;
use crate::{
    driver::{self, SeedSchedule},
    schema::record::RecordedEpisode,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RunArg {
    #[clap(flatten)]
    pub(super) episode: EpisodeArg,
    /// Directory to save a recording of every episode into
    #[arg(long)]
    record_dir: Option<PathBuf>,
}

pub(crate) fn run(arg: &RunArg) -> anyhow::Result<()> {
    let RunArg {
        episode,
        record_dir,
    } = arg;

    let settings = episode.settings()?;
    let mut schedule = SeedSchedule::new(episode.seed);
    eprintln!("Master seed: {}", schedule.master());
    eprintln!("Policy: {}", settings.policy);

    let played = driver::play_episodes(
        &settings,
        &mut schedule,
        episode.episodes,
        |index, played| {
            let summary = &played.rollout.summary;
            let status = if summary.terminated {
                "crashed"
            } else {
                "cut off"
            };
            eprintln!(
                "Episode {index}: seed={} ticks={} score={} reward={:.1} ({status})",
                played.world_seed, summary.ticks, summary.score, summary.total_reward
            );

            if let Some(record_dir) = record_dir {
                let recording = RecordedEpisode {
                    recorded_at: Utc::now(),
                    seed: played.world_seed,
                    policy: settings.policy,
                    config: settings.config,
                    summary: *summary,
                    actions: played.rollout.actions.clone(),
                };
                let path = recording.save(record_dir, index)?;
                eprintln!("  Recording saved to {}", path.display());
            }
            Ok(())
        },
    )?;

    if let Some(best) = played.iter().map(|p| p.rollout.summary.score).max() {
        eprintln!("Best score: {best}");
    }

    Ok(())
}
