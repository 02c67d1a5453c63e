use std::{
    fs::{self, File},
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Utc};
use flappy_agent::{EpisodeSummary, PolicyKind};
use flappy_engine::{Action, WorldConfig, WorldSeed};
use serde::{Deserialize, Serialize};

/// A played episode with everything needed to re-simulate it.
///
/// Gap placement is fully determined by `seed`, so the action list alone
/// reproduces the episode; the policy that produced it is informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedEpisode {
    /// Timestamp when the recording was created (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// Seed of the gap source
    pub seed: WorldSeed,
    /// Policy that chose the actions
    pub policy: PolicyKind,
    /// World constants the episode was played with
    pub config: WorldConfig,
    /// Final numbers at the time of recording
    pub summary: EpisodeSummary,
    /// Action taken on every tick, in order
    pub actions: Vec<Action>,
}

impl RecordedEpisode {
    /// Writes the recording as pretty JSON into `record_dir` and returns the file path.
    pub fn save(&self, record_dir: &Path, index: usize) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(record_dir)
            .with_context(|| format!("Failed to create directory {}", record_dir.display()))?;

        let filename = format!(
            "{}_{}_{index:04}.json",
            self.policy,
            self.recorded_at.format("%Y%m%d_%H%M%S")
        );
        let filepath = record_dir.join(filename);

        let file = File::create(&filepath)
            .with_context(|| format!("Failed to create file: {}", filepath.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .with_context(|| format!("Failed to write JSON to {}", filepath.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush output to {}", filepath.display()))?;

        Ok(filepath)
    }
}
