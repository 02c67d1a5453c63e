//! Aggregate statistics over many episodes.
//!
//! # Example
//!
//! ```
//! use flappy_agent::evaluation::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([3.0, 1.0, 2.0]).unwrap();
//! assert_eq!(stats.min, 1.0);
//! assert_eq!(stats.median, 2.0);
//! assert_eq!(stats.mean, 2.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::rollout::EpisodeSummary;

/// Summary of a set of `f32` samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    /// Upper median for even-sized samples.
    pub median: f32,
    /// Population standard deviation.
    pub std_dev: f32,
}

impl DescriptiveStats {
    /// Returns `None` for an empty sample.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f32::total_cmp);
        Self::from_sorted(&values)
    }

    #[expect(clippy::cast_precision_loss)]
    fn from_sorted(sorted_values: &[f32]) -> Option<Self> {
        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let n = sorted_values.len() as f32;
        let mean = sorted_values.iter().sum::<f32>() / n;
        let median = sorted_values[sorted_values.len() / 2];
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f32>()
            / n;
        Some(Self {
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }
}

/// Results of evaluating a policy over several episodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub episodes: usize,
    /// Episodes that ended in a collision rather than at the tick limit.
    pub terminated: usize,
    pub best_score: u32,
    pub returns: DescriptiveStats,
    pub scores: DescriptiveStats,
    pub ticks: DescriptiveStats,
}

impl EvaluationSummary {
    /// Returns `None` if `summaries` is empty.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_summaries(summaries: &[EpisodeSummary]) -> Option<Self> {
        let returns = DescriptiveStats::new(summaries.iter().map(|s| s.total_reward))?;
        let scores = DescriptiveStats::new(summaries.iter().map(|s| s.score as f32))?;
        let ticks = DescriptiveStats::new(summaries.iter().map(|s| s.ticks as f32))?;
        Some(Self {
            episodes: summaries.len(),
            terminated: summaries.iter().filter(|s| s.terminated).count(),
            best_score: summaries.iter().map(|s| s.score).max().unwrap_or(0),
            returns,
            scores,
            ticks,
        })
    }
}
