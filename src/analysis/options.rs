//! Outline inference options.

use std::cmp::Ordering;

use crate::model::{FontSize, DEFAULT_SIZE_PRECISION};

use super::validator::MAX_HEADING_CHARS;

/// How distinct line sizes are ordered into ranks.
///
/// Ranking by size is a heuristic: larger text is assumed to be more
/// prominent. It is exposed as a policy so callers can experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingPolicy {
    /// Larger sizes first; equal sizes by occurrence count, most frequent first
    #[default]
    SizeThenFrequency,
    /// Rarer sizes first; equal counts by size, largest first
    FrequencyThenSize,
}

impl RankingPolicy {
    /// Order two `(size, occurrences)` entries; the lesser one ranks higher.
    pub fn compare(&self, a: &(FontSize, usize), b: &(FontSize, usize)) -> Ordering {
        match self {
            RankingPolicy::SizeThenFrequency => b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)),
            RankingPolicy::FrequencyThenSize => a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)),
        }
    }
}

/// Options for building a size-to-level mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelOptions {
    /// Decimal places line sizes are rounded to before counting
    pub precision: u8,
    /// Rank ordering policy
    pub ranking: RankingPolicy,
}

impl LevelOptions {
    /// Create level options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rounding precision.
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    /// Set the ranking policy.
    pub fn with_ranking(mut self, ranking: RankingPolicy) -> Self {
        self.ranking = ranking;
        self
    }
}

impl Default for LevelOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_SIZE_PRECISION,
            ranking: RankingPolicy::default(),
        }
    }
}

/// Options for assembling an outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineOptions {
    /// Size-to-level mapping options
    pub levels: LevelOptions,
    /// Longest accepted heading, in characters after trimming
    pub max_heading_chars: usize,
}

impl OutlineOptions {
    /// Create outline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level mapping options.
    pub fn with_levels(mut self, levels: LevelOptions) -> Self {
        self.levels = levels;
        self
    }

    /// Set the ranking policy.
    pub fn with_ranking(mut self, ranking: RankingPolicy) -> Self {
        self.levels.ranking = ranking;
        self
    }

    /// Set the size rounding precision.
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.levels.precision = precision;
        self
    }

    /// Set the maximum heading length.
    pub fn with_max_heading_chars(mut self, max: usize) -> Self {
        self.max_heading_chars = max;
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            levels: LevelOptions::default(),
            max_heading_chars: MAX_HEADING_CHARS,
        }
    }
}
