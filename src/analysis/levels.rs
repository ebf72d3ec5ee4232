//! Font-size to level mapping.
//!
//! Every run contributes its rounded line size to a histogram. Distinct sizes
//! are then ranked (largest first under the default policy) and the rank
//! decides the level: rank 0 is the title, rank `k` is `H<k>`.
//!
//! The mapping depends only on which sizes occur and how often, never on
//! run order.

use std::collections::HashMap;

use crate::model::{FontSize, Level, TextRun};

use super::options::LevelOptions;

/// One distinct line size with its rank information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedSize {
    /// Rounded line size
    pub size: FontSize,
    /// Number of runs carrying this line size
    pub count: usize,
    /// Level assigned from the rank
    pub level: Level,
}

/// Immutable size-to-level mapping for one document.
#[derive(Debug, Clone, Default)]
pub struct LevelMapping {
    ranked: Vec<RankedSize>,
    index: HashMap<FontSize, usize>,
    precision: u8,
}

impl LevelMapping {
    /// Build a mapping with default options.
    pub fn build(runs: &[TextRun]) -> Self {
        Self::build_with_options(runs, &LevelOptions::default())
    }

    /// Build a mapping from the line sizes of `runs`.
    pub fn build_with_options(runs: &[TextRun], options: &LevelOptions) -> Self {
        let mut histogram: HashMap<FontSize, usize> = HashMap::new();
        for run in runs {
            *histogram.entry(run.line_key(options.precision)).or_insert(0) += 1;
        }

        let mut sizes: Vec<(FontSize, usize)> = histogram.into_iter().collect();
        sizes.sort_by(|a, b| options.ranking.compare(a, b));

        let ranked: Vec<RankedSize> = sizes
            .into_iter()
            .enumerate()
            .map(|(rank, (size, count))| RankedSize {
                size,
                count,
                level: Level::from_rank(rank),
            })
            .collect();

        let index = ranked
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.size, i))
            .collect();

        log::debug!(
            "Level mapping: {}",
            ranked
                .iter()
                .map(|e| format!("{}pt x{} -> {}", e.size, e.count, e.level))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Self {
            ranked,
            index,
            precision: options.precision,
        }
    }

    /// Level of an already rounded size.
    pub fn level_of(&self, size: FontSize) -> Option<Level> {
        self.index.get(&size).map(|&i| self.ranked[i].level)
    }

    /// Level of a raw size in points.
    pub fn level_for_points(&self, points: f32) -> Option<Level> {
        self.level_of(FontSize::round(points, self.precision))
    }

    /// Level of a run's line.
    pub fn level_for(&self, run: &TextRun) -> Option<Level> {
        self.level_of(run.line_key(self.precision))
    }

    /// Entries in rank order.
    pub fn entries(&self) -> &[RankedSize] {
        &self.ranked
    }

    /// Size mapped to the title level, if any.
    pub fn title_size(&self) -> Option<FontSize> {
        self.ranked.first().map(|e| e.size)
    }

    /// Number of distinct sizes.
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// Whether no sizes were observed.
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Build a size-to-level mapping with default options.
pub fn build_mapping(runs: &[TextRun]) -> LevelMapping {
    LevelMapping::build(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RankingPolicy;

    fn runs_with_sizes(sizes: &[f32]) -> Vec<TextRun> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &s)| TextRun::new(format!("line {}", i), s, 0))
            .collect()
    }

    #[test]
    fn test_empty_mapping() {
        let mapping = build_mapping(&[]);
        assert!(mapping.is_empty());
        assert_eq!(mapping.title_size(), None);
    }

    #[test]
    fn test_single_size_is_title_only() {
        let mapping = build_mapping(&runs_with_sizes(&[11.0, 11.0, 11.0]));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.level_for_points(11.0), Some(Level::Title));
        assert!(mapping.entries().iter().all(|e| e.level.is_title()));
    }

    #[test]
    fn test_ranks_by_size_descending() {
        let mapping = build_mapping(&runs_with_sizes(&[24.0, 24.0, 18.0, 14.0, 14.0, 10.0]));
        assert_eq!(mapping.level_for_points(24.0), Some(Level::Title));
        assert_eq!(mapping.level_for_points(18.0), Some(Level::H1));
        assert_eq!(mapping.level_for_points(14.0), Some(Level::H2));
        assert_eq!(mapping.level_for_points(10.0), Some(Level::H3));
        assert_eq!(mapping.level_for_points(12.0), None);

        let counts: Vec<usize> = mapping.entries().iter().map(|e| e.count).collect();
        assert_eq!(counts, vec![2, 1, 2, 1]);
    }

    #[test]
    fn test_generic_levels_beyond_fifth_rank() {
        let mapping = build_mapping(&runs_with_sizes(&[30.0, 26.0, 22.0, 18.0, 16.0, 14.0, 12.0]));
        let labels: Vec<String> = mapping.entries().iter().map(|e| e.level.label()).collect();
        assert_eq!(labels, vec!["Title", "H1", "H2", "H3", "H4", "H5", "H6"]);
    }

    #[test]
    fn test_near_equal_sizes_share_a_level() {
        let mapping = build_mapping(&runs_with_sizes(&[11.96, 12.04, 12.0, 16.0]));
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.level_for_points(11.98), Some(Level::H1));
    }

    #[test]
    fn test_independent_of_run_order() {
        let mut runs = runs_with_sizes(&[10.0, 14.0, 24.0, 10.0, 18.0, 14.0]);
        let forward = build_mapping(&runs);
        runs.reverse();
        let backward = build_mapping(&runs);
        assert_eq!(forward.entries(), backward.entries());
    }

    #[test]
    fn test_frequency_policy() {
        let options = LevelOptions::new().with_ranking(RankingPolicy::FrequencyThenSize);
        let runs = runs_with_sizes(&[10.0, 10.0, 10.0, 14.0, 14.0, 9.0]);
        let mapping = LevelMapping::build_with_options(&runs, &options);
        assert_eq!(mapping.level_for_points(9.0), Some(Level::Title));
        assert_eq!(mapping.level_for_points(14.0), Some(Level::H1));
        assert_eq!(mapping.level_for_points(10.0), Some(Level::H2));
    }

    #[test]
    fn test_precision_option() {
        let options = LevelOptions::new().with_precision(0);
        let runs = runs_with_sizes(&[12.2, 11.8, 18.0]);
        let mapping = LevelMapping::build_with_options(&runs, &options);
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.level_for_points(12.3), Some(Level::H1));
    }
}
