//! Outline assembly: title extraction and heading selection.

use std::collections::HashSet;

use crate::error::Result;
use crate::model::{validate_runs, Heading, Outline, TextRun};

use super::levels::LevelMapping;
use super::options::OutlineOptions;
use super::validator::is_plausible_heading_with_limit;

/// Page whose title-sized lines form the document title.
const TITLE_PAGE: u32 = 0;

/// Builds an [`Outline`] from a document's runs.
#[derive(Debug, Clone, Default)]
pub struct OutlineAssembler {
    options: OutlineOptions,
}

impl OutlineAssembler {
    /// Create an assembler with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an assembler with custom options.
    pub fn with_options(options: OutlineOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Validate the runs, rank their sizes and assemble the outline.
    ///
    /// Fails with [`crate::Error::MalformedInput`] if any run has an unusable
    /// size; an empty run sequence yields an empty outline.
    pub fn assemble(&self, runs: &[TextRun]) -> Result<Outline> {
        validate_runs(runs)?;
        let mapping = LevelMapping::build_with_options(runs, &self.options.levels);
        Ok(self.assemble_with_mapping(runs, &mapping))
    }

    /// Assemble using a mapping built earlier from the same runs.
    pub fn assemble_with_mapping(&self, runs: &[TextRun], mapping: &LevelMapping) -> Outline {
        let outline = Outline {
            title: extract_title(runs, mapping),
            headings: self.extract_headings(runs, mapping),
        };
        log::debug!(
            "Assembled outline: title={:?}, {} headings from {} runs",
            outline.title,
            outline.headings.len(),
            runs.len()
        );
        outline
    }

    fn extract_headings(&self, runs: &[TextRun], mapping: &LevelMapping) -> Vec<Heading> {
        let mut seen: HashSet<(&str, u32)> = HashSet::new();
        let mut headings = Vec::new();

        for run in runs {
            let text = run.line_text.trim();
            if !is_plausible_heading_with_limit(text, self.options.max_heading_chars) {
                continue;
            }
            // Title lines still claim their (text, page) slot.
            if !seen.insert((text, run.page)) {
                continue;
            }
            match mapping.level_for(run) {
                Some(level) if !level.is_title() => {
                    headings.push(Heading::new(level, text, run.page));
                }
                _ => {}
            }
        }

        headings
    }
}

/// Join the distinct title-level lines of the first page, in encounter order.
fn extract_title(runs: &[TextRun], mapping: &LevelMapping) -> String {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut lines: Vec<&str> = Vec::new();

    for run in runs.iter().filter(|r| r.page == TITLE_PAGE) {
        let is_title = mapping.level_for(run).is_some_and(|l| l.is_title());
        if is_title && seen.insert(run.line_text.as_str()) {
            lines.push(&run.line_text);
        }
    }

    lines.join(" ").trim().to_string()
}

/// Assemble an outline with default options.
pub fn assemble(runs: &[TextRun]) -> Result<Outline> {
    OutlineAssembler::new().assemble(runs)
}
