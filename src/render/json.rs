//! JSON rendering for outlines and run dumps.

use crate::error::{Error, Result};
use crate::model::{Outline, RawTextRun, TextRun};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

fn serialize<T: serde::Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };
    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Render an outline as `{"title": ..., "outline": [...]}`.
pub fn to_json(outline: &Outline, format: JsonFormat) -> Result<String> {
    serialize(outline, format)
}

/// Render a run sequence as a JSON array.
pub fn runs_to_json(runs: &[TextRun], format: JsonFormat) -> Result<String> {
    serialize(runs, format)
}

/// Parse a JSON run array, validating every run.
///
/// Structural problems are [`Error::Json`]; a run with a negative page,
/// a bad size or missing text is [`Error::MalformedInput`].
pub fn runs_from_json(json: &str) -> Result<Vec<TextRun>> {
    let raw: Vec<RawTextRun> = serde_json::from_str(json)?;
    raw.into_iter()
        .enumerate()
        .map(|(index, run)| run.into_run(index))
        .collect()
}
