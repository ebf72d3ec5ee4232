//! Text runs and rounded font sizes.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Decimal places used when rounding font sizes into mapping keys.
pub const DEFAULT_SIZE_PRECISION: u8 = 1;

/// A font size rounded to a fixed number of decimal places.
///
/// Stored as an integer count of the rounding unit so it can be hashed and
/// ordered exactly. Two sizes that round to the same value are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontSize {
    scaled: i64,
    precision: u8,
}

impl FontSize {
    /// Round `points` to `precision` decimal places, halves to even.
    pub fn round(points: f32, precision: u8) -> Self {
        let factor = 10f64.powi(i32::from(precision));
        Self {
            scaled: (f64::from(points) * factor).round_ties_even() as i64,
            precision,
        }
    }

    /// Round `points` to one decimal place.
    pub fn from_points(points: f32) -> Self {
        Self::round(points, DEFAULT_SIZE_PRECISION)
    }

    /// The rounded size in points.
    pub fn points(&self) -> f32 {
        (self.scaled as f64 / 10f64.powi(i32::from(self.precision))) as f32
    }

    /// Number of decimal places this size was rounded to.
    pub fn precision(&self) -> u8 {
        self.precision
    }
}

impl std::fmt::Display for FontSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.*}", usize::from(self.precision), self.points())
    }
}

/// Round a raw size to one decimal place, as stored on extracted runs.
pub fn round_size(points: f32) -> f32 {
    FontSize::from_points(points).points()
}

/// A minimal unit of styled text on a page, annotated with its enclosing line.
///
/// All runs of one visual line share the same `line_text` and `line_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// Text of this run
    pub text: String,
    /// Font size in points (rounded to 0.1)
    pub font_size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Whether the font appears to be bold
    pub bold: bool,
    /// Page index, starting at 0
    pub page: u32,
    /// Text of the whole line, sibling runs joined by a space
    pub line_text: String,
    /// Largest font size among the line's runs (rounded to 0.1)
    pub line_size: f32,
}

impl TextRun {
    /// Create a run that forms a line on its own.
    pub fn new(text: impl Into<String>, font_size: f32, page: u32) -> Self {
        let text = text.into();
        Self {
            line_text: text.clone(),
            text,
            font_size,
            font_name: String::new(),
            bold: false,
            page,
            line_size: font_size,
        }
    }

    /// Set the enclosing line's text and size.
    pub fn with_line(mut self, line_text: impl Into<String>, line_size: f32) -> Self {
        self.line_text = line_text.into();
        self.line_size = line_size;
        self
    }

    /// Set the font name; boldness follows the name.
    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self.bold = is_bold_font(&self.font_name);
        self
    }

    /// The rounded line size used as a level key.
    pub fn line_key(&self, precision: u8) -> FontSize {
        FontSize::round(self.line_size, precision)
    }

    /// Check that sizes are usable for ranking.
    pub fn validate(&self, index: usize) -> Result<()> {
        check_size(index, "font size", f64::from(self.font_size))?;
        check_size(index, "line size", f64::from(self.line_size))
    }
}

/// Check every run in a sequence, failing on the first bad one.
pub fn validate_runs(runs: &[TextRun]) -> Result<()> {
    runs.iter()
        .enumerate()
        .try_for_each(|(index, run)| run.validate(index))
}

/// Number of pages spanned by a run sequence (highest page index + 1).
pub fn page_count(runs: &[TextRun]) -> u32 {
    runs.iter().map(|r| r.page + 1).max().unwrap_or(0)
}

/// Guess boldness from a font name.
pub fn is_bold_font(font_name: &str) -> bool {
    let lower = font_name.to_lowercase();
    lower.contains("bold") || lower.contains("black") || lower.contains("heavy")
}

fn check_size(index: usize, what: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::malformed(index, format!("{} is not finite", what)));
    }
    if value < 0.0 {
        return Err(Error::malformed(
            index,
            format!("{} is negative ({})", what, value),
        ));
    }
    Ok(())
}

/// A run as found in external JSON, before validation.
///
/// Every field a producer might get wrong is loosely typed here so the
/// problem surfaces as [`Error::MalformedInput`] instead of a decode error.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTextRun {
    #[serde(default)]
    pub text: Option<String>,
    pub font_size: f64,
    #[serde(default)]
    pub font_name: Option<String>,
    #[serde(default)]
    pub bold: bool,
    pub page: i64,
    #[serde(default)]
    pub line_text: Option<String>,
    pub line_size: f64,
}

impl RawTextRun {
    /// Validate and convert into a [`TextRun`].
    pub fn into_run(self, index: usize) -> Result<TextRun> {
        let text = self
            .text
            .ok_or_else(|| Error::malformed(index, "text is missing"))?;
        let line_text = self
            .line_text
            .ok_or_else(|| Error::malformed(index, "line text is missing"))?;
        if self.page < 0 {
            return Err(Error::malformed(
                index,
                format!("page is negative ({})", self.page),
            ));
        }
        let page = u32::try_from(self.page)
            .map_err(|_| Error::malformed(index, format!("page {} is too large", self.page)))?;
        check_size(index, "font size", self.font_size)?;
        check_size(index, "line size", self.line_size)?;

        Ok(TextRun {
            text,
            font_size: self.font_size as f32,
            font_name: self.font_name.unwrap_or_default(),
            bold: self.bold,
            page,
            line_text,
            line_size: self.line_size as f32,
        })
    }
}
