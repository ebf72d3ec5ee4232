//! Outline types: levels, headings and the per-document result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A structural rank assigned to a font size.
///
/// Rank 0 is the document title; rank `k >= 1` is the heading label `H<k>`.
/// Levels order by rank, so `Title < H1 < H2 < ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Level {
    /// Largest text in the document
    Title,
    /// Heading of the given rank (1 = H1)
    Heading(u32),
}

impl Level {
    pub const H1: Level = Level::Heading(1);
    pub const H2: Level = Level::Heading(2);
    pub const H3: Level = Level::Heading(3);
    pub const H4: Level = Level::Heading(4);
    pub const H5: Level = Level::Heading(5);

    /// Level for a zero-based size rank.
    pub fn from_rank(rank: usize) -> Self {
        match rank {
            0 => Level::Title,
            n => Level::Heading(u32::try_from(n).unwrap_or(u32::MAX)),
        }
    }

    /// Zero-based rank of this level.
    pub fn rank(&self) -> u32 {
        match self {
            Level::Title => 0,
            Level::Heading(n) => *n,
        }
    }

    /// Whether this is the title level.
    pub fn is_title(&self) -> bool {
        matches!(self, Level::Title)
    }

    /// Label used in serialized output ("Title", "H1", ...).
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Title => f.write_str("Title"),
            Level::Heading(n) => write!(f, "H{}", n),
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Title" {
            return Ok(Level::Title);
        }
        s.strip_prefix('H')
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .map(Level::Heading)
            .ok_or_else(|| format!("invalid level label: {:?}", s))
    }
}

impl TryFrom<String> for Level {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.to_string()
    }
}

/// One entry of the inferred outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (never [`Level::Title`])
    pub level: Level,
    /// Trimmed line text
    pub text: String,
    /// Page index, starting at 0
    pub page: u32,
}

impl Heading {
    /// Create a new heading.
    pub fn new(level: Level, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title plus ordered headings inferred for one document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Outline {
    /// Document title (empty when none was found)
    pub title: String,
    /// Headings in reading order
    #[serde(rename = "outline")]
    pub headings: Vec<Heading>,
}

impl Outline {
    /// Create an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether neither a title nor any heading was found.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.headings.is_empty()
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.headings.len()
    }

    /// Headings at a given level.
    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &Heading> {
        self.headings.iter().filter(move |h| h.level == level)
    }

    /// Headings anchored on a given page.
    pub fn on_page(&self, page: u32) -> impl Iterator<Item = &Heading> {
        self.headings.iter().filter(move |h| h.page == page)
    }
}
