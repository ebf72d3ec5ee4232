//! Data model for outline inference.
//!
//! Text runs are the input produced by run extraction; levels, headings and
//! outlines are what the analysis stage produces from them.

mod outline;
mod run;

pub use outline::{Heading, Level, Outline};
pub use run::{
    is_bold_font, page_count, round_size, validate_runs, FontSize, RawTextRun, TextRun,
    DEFAULT_SIZE_PRECISION,
};
