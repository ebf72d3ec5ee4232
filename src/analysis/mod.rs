//! Heading-level inference.
//!
//! Three stages turn a document's text runs into an [`Outline`](crate::Outline):
//!
//! 1. [`LevelMapping`] ranks the distinct line sizes and assigns levels.
//! 2. [`is_plausible_heading`] filters lines by text shape.
//! 3. [`OutlineAssembler`] extracts the title and the deduplicated headings.
//!
//! Everything here is pure and synchronous; documents can be processed on
//! independent threads without coordination.

mod assembler;
mod levels;
mod options;
mod validator;

pub use assembler::{assemble, OutlineAssembler};
pub use levels::{build_mapping, LevelMapping, RankedSize};
pub use options::{LevelOptions, OutlineOptions, RankingPolicy};
pub use validator::{is_plausible_heading, is_plausible_heading_with_limit, MAX_HEADING_CHARS};
