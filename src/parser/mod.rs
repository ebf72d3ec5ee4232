//! Text run extraction from PDF documents.

mod backend;
mod extractor;
mod lines;
mod options;
mod spans;

pub use backend::{decode_text_simple, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue};
pub use extractor::RunExtractor;
pub use lines::{aggregate_page, group_into_lines, line_to_runs};
pub use options::{ErrorMode, ExtractOptions, PageSelection};
pub use spans::{PositionedSpan, SpanCollector};
