//! # pdf-outline
//!
//! Infer a document title and a leveled heading outline from the font sizes
//! of a PDF's text.
//!
//! Documents without structure tags still tend to set titles and headings in
//! larger type than body text. This crate extracts every text run with its
//! size and enclosing line, ranks the distinct line sizes (largest = title,
//! next = H1, ...), filters lines by shape and assembles a deduplicated
//! outline.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outline::{extract_outline, render};
//!
//! fn main() -> pdf_outline::Result<()> {
//!     let outline = extract_outline("document.pdf")?;
//!     println!("{}", render::to_json(&outline, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! The inference stage works on plain [`TextRun`] values, so runs from any
//! source can be fed to [`outline_from_runs`].

pub mod analysis;
pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use analysis::{
    assemble, build_mapping, is_plausible_heading, LevelMapping, LevelOptions, OutlineAssembler,
    OutlineOptions, RankingPolicy,
};
pub use batch::{process_directory, BatchEvent, BatchOptions, BatchReport};
pub use error::{Error, Result};
pub use model::{FontSize, Heading, Level, Outline, TextRun};
pub use parser::{ErrorMode, ExtractOptions, PageSelection, RunExtractor};
pub use render::JsonFormat;

use std::path::Path;

/// Extract the text runs of a PDF file.
///
/// # Example
///
/// ```no_run
/// let runs = pdf_outline::extract_runs("document.pdf").unwrap();
/// println!("{} runs", runs.len());
/// ```
pub fn extract_runs<P: AsRef<Path>>(path: P) -> Result<Vec<TextRun>> {
    RunExtractor::open(path)?.extract()
}

/// Extract the text runs of a PDF file with custom options.
pub fn extract_runs_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<Vec<TextRun>> {
    RunExtractor::open_with_options(path, options)?.extract()
}

/// Infer the outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::extract_outline;
///
/// let outline = extract_outline("document.pdf").unwrap();
/// for heading in &outline.headings {
///     println!("{} {} (page {})", heading.level, heading.text, heading.page);
/// }
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<Outline> {
    PdfOutline::new().extract(path)
}

/// Infer the outline of a PDF held in memory.
pub fn extract_outline_from_bytes(data: &[u8]) -> Result<Outline> {
    PdfOutline::new().extract_bytes(data)
}

/// Infer an outline from runs produced elsewhere.
///
/// # Example
///
/// ```
/// use pdf_outline::{outline_from_runs, Level, TextRun};
///
/// let runs = vec![
///     TextRun::new("Annual Report", 24.0, 0),
///     TextRun::new("Summary", 14.0, 0),
///     TextRun::new("Revenue grew.", 10.0, 0),
/// ];
/// let outline = outline_from_runs(&runs).unwrap();
/// assert_eq!(outline.title, "Annual Report");
/// assert_eq!(outline.headings[0].level, Level::H1);
/// ```
pub fn outline_from_runs(runs: &[TextRun]) -> Result<Outline> {
    assemble(runs)
}

/// Infer the outline of a PDF file on tokio's blocking pool.
#[cfg(feature = "async")]
pub async fn extract_outline_async<P: AsRef<Path>>(path: P) -> Result<Outline> {
    let path = path.as_ref().to_path_buf();
    tokio::task::spawn_blocking(move || extract_outline(path))
        .await
        .map_err(|e| Error::Other(format!("outline task failed: {}", e)))?
}

/// Builder combining extraction and outline options.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::{PageSelection, PdfOutline};
///
/// let outline = PdfOutline::new()
///     .lenient()
///     .with_pages(PageSelection::Range(1..=20))
///     .with_max_heading_chars(120)
///     .extract("document.pdf")?;
/// # Ok::<(), pdf_outline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PdfOutline {
    extract_options: ExtractOptions,
    outline_options: OutlineOptions,
}

impl PdfOutline {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip pages that fail to decode.
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Decode pages on the current thread only.
    pub fn sequential(mut self) -> Self {
        self.extract_options = self.extract_options.sequential();
        self
    }

    /// Restrict extraction to some pages (1-indexed).
    ///
    /// Levels are ranked over the selected pages only, and the title is
    /// empty unless page 1 is selected.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.extract_options = self.extract_options.with_pages(pages);
        self
    }

    /// Set the rank ordering policy.
    pub fn with_ranking(mut self, ranking: RankingPolicy) -> Self {
        self.outline_options = self.outline_options.with_ranking(ranking);
        self
    }

    /// Set the longest accepted heading.
    pub fn with_max_heading_chars(mut self, max: usize) -> Self {
        self.outline_options = self.outline_options.with_max_heading_chars(max);
        self
    }

    /// Replace the extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Replace the outline options.
    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.outline_options = options;
        self
    }

    /// Extract runs from a PDF file.
    pub fn runs<P: AsRef<Path>>(&self, path: P) -> Result<Vec<TextRun>> {
        RunExtractor::open_with_options(path, self.extract_options.clone())?.extract()
    }

    /// Infer the outline of a PDF file.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<Outline> {
        let runs = self.runs(path)?;
        self.assemble(&runs)
    }

    /// Infer the outline of a PDF held in memory.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<Outline> {
        let runs =
            RunExtractor::from_bytes_with_options(data, self.extract_options.clone())?.extract()?;
        self.assemble(&runs)
    }

    /// Assemble an outline from runs with this builder's outline options.
    pub fn assemble(&self, runs: &[TextRun]) -> Result<Outline> {
        OutlineAssembler::with_options(self.outline_options.clone()).assemble(runs)
    }
}
