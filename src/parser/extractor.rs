//! Text run extraction over a [`PdfBackend`].

use std::path::Path;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::TextRun;

use super::backend::{LopdfBackend, PageId, PdfBackend};
use super::lines::aggregate_page;
use super::options::{ErrorMode, ExtractOptions};
use super::spans::SpanCollector;

/// Produces the ordered run sequence of a document.
pub struct RunExtractor<B: PdfBackend> {
    backend: B,
    options: ExtractOptions,
}

impl RunExtractor<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        Ok(Self::with_options(LopdfBackend::load_file(path)?, options))
    }

    /// Read a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        Ok(Self::with_options(LopdfBackend::load_bytes(data)?, options))
    }
}

impl<B: PdfBackend> RunExtractor<B> {
    /// Wrap a backend with default options.
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, ExtractOptions::default())
    }

    /// Wrap a backend with custom options.
    pub fn with_options(backend: B, options: ExtractOptions) -> Self {
        Self { backend, options }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Extract runs from every selected page, in page order.
    ///
    /// Runs carry 0-based page indices. In lenient mode a page that fails to
    /// decode is logged and skipped.
    pub fn extract(&self) -> Result<Vec<TextRun>> {
        let pages: Vec<(u32, PageId)> = self
            .backend
            .pages()
            .into_iter()
            .filter(|(number, _)| self.options.pages.includes(*number))
            .collect();

        let per_page: Vec<(u32, Result<Vec<TextRun>>)> = if self.options.parallel {
            pages
                .par_iter()
                .map(|&(number, id)| (number, self.extract_page_id(number, id)))
                .collect()
        } else {
            pages
                .iter()
                .map(|&(number, id)| (number, self.extract_page_id(number, id)))
                .collect()
        };

        let mut runs = Vec::new();
        for (number, result) in per_page {
            match result {
                Ok(page_runs) => runs.extend(page_runs),
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping page {}: {}", number, e);
                }
                Err(e) => return Err(e),
            }
        }

        log::debug!("Extracted {} runs from {} pages", runs.len(), pages.len());
        Ok(runs)
    }

    /// Extract runs from one page (1-indexed).
    pub fn extract_page(&self, number: u32) -> Result<Vec<TextRun>> {
        let pages = self.backend.pages();
        let id = pages
            .get(&number)
            .copied()
            .ok_or(Error::PageOutOfRange(number, pages.len() as u32))?;
        self.extract_page_id(number, id)
    }

    fn extract_page_id(&self, number: u32, id: PageId) -> Result<Vec<TextRun>> {
        let operations = self.backend.page_operations(id)?;
        let collector = SpanCollector::new(&self.backend, id, self.options.normalize_unicode);
        let spans = collector.collect(&operations);
        Ok(aggregate_page(
            spans,
            number.saturating_sub(1),
            self.options.line_tolerance,
        ))
    }
}
