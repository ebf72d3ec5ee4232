//! Directory batch processing.
//!
//! Every PDF in a directory is turned into `<stem>.json` in the output
//! directory. Documents are independent: they run on the rayon pool when
//! `parallel` is set, and a failing document is recorded in the report
//! without stopping the others.

use std::fs;
use std::path::{Path, PathBuf};

use crossbeam_channel::unbounded;
use rayon::prelude::*;

use crate::analysis::{OutlineAssembler, OutlineOptions};
use crate::error::{Error, Result};
use crate::parser::{ExtractOptions, RunExtractor};
use crate::render::{to_json, JsonFormat};

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory receiving one JSON file per document
    pub output_dir: PathBuf,
    /// JSON layout of the written files
    pub format: JsonFormat,
    /// Whether documents are processed concurrently
    pub parallel: bool,
    /// Run extraction options applied to every document
    pub extract: ExtractOptions,
    /// Outline options applied to every document
    pub outline: OutlineOptions,
}

impl BatchOptions {
    /// Create batch options writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            format: JsonFormat::Pretty,
            parallel: true,
            extract: ExtractOptions::default(),
            outline: OutlineOptions::default(),
        }
    }

    /// Set the JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Process documents one at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }

    /// Set outline options.
    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.outline = options;
        self
    }
}

/// Progress notification for one document.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    /// Processing of a document began
    Started(PathBuf),
    /// The outline was written
    Finished {
        input: PathBuf,
        output: PathBuf,
        headings: usize,
    },
    /// The document failed; the batch continues
    Failed { input: PathBuf, error: String },
}

/// Result for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentOutcome {
    /// Source PDF
    pub input: PathBuf,
    /// Written JSON file, or the failure message
    pub result: std::result::Result<PathBuf, String>,
    /// Number of headings written (0 on failure)
    pub headings: usize,
}

impl DocumentOutcome {
    /// Whether the document was processed.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Summary of a batch run, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub documents: Vec<DocumentOutcome>,
}

impl BatchReport {
    /// Number of documents written.
    pub fn succeeded(&self) -> usize {
        self.documents.iter().filter(|d| d.is_ok()).count()
    }

    /// Number of documents that failed.
    pub fn failed(&self) -> usize {
        self.documents.len() - self.succeeded()
    }

    /// Failed documents.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.documents.iter().filter(|d| !d.is_ok())
    }
}

/// List the `.pdf` files (any case) directly inside `dir`, sorted by name.
pub fn scan_pdfs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Path of the JSON file written for `input`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(".json");
    output_dir.join(name)
}

/// Extract, assemble and write the outline of one document.
///
/// Returns the written path and the number of headings.
pub fn process_file(input: &Path, options: &BatchOptions) -> Result<(PathBuf, usize)> {
    let runs = RunExtractor::open_with_options(input, options.extract.clone())?.extract()?;
    let outline = OutlineAssembler::with_options(options.outline.clone()).assemble(&runs)?;
    let json = to_json(&outline, options.format)?;

    let output = output_path_for(input, &options.output_dir);
    fs::write(&output, json)?;
    Ok((output, outline.headings.len()))
}

/// Process every PDF in `input_dir`, reporting progress through `on_event`.
///
/// Events arrive on the calling thread while workers run. Only failures to
/// list the input or create the output directory abort the batch.
pub fn process_directory<P, F>(
    input_dir: P,
    options: &BatchOptions,
    mut on_event: F,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    F: FnMut(&BatchEvent),
{
    let inputs = scan_pdfs(input_dir)?;
    fs::create_dir_all(&options.output_dir)?;
    log::info!(
        "Processing {} documents into {}",
        inputs.len(),
        options.output_dir.display()
    );

    let (tx, rx) = unbounded::<BatchEvent>();

    let documents = std::thread::scope(|scope| {
        let worker = scope.spawn(move || {
            let run_one = |input: &PathBuf| {
                let _ = tx.send(BatchEvent::Started(input.clone()));
                match process_file(input, options) {
                    Ok((output, headings)) => {
                        let _ = tx.send(BatchEvent::Finished {
                            input: input.clone(),
                            output: output.clone(),
                            headings,
                        });
                        DocumentOutcome {
                            input: input.clone(),
                            result: Ok(output),
                            headings,
                        }
                    }
                    Err(e) => {
                        log::warn!("Failed to process {}: {}", input.display(), e);
                        let _ = tx.send(BatchEvent::Failed {
                            input: input.clone(),
                            error: e.to_string(),
                        });
                        DocumentOutcome {
                            input: input.clone(),
                            result: Err(e.to_string()),
                            headings: 0,
                        }
                    }
                }
            };

            if options.parallel {
                inputs.par_iter().map(run_one).collect::<Vec<_>>()
            } else {
                inputs.iter().map(run_one).collect::<Vec<_>>()
            }
        });

        // The worker owns the only sender; the loop ends when it finishes.
        for event in rx.iter() {
            on_event(&event);
        }
        worker.join()
    });

    let documents =
        documents.map_err(|_| Error::Other("batch worker panicked".to_string()))?;
    let report = BatchReport { documents };
    log::info!(
        "Batch finished: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_pdfs_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.pdf.bak"] {
            fs::write(dir.path().join(name), b"%PDF-1.4").unwrap();
        }
        fs::create_dir(dir.path().join("folder.pdf")).unwrap();

        let names: Vec<String> = scan_pdfs(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_scan_missing_dir() {
        assert!(scan_pdfs("/definitely/not/here").is_err());
    }

    #[test]
    fn test_output_path_for() {
        let out = output_path_for(Path::new("in/report.v2.pdf"), Path::new("out"));
        assert_eq!(out, PathBuf::from("out/report.v2.json"));
    }

    #[test]
    fn test_failures_are_isolated() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("broken.pdf"), b"garbage").unwrap();
        fs::write(input.path().join("truncated.pdf"), b"%PDF-1.4\n1 0 obj\n<<").unwrap();

        let mut events = Vec::new();
        let options = BatchOptions::new(output.path());
        let report =
            process_directory(input.path(), &options, |e| events.push(e.clone())).unwrap();

        assert_eq!(report.documents.len(), 2);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.succeeded(), 0);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, BatchEvent::Failed { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_empty_directory() {
        let input = tempfile::tempdir().unwrap();
        let output = input.path().join("out");
        let options = BatchOptions::new(&output).sequential();
        let report = process_directory(input.path(), &options, |_| {}).unwrap();
        assert!(report.documents.is_empty());
        assert!(output.is_dir());
    }
}
