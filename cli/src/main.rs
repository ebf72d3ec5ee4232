//! pdf-outline CLI - infer PDF heading outlines

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_outline::batch::{process_directory, scan_pdfs, BatchEvent, BatchOptions};
use pdf_outline::render::{runs_from_json, runs_to_json, to_json};
use pdf_outline::{
    model, ExtractOptions, JsonFormat, LevelMapping, OutlineAssembler, PageSelection, TextRun,
};

#[derive(Parser)]
#[command(name = "pdf-outline")]
#[command(version)]
#[command(about = "Infer a title and heading outline from PDF font sizes", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer the outline of a PDF as JSON
    Outline {
        /// Input PDF file (or run dump with --runs)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Page range (e.g., "1-10", "1,3,5"); levels are ranked over these pages only, and the title needs page 1
        #[arg(long)]
        pages: Option<String>,

        /// Treat FILE as a JSON run dump instead of a PDF
        #[arg(long)]
        runs: bool,

        /// Skip pages that fail to decode
        #[arg(long)]
        lenient: bool,
    },

    /// Dump the extracted text runs as JSON
    Runs {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Show how font sizes map to levels
    Levels {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Write one outline JSON per PDF in a directory
    Batch {
        /// Directory containing PDF files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Directory receiving JSON files
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Process one document at a time
        #[arg(long)]
        sequential: bool,
    },
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            output,
            compact,
            pages,
            runs,
            lenient,
        }) => cmd_outline(
            &input,
            output.as_deref(),
            compact,
            pages.as_deref(),
            runs,
            lenient,
        ),
        Some(Commands::Runs {
            input,
            output,
            pages,
        }) => cmd_runs(&input, output.as_deref(), pages.as_deref()),
        Some(Commands::Levels { input }) => cmd_levels(&input),
        Some(Commands::Batch {
            input,
            output,
            compact,
            sequential,
        }) => cmd_batch(&input, &output, compact, sequential),
        None => {
            if let Some(input) = cli.input {
                cmd_outline(&input, cli.output.as_deref(), false, None, false, false)
            } else {
                println!("{}", "Usage: pdf-outline <FILE>".yellow());
                println!("       pdf-outline --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn extract_options(pages: Option<&str>, lenient: bool) -> Result<ExtractOptions, String> {
    let selection = match pages {
        Some(p) => PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?,
        None => PageSelection::All,
    };
    let options = ExtractOptions::new().with_pages(selection);
    Ok(if lenient { options.lenient() } else { options })
}

fn load_runs(input: &Path, options: ExtractOptions) -> Result<Vec<TextRun>, pdf_outline::Error> {
    pdf_outline::extract_runs_with_options(input, options)
}

fn write_output(output: Option<&Path>, content: &str) -> CmdResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    pages: Option<&str>,
    from_runs: bool,
    lenient: bool,
) -> CmdResult {
    let runs = if from_runs {
        runs_from_json(&fs::read_to_string(input)?)?
    } else {
        load_runs(input, extract_options(pages, lenient)?)?
    };
    let outline = OutlineAssembler::new().assemble(&runs)?;
    log::info!(
        "{}: {} headings over {} pages",
        input.display(),
        outline.headings.len(),
        model::page_count(&runs)
    );

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    write_output(output, &to_json(&outline, format)?)
}

fn cmd_runs(input: &Path, output: Option<&Path>, pages: Option<&str>) -> CmdResult {
    let runs = load_runs(input, extract_options(pages, false)?)?;
    write_output(output, &runs_to_json(&runs, JsonFormat::Pretty)?)
}

fn cmd_levels(input: &Path) -> CmdResult {
    let runs = load_runs(input, ExtractOptions::new().lenient())?;
    let mapping = LevelMapping::build(&runs);

    println!("{}", "Font Levels".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), model::page_count(&runs));
    println!("{}: {}", "Runs".bold(), runs.len());
    println!();

    if mapping.is_empty() {
        println!("{}", "No text found".yellow());
        return Ok(());
    }

    for entry in mapping.entries() {
        println!(
            "  {:>6}  {:>8}pt  {} runs",
            entry.level.to_string().bold(),
            entry.size,
            entry.count
        );
    }

    Ok(())
}

fn cmd_batch(input: &Path, output: &Path, compact: bool, sequential: bool) -> CmdResult {
    let total = scan_pdfs(input)?.len() as u64;

    let mut options = BatchOptions::new(output).with_format(if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    });
    if sequential {
        options = options.sequential();
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = process_directory(input, &options, |event| match event {
        BatchEvent::Started(path) => pb.set_message(file_label(path)),
        BatchEvent::Finished { .. } => pb.inc(1),
        BatchEvent::Failed { input, error } => {
            pb.println(format!(
                "{} {}: {}",
                "Failed".red(),
                file_label(input),
                error
            ));
            pb.inc(1);
        }
    })?;
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} written, {} failed",
        "Batch complete:".green().bold(),
        report.succeeded(),
        report.failed()
    );
    for outcome in report.failures() {
        if let Err(e) = &outcome.result {
            println!("  {} {}: {}", "└─".dimmed(), file_label(&outcome.input), e);
        }
    }

    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
