//! Index command - build and write the symbol cross-reference
//!
//! Runs the declaration indexer over the header, scans the corpus, and writes
//! the JSON index atomically. Prints a short summary on stdout.

use crate::cli::error::HelpfulError;
use crate::cli::output::{format_size, print_json};
use glxref_index::{build_and_write, IndexConfig, IndexRun};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Arguments for the index command
#[derive(Debug)]
pub struct IndexArgs {
    pub config: IndexConfig,
    pub root: PathBuf,
    pub json: bool,
}

/// Summary of a completed index run
#[derive(Debug, Serialize)]
pub struct IndexSummary {
    pub output: PathBuf,
    pub header: PathBuf,
    pub symbols: usize,
    pub categories: usize,
    pub corpus_files: usize,
    pub files_scanned: usize,
    pub files_skipped: Vec<PathBuf>,
    pub bytes_scanned: u64,
    pub occurrences: usize,
    pub unreferenced: usize,
    pub duration_ms: u64,
}

impl IndexSummary {
    pub fn from_run(run: &IndexRun, output: &Path) -> Self {
        Self {
            output: output.to_path_buf(),
            header: run.header_path.clone(),
            symbols: run.index.len(),
            categories: run.index.categories().len(),
            corpus_files: run.corpus.len(),
            files_scanned: run.report.files_scanned,
            files_skipped: run.report.files_skipped.clone(),
            bytes_scanned: run.report.bytes_scanned,
            occurrences: run.report.occurrences,
            unreferenced: run.index.unreferenced().count(),
            duration_ms: run.duration_ms,
        }
    }
}

/// Execute the index command
pub fn run(args: IndexArgs) -> anyhow::Result<()> {
    let (run, output) =
        build_and_write(&args.config, &args.root).map_err(HelpfulError::from)?;
    let summary = IndexSummary::from_run(&run, &output);

    if args.json {
        print_json(&summary)?;
    } else {
        output_text(&summary);
    }
    Ok(())
}

fn output_text(summary: &IndexSummary) {
    println!(
        "Indexed {} symbols in {} categories from {}",
        summary.symbols,
        summary.categories,
        summary.header.display()
    );
    println!(
        "Scanned {} of {} corpus files ({}), {} occurrences",
        summary.files_scanned,
        summary.corpus_files,
        format_size(summary.bytes_scanned),
        summary.occurrences
    );
    if summary.unreferenced > 0 {
        println!(
            "{} symbols have no corpus occurrences (see `glxref coverage`)",
            summary.unreferenced
        );
    }
    for skipped in &summary.files_skipped {
        println!("Skipped unreadable file: {}", skipped.display());
    }
    println!("Wrote {}", summary.output.display());
}
