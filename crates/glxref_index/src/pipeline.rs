//! End-to-end index run: header → corpus discovery → occurrence scan → export.

use crate::config::IndexConfig;
use crate::corpus;
use crate::error::Result;
use crate::export;
use crate::header::HeaderIndexer;
use crate::scanner::OccurrenceScanner;
use crate::types::{CorpusFile, ScanReport, SymbolIndex};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Everything produced by one run, before anything is written.
#[derive(Debug)]
pub struct IndexRun {
    pub index: SymbolIndex,
    pub report: ScanReport,
    pub corpus: Vec<CorpusFile>,
    pub header_path: PathBuf,
    pub duration_ms: u64,
}

/// Resolve a configured path against the run root.
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Run both phases in memory.
pub fn build_index(config: &IndexConfig, root: &Path) -> Result<IndexRun> {
    config.validate()?;
    let start = Instant::now();

    let header_path = resolve(root, &config.header_path);
    let indexer = HeaderIndexer::new(&config.symbol_prefix, &config.default_category)?;
    let mut index = indexer.index_file(&header_path)?;

    let corpus = corpus::discover_in(root, &config.corpus_pattern)?;
    let scanner = OccurrenceScanner::new(&index)?;
    let report = scanner.scan(&mut index, &corpus, config.on_unreadable)?;

    Ok(IndexRun {
        index,
        report,
        corpus,
        header_path,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Run both phases and write the index. Nothing is written if either phase fails.
pub fn build_and_write(config: &IndexConfig, root: &Path) -> Result<(IndexRun, PathBuf)> {
    let run = build_index(config, root)?;
    let output_path = resolve(root, &config.output_path);
    export::write_index(&run.index, &output_path)?;
    Ok((run, output_path))
}
