//! Corpus discovery via glob patterns.

use crate::error::{IndexError, Result};
use crate::types::CorpusFile;
use std::path::{Path, PathBuf};

/// Expand a glob pattern into the ordered list of corpus files.
///
/// Directories matched by the pattern are dropped. Anything else, including a
/// dangling symlink, is kept so the scanner reports it. The result is sorted by
/// basename, then by full path, so output does not depend on filesystem
/// enumeration order.
pub fn discover(pattern: &str) -> Result<Vec<CorpusFile>> {
    let entries = glob::glob(pattern)
        .map_err(|e| IndexError::Pattern(format!("{}: {}", pattern, e)))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => {
                if !path.is_dir() {
                    paths.push(path);
                }
            }
            Err(e) => {
                let path = e.path().to_path_buf();
                return Err(IndexError::input(path, e.into_error()));
            }
        }
    }

    let files = order_corpus(paths);
    tracing::debug!(pattern, files = files.len(), "Discovered corpus files");
    Ok(files)
}

/// Discover corpus files relative to `base` when the pattern is relative.
pub fn discover_in(base: &Path, pattern: &str) -> Result<Vec<CorpusFile>> {
    if Path::new(pattern).is_absolute() {
        return discover(pattern);
    }
    // glob escapes are only needed for the base; the pattern stays verbatim.
    let escaped_base = glob::Pattern::escape(&base.to_string_lossy());
    let joined = format!("{}/{}", escaped_base.trim_end_matches('/'), pattern);
    discover(&joined)
}

/// Sort paths into the canonical corpus order and drop exact duplicates.
pub fn order_corpus(paths: impl IntoIterator<Item = PathBuf>) -> Vec<CorpusFile> {
    let mut files: Vec<CorpusFile> = paths.into_iter().map(CorpusFile::new).collect();
    files.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
    files.dedup_by(|a, b| a.path == b.path);
    files
}
