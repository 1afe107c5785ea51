//! Occurrence scanner
//!
//! For each corpus file (in corpus order) the content is read once and split
//! into maximal runs of identifier characters. A symbol occurs in the file iff
//! one of those runs equals its name, which is exactly a substring match bounded
//! by non-identifier characters on both sides. `glColor` therefore never matches
//! inside `glColor3f`.

use crate::error::{IndexError, Result};
use crate::types::{CorpusFile, ScanReport, SymbolIndex};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

const IDENTIFIER_RUN: &str = r"[A-Za-z0-9_]+";

/// What to do with a corpus file that cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnreadablePolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Log a warning, record the file in the report and keep going.
    Skip,
}

impl UnreadablePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnreadablePolicy::Abort => "abort",
            UnreadablePolicy::Skip => "skip",
        }
    }
}

impl fmt::Display for UnreadablePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnreadablePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(UnreadablePolicy::Abort),
            "skip" => Ok(UnreadablePolicy::Skip),
            other => Err(format!("unknown policy '{}': expected abort or skip", other)),
        }
    }
}

/// Matcher over the names of an already-built index.
pub struct OccurrenceScanner {
    identifier_re: Regex,
    slots: HashMap<String, usize>,
}

impl OccurrenceScanner {
    pub fn new(index: &SymbolIndex) -> Result<Self> {
        let identifier_re = Regex::new(IDENTIFIER_RUN)
            .map_err(|e| IndexError::Pattern(format!("{}: {}", IDENTIFIER_RUN, e)))?;
        let slots = index
            .names()
            .enumerate()
            .map(|(slot, name)| (name.to_string(), slot))
            .collect();
        Ok(Self {
            identifier_re,
            slots,
        })
    }

    /// Declaration-order positions of every known symbol occurring in `text`.
    pub fn matches_in(&self, text: &str) -> Vec<usize> {
        let mut hit = vec![false; self.slots.len()];
        for token in self.identifier_re.find_iter(text) {
            if let Some(&slot) = self.slots.get(token.as_str()) {
                hit[slot] = true;
            }
        }
        hit.iter()
            .enumerate()
            .filter_map(|(slot, &found)| found.then_some(slot))
            .collect()
    }

    /// Scan every corpus file and append basenames to the matching entries.
    pub fn scan(
        &self,
        index: &mut SymbolIndex,
        corpus: &[CorpusFile],
        policy: UnreadablePolicy,
    ) -> Result<ScanReport> {
        let mut report = ScanReport::default();

        for file in corpus {
            let bytes = match std::fs::read(&file.path) {
                Ok(bytes) => bytes,
                Err(e) => match policy {
                    UnreadablePolicy::Abort => return Err(IndexError::input(&file.path, e)),
                    UnreadablePolicy::Skip => {
                        tracing::warn!(
                            path = %file.path.display(),
                            error = %e,
                            "Skipping unreadable corpus file"
                        );
                        report.files_skipped.push(file.path.clone());
                        continue;
                    }
                },
            };
            // Identifiers are ASCII, so lossy decoding cannot create or hide a match.
            let text = String::from_utf8_lossy(&bytes);
            let slots = self.matches_in(&text);

            for &slot in &slots {
                if let Some(entry) = index.entry_at_mut(slot) {
                    entry.files.push(file.name.clone());
                }
            }

            tracing::debug!(
                file = %file.path.display(),
                symbols = slots.len(),
                "Scanned corpus file"
            );
            report.files_scanned += 1;
            report.bytes_scanned += bytes.len() as u64;
            report.occurrences += slots.len();
        }

        tracing::info!(
            files = report.files_scanned,
            skipped = report.files_skipped.len(),
            occurrences = report.occurrences,
            "Scanned corpus"
        );
        Ok(report)
    }
}

/// Build a scanner for `index` and run it over `corpus`.
pub fn scan_corpus(
    index: &mut SymbolIndex,
    corpus: &[CorpusFile],
    policy: UnreadablePolicy,
) -> Result<ScanReport> {
    let scanner = OccurrenceScanner::new(index)?;
    scanner.scan(index, corpus, policy)
}
