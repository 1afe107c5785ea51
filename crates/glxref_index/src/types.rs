//! Core data types for the symbol index

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Label used for declarations that appear before any category comment.
pub const DEFAULT_CATEGORY: &str = "Misc";

/// One indexed symbol: the category it was declared under and the corpus
/// files that mention it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub category: String,
    pub files: Vec<String>,
}

impl SymbolEntry {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            files: Vec::new(),
        }
    }
}

/// Symbol name → entry, iterating in first-declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolIndex {
    symbols: IndexMap<String, SymbolEntry>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symbol unless it is already known.
    ///
    /// Returns `false` when the name was already present; the existing entry
    /// (and its category) is left untouched.
    pub fn insert_first(&mut self, name: &str, category: &str) -> bool {
        match self.symbols.entry(name.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(SymbolEntry::new(category));
                true
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SymbolEntry)> {
        self.symbols.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Symbol names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    /// Entry at a declaration-order position.
    pub(crate) fn entry_at_mut(&mut self, index: usize) -> Option<&mut SymbolEntry> {
        self.symbols.get_index_mut(index).map(|(_, entry)| entry)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in self.symbols.values() {
            if !seen.contains(&entry.category.as_str()) {
                seen.push(entry.category.as_str());
            }
        }
        seen
    }

    /// Symbols that no corpus file mentions.
    pub fn unreferenced(&self) -> impl Iterator<Item = (&str, &SymbolEntry)> {
        self.iter().filter(|(_, entry)| entry.files.is_empty())
    }
}

/// A corpus file resolved to its path and the basename recorded in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusFile {
    pub path: PathBuf,
    pub name: String,
}

impl CorpusFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = basename(&path);
        Self { path, name }
    }
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Outcome of the occurrence scan over the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub files_scanned: usize,
    pub bytes_scanned: u64,
    /// Files left out under the skip policy.
    pub files_skipped: Vec<PathBuf>,
    /// Total (symbol, file) pairs recorded.
    pub occurrences: usize,
}
