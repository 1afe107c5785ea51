//! Declaration indexer
//!
//! Scans a header line by line. Single-line `/* ... */` comments set the
//! current category; every later line whose first `<prefix>name(` match names
//! an unseen symbol adds that symbol under the current category.
//!
//! The category is threaded through [`HeaderScan`], a fold accumulator, so
//! each line step is a plain function of (state, line).

use crate::error::{IndexError, Result};
use crate::types::SymbolIndex;
use regex::Regex;
use std::path::Path;

const CATEGORY_PATTERN: &str = r"^\s*/\*(.*?)\*/\s*$";

/// What a single header line contributes to the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A category marker; carries the trimmed label.
    Category(&'a str),
    /// A declaration; carries the symbol name.
    Declaration(&'a str),
    Other,
}

/// Compiled header matching rules.
#[derive(Debug, Clone)]
pub struct HeaderIndexer {
    category_re: Regex,
    declaration_re: Regex,
    default_category: String,
}

impl HeaderIndexer {
    /// Build an indexer for symbols starting with `prefix`.
    pub fn new(prefix: &str, default_category: &str) -> Result<Self> {
        validate_prefix(prefix)?;
        let declaration = format!(
            r"(?:^|[^A-Za-z0-9_])({}[A-Za-z0-9_]+)\s*\(",
            regex::escape(prefix)
        );
        let declaration_re = Regex::new(&declaration)
            .map_err(|e| IndexError::Pattern(format!("{}: {}", declaration, e)))?;
        let category_re = Regex::new(CATEGORY_PATTERN)
            .map_err(|e| IndexError::Pattern(format!("{}: {}", CATEGORY_PATTERN, e)))?;

        Ok(Self {
            category_re,
            declaration_re,
            default_category: default_category.to_string(),
        })
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    /// Classify one line. Category markers take precedence; a marker line is
    /// never also searched for a declaration.
    pub fn classify_line<'a>(&self, line: &'a str) -> LineKind<'a> {
        if let Some(caps) = self.category_re.captures(line) {
            if let Some(text) = caps.get(1) {
                // `/* a */ x /* b */` is two comments with code between, not a marker.
                if !text.as_str().contains("*/") {
                    return LineKind::Category(text.as_str().trim());
                }
            }
        }

        match self.declaration_re.captures(line).and_then(|caps| caps.get(1)) {
            Some(name) => LineKind::Declaration(name.as_str()),
            None => LineKind::Other,
        }
    }

    /// Index header text already in memory.
    ///
    /// `\n`, `\r\n` and a lone `\r` all end a line.
    pub fn index_str(&self, text: &str) -> SymbolIndex {
        text.split(['\n', '\r'])
            .fold(HeaderScan::new(&self.default_category), |scan, line| {
                scan.step(self.classify_line(line))
            })
            .finish()
    }

    /// Read and index a header file.
    pub fn index_file(&self, path: &Path) -> Result<SymbolIndex> {
        let content =
            std::fs::read_to_string(path).map_err(|e| IndexError::input(path, e))?;
        let index = self.index_str(&content);
        tracing::info!(
            header = %path.display(),
            symbols = index.len(),
            categories = index.categories().len(),
            "Indexed header declarations"
        );
        Ok(index)
    }
}

/// Accumulator for the header fold.
#[derive(Debug, Clone)]
pub struct HeaderScan {
    current_category: String,
    index: SymbolIndex,
    redeclarations: usize,
}

impl HeaderScan {
    pub fn new(default_category: &str) -> Self {
        Self {
            current_category: default_category.to_string(),
            index: SymbolIndex::new(),
            redeclarations: 0,
        }
    }

    /// Apply one classified line.
    pub fn step(mut self, line: LineKind<'_>) -> Self {
        match line {
            LineKind::Category(label) => {
                self.current_category = label.to_string();
            }
            LineKind::Declaration(name) => {
                if !self.index.insert_first(name, &self.current_category) {
                    tracing::debug!(symbol = name, "Ignoring repeated declaration");
                    self.redeclarations += 1;
                }
            }
            LineKind::Other => {}
        }
        self
    }

    pub fn current_category(&self) -> &str {
        &self.current_category
    }

    pub fn finish(self) -> SymbolIndex {
        if self.redeclarations > 0 {
            tracing::debug!(count = self.redeclarations, "Repeated declarations ignored");
        }
        self.index
    }
}

/// True when `s` is a non-empty ASCII C identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}

fn validate_prefix(prefix: &str) -> Result<()> {
    if is_identifier(prefix) {
        Ok(())
    } else {
        Err(IndexError::Pattern(format!(
            "symbol prefix '{}' must be a non-empty C identifier",
            prefix
        )))
    }
}
