//! Per-category coverage of an index: how many declared symbols the corpus
//! actually mentions.

use crate::types::SymbolIndex;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCoverage {
    pub category: String,
    pub symbols: usize,
    pub referenced: usize,
    /// Symbols with no corpus occurrence, in declaration order.
    pub unreferenced: Vec<String>,
}

impl CategoryCoverage {
    /// Percentage of referenced symbols; 100 for an empty category.
    pub fn percent(&self) -> f64 {
        if self.symbols == 0 {
            100.0
        } else {
            self.referenced as f64 * 100.0 / self.symbols as f64
        }
    }
}

/// Coverage grouped by category, in first-seen category order.
pub fn coverage_by_category(index: &SymbolIndex) -> Vec<CategoryCoverage> {
    let mut rows: Vec<CategoryCoverage> = index
        .categories()
        .into_iter()
        .map(|category| CategoryCoverage {
            category: category.to_string(),
            symbols: 0,
            referenced: 0,
            unreferenced: Vec::new(),
        })
        .collect();

    for (name, entry) in index.iter() {
        if let Some(row) = rows.iter_mut().find(|r| r.category == entry.category) {
            row.symbols += 1;
            if entry.files.is_empty() {
                row.unreferenced.push(name.to_string());
            } else {
                row.referenced += 1;
            }
        }
    }
    rows
}
