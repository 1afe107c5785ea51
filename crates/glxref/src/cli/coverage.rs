//! Coverage command - which declared symbols the corpus never mentions
//!
//! Works either from a fresh in-memory run (nothing is written) or from an
//! index file written earlier by `glxref index`.

use crate::cli::error::HelpfulError;
use crate::cli::output::{color_for_percent, format_percent, print_json, print_table};
use glxref_index::pipeline::resolve;
use glxref_index::{build_index, coverage_by_category, load_index, CategoryCoverage, IndexConfig};
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the coverage command
#[derive(Debug)]
pub struct CoverageArgs {
    pub config: IndexConfig,
    pub root: PathBuf,
    /// Read this index instead of rebuilding one; relative to `root`
    pub from_index: Option<PathBuf>,
    pub category: Option<String>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct CoverageReport {
    pub symbols: usize,
    pub referenced: usize,
    pub categories: Vec<CategoryCoverage>,
}

impl CoverageReport {
    fn percent(&self) -> f64 {
        if self.symbols == 0 {
            100.0
        } else {
            self.referenced as f64 * 100.0 / self.symbols as f64
        }
    }
}

/// Execute the coverage command
pub fn run(args: CoverageArgs) -> anyhow::Result<()> {
    let index = match &args.from_index {
        Some(path) => load_index(&resolve(&args.root, path)).map_err(HelpfulError::from)?,
        None => {
            build_index(&args.config, &args.root)
                .map_err(HelpfulError::from)?
                .index
        }
    };

    let mut categories = coverage_by_category(&index);
    if let Some(wanted) = &args.category {
        if !categories.iter().any(|c| &c.category == wanted) {
            let known: Vec<&str> = categories.iter().map(|c| c.category.as_str()).collect();
            return Err(HelpfulError::unknown_category(wanted, &known).into());
        }
        categories.retain(|c| &c.category == wanted);
    }

    let report = CoverageReport {
        symbols: categories.iter().map(|c| c.symbols).sum(),
        referenced: categories.iter().map(|c| c.referenced).sum(),
        categories,
    };

    if args.json {
        print_json(&report)?;
    } else {
        output_table(&report);
    }
    Ok(())
}

fn output_table(report: &CoverageReport) {
    if report.categories.is_empty() {
        println!("No symbols indexed.");
        return;
    }

    let rows = report
        .categories
        .iter()
        .map(|c| {
            let percent = c.percent();
            vec![
                (c.category.clone(), None),
                (c.symbols.to_string(), None),
                (c.referenced.to_string(), None),
                (format_percent(percent), Some(color_for_percent(percent))),
            ]
        })
        .collect();
    print_table(&["Category", "Symbols", "Referenced", "Coverage"], rows);

    println!(
        "Total: {}/{} symbols referenced ({})",
        report.referenced,
        report.symbols,
        format_percent(report.percent())
    );

    for category in report.categories.iter().filter(|c| !c.unreferenced.is_empty()) {
        println!();
        println!("Unreferenced in {}:", category.category);
        for name in &category.unreferenced {
            println!("  {}", name);
        }
    }
}
