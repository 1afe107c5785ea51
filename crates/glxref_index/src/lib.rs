//! glxref index - Header Declarations & Corpus Cross-Reference
//!
//! Builds a static map from every function symbol declared in an API header to
//! the category comment it sits under and the source files that mention it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Header    │     │   Corpus    │     │ Occurrence  │     │   Export    │
//! │ (category + │────▶│ (glob, by   │────▶│  Scanner    │────▶│ (atomic     │
//! │  symbols)   │     │  basename)  │     │ (boundary)  │     │   JSON)     │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Core Concepts
//!
//! - **Symbol**: a `<prefix>name(` declaration found in the header
//! - **Category**: label of the last single-line `/* ... */` comment before it
//! - **Corpus**: source files whose text is searched for each symbol
//! - **Word-boundary match**: an occurrence not adjacent to `[A-Za-z0-9_]`

pub mod config;
pub mod corpus;
pub mod coverage;
pub mod error;
pub mod export;
pub mod header;
pub mod pipeline;
pub mod scanner;
pub mod types;

// Re-exports for convenience
pub use config::IndexConfig;
pub use coverage::{coverage_by_category, CategoryCoverage};
pub use error::{IndexError, Result};
pub use export::{load_index, render_index, write_index};
pub use header::{HeaderIndexer, HeaderScan, LineKind};
pub use pipeline::{build_and_write, build_index, IndexRun};
pub use scanner::{scan_corpus, OccurrenceScanner, UnreadablePolicy};
pub use types::{CorpusFile, ScanReport, SymbolEntry, SymbolIndex, DEFAULT_CATEGORY};
