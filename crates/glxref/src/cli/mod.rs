//! CLI module for glxref
//!
//! `index` writes the cross-reference, `coverage` reports unreferenced
//! symbols, `config` shows the resolved settings.

pub mod error;
pub mod output;

pub mod context;

pub mod config;
pub mod coverage;
pub mod index;

pub use context::{resolve_config, InputArgs};
