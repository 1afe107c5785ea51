//! Config resolution shared by the index and coverage commands.
//!
//! Priority: CLI flags, then the config file (`--config` or `./glxref.toml`
//! under the root), then built-in defaults.

use crate::cli::error::HelpfulError;
use glxref_index::{IndexConfig, UnreadablePolicy};
use std::path::{Path, PathBuf};

/// Input overrides accepted by every command that runs the indexer
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InputArgs {
    /// Header file holding the declarations
    #[arg(long)]
    pub header: Option<PathBuf>,

    /// Glob selecting corpus files (e.g. "src/*.c")
    #[arg(long)]
    pub corpus: Option<String>,

    /// Prefix every declared symbol starts with
    #[arg(long)]
    pub prefix: Option<String>,

    /// Category for declarations before the first category comment
    #[arg(long)]
    pub default_category: Option<String>,

    /// Skip unreadable corpus files with a warning instead of aborting
    #[arg(long)]
    pub skip_unreadable: bool,
}

impl InputArgs {
    pub fn apply(&self, config: &mut IndexConfig) {
        if let Some(header) = &self.header {
            config.header_path = header.clone();
        }
        if let Some(corpus) = &self.corpus {
            config.corpus_pattern = corpus.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.symbol_prefix = prefix.clone();
        }
        if let Some(category) = &self.default_category {
            config.default_category = category.clone();
        }
        if self.skip_unreadable {
            config.on_unreadable = UnreadablePolicy::Skip;
        }
    }
}

/// Load the config file (if any) and apply CLI overrides
pub fn resolve_config(
    config_path: Option<&Path>,
    root: &Path,
    inputs: &InputArgs,
    output: Option<&Path>,
) -> Result<IndexConfig, HelpfulError> {
    let mut config = IndexConfig::discover(config_path, root)?;
    inputs.apply(&mut config);
    if let Some(output) = output {
        config.output_path = output.to_path_buf();
    }
    config.validate()?;
    Ok(config)
}
