//! Config command - show the resolved configuration

use crate::cli::output::print_json;
use glxref_index::config::DEFAULT_CONFIG_FILE;
use glxref_index::IndexConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Arguments for the config command
#[derive(Debug)]
pub struct ConfigArgs {
    pub config: IndexConfig,
    pub config_path: Option<PathBuf>,
    pub root: PathBuf,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ResolvedConfig<'a> {
    /// Config file that was read, if any
    source: Option<PathBuf>,
    root: &'a Path,
    #[serde(flatten)]
    config: &'a IndexConfig,
}

/// Which config file `IndexConfig::discover` would read
pub fn config_source(config_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
    match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let candidate = root.join(DEFAULT_CONFIG_FILE);
            candidate.is_file().then_some(candidate)
        }
    }
}

/// Run the config command
pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let source = config_source(args.config_path.as_deref(), &args.root);

    if args.json {
        return print_json(&ResolvedConfig {
            source,
            root: &args.root,
            config: &args.config,
        });
    }

    match &source {
        Some(path) => println!("# config: {}", path.display()),
        None => println!("# config: built-in defaults"),
    }
    println!("# root: {}", args.root.display());
    print!("{}", toml::to_string_pretty(&args.config)?);
    Ok(())
}
