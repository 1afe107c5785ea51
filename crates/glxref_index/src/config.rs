//! Configuration for an index run

use crate::error::{IndexError, Result};
use crate::header::is_identifier;
use crate::scanner::UnreadablePolicy;
use crate::types::DEFAULT_CATEGORY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "glxref.toml";

/// Main configuration for an index run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Header holding the declarations and category comments
    #[serde(default = "default_header_path")]
    pub header_path: PathBuf,

    /// Glob selecting the corpus files
    #[serde(default = "default_corpus_pattern")]
    pub corpus_pattern: String,

    /// Where the JSON index is written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Prefix every declared symbol starts with
    #[serde(default = "default_symbol_prefix")]
    pub symbol_prefix: String,

    /// Category for declarations before the first category comment
    #[serde(default = "default_category")]
    pub default_category: String,

    /// What to do with corpus files that cannot be read
    #[serde(default)]
    pub on_unreadable: UnreadablePolicy,
}

fn default_header_path() -> PathBuf {
    PathBuf::from("tinygl/include/GL/gl.h")
}

fn default_corpus_pattern() -> String {
    "tinygl/src/*.c".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("function_map.json")
}

fn default_symbol_prefix() -> String {
    "gl".to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            header_path: default_header_path(),
            corpus_pattern: default_corpus_pattern(),
            output_path: default_output_path(),
            symbol_prefix: default_symbol_prefix(),
            default_category: default_category(),
            on_unreadable: UnreadablePolicy::default(),
        }
    }
}

impl IndexConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| IndexError::Config(format!("{}: {}", path.display(), e)))?;
        let config: IndexConfig = toml::from_str(&content)
            .map_err(|e| IndexError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Load `path` if given, else `glxref.toml` in `dir` if present, else defaults.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(config = %candidate.display(), "Using config file");
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| IndexError::Config(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| IndexError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.corpus_pattern.trim().is_empty() {
            return Err(IndexError::Config("corpus_pattern must not be empty".to_string()));
        }
        if self.header_path.as_os_str().is_empty() {
            return Err(IndexError::Config("header_path must not be empty".to_string()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(IndexError::Config("output_path must not be empty".to_string()));
        }
        if !is_identifier(&self.symbol_prefix) {
            return Err(IndexError::Config(format!(
                "symbol_prefix '{}' must be a non-empty C identifier",
                self.symbol_prefix
            )));
        }
        Ok(())
    }
}
