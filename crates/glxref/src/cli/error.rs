//! User-facing errors for glxref commands
//!
//! Index failures (missing header, bad glob, unwritable output) are turned
//! into a message naming the path or setting at fault, the underlying cause,
//! and the flag or config key that would fix it.

use glxref_index::IndexError;
use std::fmt;
use std::path::Path;

/// A failed glxref command, as shown on stderr or in `--json` error output
#[derive(Debug)]
pub struct HelpfulError {
    /// Names the input, output or setting at fault
    pub message: String,
    /// Underlying cause, usually the io or parse error text
    pub context: Option<String>,
    /// Fixes to try, each starting with `TRY:`
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    pub fn with_suggestion(self, suggestion: impl Into<String>) -> Self {
        self.with_suggestions([suggestion])
    }

    pub fn with_suggestions(
        mut self,
        suggestions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(Into::into));
        self
    }

    // Constructors for the failures an index run can hit

    /// Input (header or corpus file) missing or unreadable
    pub fn input_not_found(path: &Path, reason: &str) -> Self {
        Self::new(format!("Input not found or unreadable: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestions([
                format!("TRY: Check that the file exists: ls -la {}", path.display()),
                "TRY: Paths in the config resolve against --root (default: current directory)"
                    .to_string(),
                "TRY: Use --skip-unreadable to skip corpus files that cannot be read".to_string(),
            ])
    }

    /// Index output could not be written
    pub fn output_not_writable(path: &Path, reason: &str) -> Self {
        Self::new(format!("Cannot write index: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestions([
                format!(
                    "TRY: Check permissions on {}",
                    path.parent()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| ".".to_string())
                ),
                "TRY: Choose another location with --output".to_string(),
            ])
    }

    /// Glob or prefix pattern rejected
    pub fn invalid_pattern(details: &str) -> Self {
        Self::new(format!("Invalid pattern: {}", details))
            .with_context("The corpus glob or symbol prefix could not be compiled")
            .with_suggestions([
                "TRY: Corpus patterns use glob syntax, e.g. 'src/*.c' or 'src/**/*.c'".to_string(),
                "TRY: The symbol prefix must be a C identifier, e.g. 'gl'".to_string(),
            ])
    }

    /// Configuration file or values rejected
    pub fn invalid_config(details: &str) -> Self {
        Self::new(format!("Invalid configuration: {}", details))
            .with_context("Configuration is read from --config or ./glxref.toml")
            .with_suggestions([
                "TRY: Show the resolved configuration: glxref config".to_string(),
                "TRY: on_unreadable accepts 'abort' or 'skip'".to_string(),
            ])
    }

    /// Coverage filter names a category the index does not have
    pub fn unknown_category(category: &str, known: &[&str]) -> Self {
        let listing = if known.is_empty() {
            "(none)".to_string()
        } else {
            known.join(", ")
        };
        Self::new(format!("Unknown category: '{}'", category))
            .with_context(format!("Categories in this index: {}", listing))
            .with_suggestion("TRY: Category names are matched exactly, including case")
    }

    /// Map a library error onto a user-facing one
    pub fn from_index_error(err: &IndexError) -> Self {
        match err {
            IndexError::InputNotFound { path, source } => {
                Self::input_not_found(path, &source.to_string())
            }
            IndexError::Output { path, source } => {
                Self::output_not_writable(path, &source.to_string())
            }
            IndexError::Pattern(details) => Self::invalid_pattern(details),
            IndexError::Config(details) => Self::invalid_config(details),
            IndexError::Json(e) => Self::new(format!("JSON error: {}", e)),
        }
    }
}

impl From<IndexError> for HelpfulError {
    fn from(err: IndexError) -> Self {
        Self::from_index_error(&err)
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

/// Print an error as a JSON object on stdout for `--json` callers.
pub fn print_json_error(err: &anyhow::Error) {
    let payload = match err.downcast_ref::<HelpfulError>() {
        Some(helpful) => serde_json::json!({
            "error": {
                "message": helpful.message,
                "context": helpful.context,
                "suggestions": helpful.suggestions,
            }
        }),
        None => serde_json::json!({
            "error": {
                "message": format!("{:#}", err),
                "context": null,
                "suggestions": [],
            }
        }),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string())
    );
}
