//! glxref - API header cross-reference
//!
//! Indexes every `<prefix>name(` declaration in a header under the category
//! comment it falls in, then records which corpus files mention each symbol.

use anyhow::Result;
use clap::{Parser, Subcommand};
use glxref_logging::{init_logging, LogConfig};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

use cli::InputArgs;

#[derive(Parser, Debug)]
#[command(name = "glxref", about = "Cross-reference API header symbols against a source corpus")]
struct Cli {
    /// Enable verbose logging (debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Also append logs to this file
    #[arg(long, global = true, env = "GLXREF_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Config file (default: ./glxref.toml under --root when present)
    #[arg(short, long, global = true, env = "GLXREF_CONFIG")]
    config: Option<PathBuf>,

    /// Directory that relative header, corpus and output paths resolve against
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the index and write it as JSON
    Index {
        #[command(flatten)]
        inputs: InputArgs,

        /// Where to write the index
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report declared symbols the corpus never mentions
    Coverage {
        #[command(flatten)]
        inputs: InputArgs,

        /// Read an existing index instead of rebuilding it
        #[arg(long)]
        from_index: Option<PathBuf>,

        /// Only report this category
        #[arg(long)]
        category: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn command_wants_json(command: &Commands) -> bool {
    match command {
        Commands::Index { json, .. } => *json,
        Commands::Coverage { json, .. } => *json,
        Commands::Config { json } => *json,
    }
}

fn run_command(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Index {
            inputs,
            output,
            json,
        } => {
            let config =
                cli::resolve_config(config_path, &cli.root, &inputs, output.as_deref())?;
            cli::index::run(cli::index::IndexArgs {
                config,
                root: cli.root,
                json,
            })
        }
        Commands::Coverage {
            inputs,
            from_index,
            category,
            json,
        } => {
            let config = cli::resolve_config(config_path, &cli.root, &inputs, None)?;
            cli::coverage::run(cli::coverage::CoverageArgs {
                config,
                root: cli.root,
                from_index,
                category,
                json,
            })
        }
        Commands::Config { json } => {
            let config =
                cli::resolve_config(config_path, &cli.root, &InputArgs::default(), None)?;
            cli::config::run(cli::config::ConfigArgs {
                config,
                config_path: cli.config.clone(),
                root: cli.root,
                json,
            })
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_mode = command_wants_json(&cli.command);

    if let Err(err) = init_logging(LogConfig {
        verbose: cli.verbose,
        log_file: cli.log_file.as_deref(),
    }) {
        eprintln!("Warning: failed to initialize logging: {:#}", err);
    }

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = %err, "Command failed");
            if json_mode {
                cli::error::print_json_error(&err);
            } else {
                eprintln!("{:?}", err);
            }
            ExitCode::from(1)
        }
    }
}
