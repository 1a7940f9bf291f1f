//! doctrine-lint CLI tool.
//!
//! Usage:
//! ```bash
//! doctrine-lint                 # hook mode, reads the JSON envelope on stdin
//! doctrine-lint check [PATH]...
//! doctrine-lint list-rules
//! doctrine-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "DOCTRINE_LINT_LOG";

/// Static validator for Doctrine ORM entity mappings
#[derive(Parser)]
#[command(name = "doctrine-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// PHP binary used for the syntax check
    #[arg(long, global = true, env = "DOCTRINE_LINT_PHP")]
    php: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the file named in a hook envelope read from stdin (default)
    Hook,

    /// Validate files and directories
    Check {
        /// Files or directories to validate (default: current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for `check` results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-diagnostic compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let options = commands::Options {
        config: cli.config,
        php: cli.php,
    };

    match cli.command.unwrap_or(Commands::Hook) {
        Commands::Hook => std::process::exit(commands::hook::run(&options)),
        Commands::Check {
            paths,
            format,
            exclude,
        } => {
            let code = commands::check::run(&paths, format, exclude, &options)?;
            std::process::exit(code);
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
