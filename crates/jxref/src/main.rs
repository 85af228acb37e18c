//! jxref CLI - Class and package reference graphs for Java repositories.
//!
//! jxref scans Java sources with tree-sitter, resolves what it can from each
//! file and guesses the rest from imports once the whole corpus is known.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use jxref::render::OutputFormat;
use jxref::{Config, Jxref};
use tracing_subscriber::EnvFilter;

mod cli;

/// jxref: Cross-reference graphs for Java repositories.
#[derive(Parser)]
#[command(name = "jxref")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Repository root directory (defaults to current directory)
    #[arg(short, long, global = true)]
    repo: Option<PathBuf>,

    /// Configuration file (defaults to `<repo>/.jxref.yaml` when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count file extensions in the repository
    Extensions,

    /// Print class-to-class references
    Class {
        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Print package-to-package references
    Package {
        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Print project dependencies declared in suite manifests
    Project {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Plantuml)]
        format: OutputFormat,
    },

    /// Print the project, package and class hierarchy
    Hierarchy,

    /// Print source comments per source root (license headers excluded)
    Comments {
        /// Write one `<root>_comments.txt` file per source root into this directory
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Detect circular package dependencies
    Cycles {
        /// Print cycles as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Determine repository root
    let repo = match cli.repo {
        Some(r) => r,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!(
                    "{}: failed to get current directory: {e}",
                    "error".red().bold()
                );
                return ExitCode::FAILURE;
            }
        },
    };

    let result = open(&repo, cli.config.as_deref()).and_then(|jxref| match cli.command {
        Commands::Extensions => {
            cli::extensions::run(&jxref);
            Ok(())
        }
        Commands::Class { format } => {
            cli::graph::run(&jxref, cli::graph::Granularity::Class, format)
        }
        Commands::Package { format } => {
            cli::graph::run(&jxref, cli::graph::Granularity::Package, format)
        }
        Commands::Comments { out_dir } => cli::comments::run(&jxref, out_dir.as_deref()),
        Commands::Project { format } => cli::project::run(&jxref, format),
        Commands::Hierarchy => cli::hierarchy::run(&jxref),
        Commands::Cycles { json } => cli::cycles::run(&jxref, json),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}

fn open(repo: &std::path::Path, config: Option<&std::path::Path>) -> Result<Jxref, jxref::Error> {
    match config {
        Some(path) => Jxref::new(repo, Config::load(path)?),
        None => Jxref::open(repo),
    }
}
