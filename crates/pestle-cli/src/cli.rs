use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Log level options for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl LogLevel {
    /// Directive level as understood by the env filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser)]
#[command(name = "pestle")]
#[command(about = "pestle - natural-language questions over a drug knowledge graph")]
#[command(version)]
#[command(arg_required_else_help = false)]
pub struct Cli {
    /// Subcommand to execute (defaults to chat if not provided)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to pestle.toml in the working directory)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the graph tables and indexes (safe to run repeatedly)
    Provision,

    /// Load a drug CSV export into the graph
    Ingest {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// Embed node names that are missing vectors
    Embed {
        /// Re-embed every named node, not just the ones missing a vector
        #[arg(long)]
        refresh: bool,
    },

    /// Answer a single question against the graph
    Ask {
        /// The question to answer
        question: String,

        /// Print the generated query and its rows alongside the answer
        #[arg(long)]
        show_query: bool,
    },

    /// Interactive question loop
    Chat,

    /// Show node, relation, and embedding counts
    Stats,
}
