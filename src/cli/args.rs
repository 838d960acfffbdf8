//! Command line argument parsing for the kumo CLI using clap.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::lindera::DEFAULT_DICTIONARY;
use crate::frequency::ranking::DEFAULT_TOP_K;

/// kumo - word clouds from the nouns of Japanese text
#[derive(Parser, Debug, Clone)]
#[command(name = "kumo")]
#[command(about = "Render word clouds from the most frequent nouns of Japanese text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct KumoArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl KumoArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render a word cloud from a CSV file
    Csv(CsvArgs),

    /// Render a word cloud from the contents table of a SQLite database
    Db(DbArgs),

    /// Render a word cloud from literal text
    Text(TextArgs),

    /// Print the ranked words of a CSV file without rendering
    Rank(RankArgs),

    /// Create the contents table in a SQLite database
    #[command(name = "init-db")]
    InitDb(InitDbArgs),
}

/// Analyzer and ranking options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    /// Maximum number of words in the cloud
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Lindera dictionary (embedded:// URI or path)
    #[arg(long, default_value = DEFAULT_DICTIONARY, env = "KUMO_DICTIONARY")]
    pub dictionary: String,

    /// Optional lindera user dictionary
    #[arg(long)]
    pub user_dictionary: Option<String>,
}

/// Rendering options shared by the rendering commands.
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Word cloud configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "KUMO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Font file, overriding the configuration
    #[arg(long, value_name = "FONT_FILE")]
    pub font: Option<PathBuf>,
}

/// Arguments for the csv command
#[derive(Parser, Debug, Clone)]
pub struct CsvArgs {
    /// CSV file to read
    #[arg(value_name = "CSV_FILE")]
    pub csv_file: PathBuf,

    /// Output PNG file
    #[arg(short, long, default_value = "csvWordCloud.png")]
    pub output: PathBuf,

    /// Count each word once per CSV record instead of every occurrence
    #[arg(long)]
    pub per_document: bool,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    #[command(flatten)]
    pub render: RenderArgs,
}

/// Arguments for the db command
#[derive(Parser, Debug, Clone)]
pub struct DbArgs {
    /// SQLite database file
    #[arg(value_name = "DB_FILE")]
    pub db_file: PathBuf,

    /// Output PNG file
    #[arg(short, long, default_value = "dbWordCloud.png")]
    pub output: PathBuf,

    /// Only use contents created after this time (RFC 3339); defaults to the last 7 days
    #[arg(long, conflicts_with = "all")]
    pub since: Option<DateTime<Utc>>,

    /// Use every row regardless of creation time
    #[arg(long)]
    pub all: bool,

    /// Count every occurrence instead of once per document
    #[arg(long)]
    pub corpus: bool,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    #[command(flatten)]
    pub render: RenderArgs,
}

/// Arguments for the text command
#[derive(Parser, Debug, Clone)]
pub struct TextArgs {
    /// Text to analyse
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Output PNG file
    #[arg(short, long, default_value = "textWordCloud.png")]
    pub output: PathBuf,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    #[command(flatten)]
    pub render: RenderArgs,
}

/// Arguments for the rank command
#[derive(Parser, Debug, Clone)]
pub struct RankArgs {
    /// CSV file to read
    #[arg(value_name = "CSV_FILE")]
    pub csv_file: PathBuf,

    /// Count each word once per CSV record instead of every occurrence
    #[arg(long)]
    pub per_document: bool,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Arguments for the init-db command
#[derive(Parser, Debug, Clone)]
pub struct InitDbArgs {
    /// SQLite database file (created if missing)
    #[arg(value_name = "DB_FILE")]
    pub db_file: PathBuf,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
