//! Error types for the kumo library.
//!
//! All failures are represented by the [`KumoError`] enum. Nothing inside the
//! pipeline recovers from an error: every variant aborts the current run and
//! is surfaced to the caller, which decides how to report it.
//!
//! # Examples
//!
//! ```
//! use kumo::error::{KumoError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(KumoError::invalid_argument("top_k must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for kumo operations.
#[derive(Error, Debug)]
pub enum KumoError {
    /// I/O errors that are not attributable to a specific stage
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The morphological analyzer could not be created (dictionary missing or unreadable)
    #[error("Analyzer initialization error: {0}")]
    AnalyzerInit(String),

    /// The analyzer rejected or could not segment the given text
    #[error("Parse error: {0}")]
    Parse(String),

    /// The input file or database rows could not be read
    #[error("Source read error: {0}")]
    SourceRead(String),

    /// The word cloud could not be laid out or rasterized
    #[error("Render error: {0}")]
    Render(String),

    /// The rendered image could not be encoded or written
    #[error("Encode error: {0}")]
    Encode(String),

    /// Invalid argument passed to an operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with KumoError.
pub type Result<T> = std::result::Result<T, KumoError>;

impl KumoError {
    /// Create a new analyzer initialization error.
    pub fn analyzer_init<S: Into<String>>(msg: S) -> Self {
        KumoError::AnalyzerInit(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        KumoError::Parse(msg.into())
    }

    /// Create a new source read error.
    pub fn source_read<S: Into<String>>(msg: S) -> Self {
        KumoError::SourceRead(msg.into())
    }

    /// Create a new render error.
    pub fn render<S: Into<String>>(msg: S) -> Self {
        KumoError::Render(msg.into())
    }

    /// Create a new encode error.
    pub fn encode<S: Into<String>>(msg: S) -> Self {
        KumoError::Encode(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        KumoError::InvalidArgument(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        KumoError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        KumoError::Other(msg.into())
    }
}
