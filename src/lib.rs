//! # Kumo
//!
//! Noun-frequency word clouds for Japanese text.
//!
//! ## Features
//!
//! - Morphological analysis with lindera and the embedded IPADIC dictionary
//! - Noun extraction with a Japanese stop word list
//! - Per-document or whole-corpus frequency aggregation
//! - Deterministic top-K ranking
//! - CSV, SQLite and literal text sources
//! - Spiral word cloud layout rendered to PNG

pub mod analysis;
pub mod cli;
pub mod error;
pub mod frequency;
pub mod pipeline;
pub mod render;
pub mod source;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
