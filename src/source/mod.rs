//! Text sources that feed the extraction pipeline.
//!
//! A source yields either one concatenated text blob ([`TextSource`]) or a
//! list of independent documents ([`DocumentSource`]). Read failures surface
//! as [`KumoError::SourceRead`](crate::error::KumoError::SourceRead); an empty
//! source is not an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod csv;
pub mod literal;
pub mod sqlite;

pub use self::csv::CsvTextSource;
pub use literal::LiteralTextSource;
pub use sqlite::SqliteContentSource;

use crate::error::Result;

/// A bounded unit of text analysed on its own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub title: Option<String>,
    pub body: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Create a document with only a body.
    pub fn new<S: Into<String>>(id: i64, body: S) -> Self {
        Document {
            id,
            title: None,
            body: body.into(),
            created_at: None,
        }
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Common identity of every source.
pub trait Source {
    /// Get the name of this source (for logging).
    fn name(&self) -> &'static str;
}

/// A source that yields all of its text as one blob.
pub trait TextSource: Source {
    /// Read the whole corpus.
    fn read_text(&self) -> Result<String>;
}

/// A source that yields independent documents in source order.
pub trait DocumentSource: Source {
    /// Read every document.
    fn read_documents(&self) -> Result<Vec<Document>>;
}
