use crate::error::Result;
use crate::source::{Document, DocumentSource, Source, TextSource};

/// A source backed by text held in memory.
///
/// As a [`DocumentSource`] every non-empty line is one document.
#[derive(Clone, Debug, Default)]
pub struct LiteralTextSource {
    text: String,
}

impl LiteralTextSource {
    pub fn new<S: Into<String>>(text: S) -> Self {
        LiteralTextSource { text: text.into() }
    }
}

impl Source for LiteralTextSource {
    fn name(&self) -> &'static str {
        "literal"
    }
}

impl TextSource for LiteralTextSource {
    fn read_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

impl DocumentSource for LiteralTextSource {
    fn read_documents(&self) -> Result<Vec<Document>> {
        Ok(self
            .text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(i, line)| Document::new(i as i64 + 1, line))
            .collect())
    }
}
