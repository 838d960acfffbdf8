//! CSV text source.
//!
//! Every record is read as plain text (no header row, records may have
//! different field counts). A record's fields are joined with the delimiter,
//! all whitespace is removed, and the records are concatenated with no
//! separator:
//!
//! ```csv
//! 今日は 東京,晴れ
//! 明日は大阪
//! ```
//!
//! reads as `今日は東京,晴れ明日は大阪`. A path of `-` reads standard input.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use ::csv::{ReaderBuilder, StringRecord};
use log::debug;

use crate::error::{KumoError, Result};
use crate::source::{Document, DocumentSource, Source, TextSource};

/// A text source reading a delimited file.
#[derive(Clone, Debug)]
pub struct CsvTextSource {
    path: PathBuf,
    /// CSV delimiter character (default: ',')
    delimiter: u8,
}

impl CsvTextSource {
    /// Create a CSV source with comma delimiter.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        CsvTextSource {
            path: path.as_ref().to_path_buf(),
            delimiter: b',',
        }
    }

    /// Set a custom delimiter character.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter as u8;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Box<dyn Read>> {
        if self.path == Path::new("-") {
            return Ok(Box::new(io::stdin()));
        }
        let file = File::open(&self.path).map_err(|e| {
            KumoError::source_read(format!("Failed to open {}: {}", self.path.display(), e))
        })?;
        Ok(Box::new(file))
    }

    /// Read and flatten every record of `reader`.
    pub fn read_records<R: Read>(&self, reader: R) -> Result<Vec<String>> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let mut lines = Vec::new();
        for (line_num, record) in csv_reader.records().enumerate() {
            let record = record.map_err(|e| {
                KumoError::source_read(format!(
                    "Failed to read CSV record {} of {}: {}",
                    line_num + 1,
                    self.path.display(),
                    e
                ))
            })?;
            lines.push(self.flatten(&record));
        }
        debug!("read {} records from {}", lines.len(), self.path.display());

        Ok(lines)
    }

    fn flatten(&self, record: &StringRecord) -> String {
        let separator = (self.delimiter as char).to_string();
        record
            .iter()
            .collect::<Vec<_>>()
            .join(&separator)
            .split_whitespace()
            .collect()
    }
}

impl Source for CsvTextSource {
    fn name(&self) -> &'static str {
        "csv"
    }
}

impl TextSource for CsvTextSource {
    fn read_text(&self) -> Result<String> {
        Ok(self.read_records(self.open()?)?.concat())
    }
}

impl DocumentSource for CsvTextSource {
    /// Each record becomes one document; blank records are skipped.
    fn read_documents(&self) -> Result<Vec<Document>> {
        Ok(self
            .read_records(self.open()?)?
            .into_iter()
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(i, line)| Document::new(i as i64 + 1, line))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_records() {
        let source = CsvTextSource::new("inline.csv");
        let data = "今日は 東京,晴れ\n明日は\t大阪\n";

        let lines = source.read_records(data.as_bytes()).unwrap();

        assert_eq!(lines, vec!["今日は東京,晴れ", "明日は大阪"]);
    }

    #[test]
    fn test_flexible_field_counts() {
        let source = CsvTextSource::new("inline.csv");
        let data = "a,b,c\nd\ne,f\n";

        let lines = source.read_records(data.as_bytes()).unwrap();

        assert_eq!(lines.concat(), "a,b,cde,f");
    }

    #[test]
    fn test_custom_delimiter() {
        let source = CsvTextSource::new("inline.tsv").with_delimiter('\t');
        let data = "猫\t犬\n";

        let lines = source.read_records(data.as_bytes()).unwrap();

        assert_eq!(lines, vec!["猫犬"]);
    }

    #[test]
    fn test_quoted_fields() {
        let source = CsvTextSource::new("inline.csv");
        let data = "\"東京, 大阪\",京都\n";

        let lines = source.read_records(data.as_bytes()).unwrap();

        assert_eq!(lines, vec!["東京,大阪,京都"]);
    }

    #[test]
    fn test_empty_input() {
        let source = CsvTextSource::new("inline.csv");

        let lines = source.read_records("".as_bytes()).unwrap();

        assert!(lines.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_source_error() {
        let source = CsvTextSource::new("inline.csv");
        let data: &[u8] = &[0xff, 0xfe, b'\n'];

        let result = source.read_records(data);

        assert!(matches!(result, Err(KumoError::SourceRead(_))));
    }

    #[test]
    fn test_missing_file() {
        let source = CsvTextSource::new("/nonexistent/kumo/sample.csv");

        assert!(matches!(source.read_text(), Err(KumoError::SourceRead(_))));
    }
}
