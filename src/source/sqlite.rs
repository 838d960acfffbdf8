//! SQLite content store.
//!
//! Documents are rows of a `contents` table. Timestamps are stored as
//! RFC 3339 text in UTC so that string comparison orders them correctly.

use std::path::Path;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use log::{debug, info};
use rusqlite::{Connection, params};

use crate::error::{KumoError, Result};
use crate::source::{Document, DocumentSource, Source};

const CREATE_CONTENTS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS contents (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        title       TEXT,
        body        TEXT NOT NULL,
        created_at  TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_contents_created_at ON contents (created_at);
";

/// Number of days covered by the default recency window.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Start of the default recency window: `DEFAULT_WINDOW_DAYS` before `now`,
/// truncated to midnight UTC.
pub fn default_since(now: DateTime<Utc>) -> DateTime<Utc> {
    let start = now - Duration::days(DEFAULT_WINDOW_DAYS);
    start
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .unwrap_or(start)
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn sql_error(context: &str) -> impl Fn(rusqlite::Error) -> KumoError + '_ {
    move |e| KumoError::source_read(format!("{context}: {e}"))
}

/// A document source reading the `contents` table of a SQLite database.
pub struct SqliteContentSource {
    conn: Connection,
    since: Option<DateTime<Utc>>,
}

impl SqliteContentSource {
    /// Open the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(sql_error("Failed to open database"))?;
        Ok(Self { conn, since: None })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(sql_error("Failed to open database"))?;
        Ok(Self { conn, since: None })
    }

    /// Only read documents created strictly after `since`.
    pub fn with_since(mut self, since: Option<DateTime<Utc>>) -> Self {
        self.since = since;
        self
    }

    /// Create the `contents` table if it does not exist.
    pub fn initialize(&self) -> Result<()> {
        self.conn
            .execute_batch(CREATE_CONTENTS_TABLE)
            .map_err(sql_error("Failed to create contents table"))
    }

    /// Insert one document and return its id.
    pub fn insert_content(
        &self,
        title: Option<&str>,
        body: &str,
        created_at: DateTime<Utc>,
    ) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO contents (title, body, created_at) VALUES (?1, ?2, ?3)",
                params![title, body, format_timestamp(&created_at)],
            )
            .map_err(sql_error("Failed to insert content"))?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Fetch documents created after `since` (all documents when `None`), ordered by id.
    pub fn fetch_documents(&self, since: Option<DateTime<Utc>>) -> Result<Vec<Document>> {
        let lower = since.map(|ts| format_timestamp(&ts));
        debug!("fetching contents created after {:?}", lower);

        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, title, body, created_at FROM contents
                 WHERE ?1 IS NULL OR created_at > ?1
                 ORDER BY id",
            )
            .map_err(sql_error("Failed to prepare query"))?;

        let rows = stmt
            .query_map(params![lower], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .map_err(sql_error("Failed to query contents"))?;

        let mut documents = Vec::new();
        for row in rows {
            let (id, title, body, created_at) = row.map_err(sql_error("Failed to read row"))?;
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| {
                    KumoError::source_read(format!(
                        "Invalid created_at '{}' for content {}: {}",
                        created_at, id, e
                    ))
                })?
                .with_timezone(&Utc);
            documents.push(Document {
                id,
                title,
                body,
                created_at: Some(created_at),
            });
        }
        info!("fetched {} documents", documents.len());

        Ok(documents)
    }
}

impl Source for SqliteContentSource {
    fn name(&self) -> &'static str {
        "sqlite"
    }
}

impl DocumentSource for SqliteContentSource {
    fn read_documents(&self) -> Result<Vec<Document>> {
        self.fetch_documents(self.since)
    }
}
