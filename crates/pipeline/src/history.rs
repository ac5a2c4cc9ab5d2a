//! Run history persistence.
//!
//! Completed runs are recorded in a local SQLite database so past
//! invocations can be inspected. Recording is best-effort at the call
//! site: a history failure must never fail the run that produced output.

use docsift_core::{AppError, AppResult};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// Directory holding docsift state under the working directory.
pub const STATE_DIR: &str = ".docsift";

/// History database file name.
pub const HISTORY_DB: &str = "history.db";

/// Instructions are truncated to this many characters before storage.
const MAX_INSTRUCTION_CHARS: usize = 100;

/// One recorded pipeline run.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub document: String,
    pub instruction: String,
    pub chunk_count: u32,
    pub failed_chunks: u32,
    pub merge_tier: String,
    pub output_bytes: u64,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub duration_ms: u64,
}

/// Handle to the run history database.
pub struct RunHistory {
    conn: Connection,
}

impl RunHistory {
    /// Open the history database at `db_path`, creating it (and its parent
    /// directory) if needed.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::History(format!("Failed to create history directory: {}", e))
                })?;
            }
        }

        let conn = Connection::open(db_path)
            .map_err(|e| AppError::History(format!("Failed to open history database: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS runs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                document TEXT NOT NULL,
                instruction TEXT NOT NULL,
                chunk_count INTEGER NOT NULL,
                failed_chunks INTEGER NOT NULL,
                merge_tier TEXT NOT NULL,
                output_bytes INTEGER NOT NULL,
                started_at TEXT NOT NULL,
                duration_ms INTEGER NOT NULL
            );
            "#,
        )
        .map_err(|e| AppError::History(format!("Failed to create history schema: {}", e)))?;

        tracing::debug!("Opened run history at {:?}", db_path);

        Ok(Self { conn })
    }

    /// Open the history database at its default location,
    /// `.docsift/history.db` under the working directory.
    pub fn open_default() -> AppResult<Self> {
        Self::open(&default_db_path())
    }

    /// Record one completed run. The instruction is truncated to 100
    /// characters before storage.
    pub fn record_run(&self, record: &RunRecord) -> AppResult<()> {
        self.conn
            .execute(
                "INSERT INTO runs (document, instruction, chunk_count, failed_chunks,
                                   merge_tier, output_bytes, started_at, duration_ms)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.document,
                    truncate_chars(&record.instruction, MAX_INSTRUCTION_CHARS),
                    record.chunk_count,
                    record.failed_chunks,
                    record.merge_tier,
                    record.output_bytes as i64,
                    record.started_at.to_rfc3339(),
                    record.duration_ms as i64,
                ],
            )
            .map_err(|e| AppError::History(format!("Failed to record run: {}", e)))?;

        Ok(())
    }

    /// Fetch the most recent runs, newest first.
    pub fn recent_runs(&self, limit: usize) -> AppResult<Vec<RunRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT document, instruction, chunk_count, failed_chunks,
                        merge_tier, output_bytes, started_at, duration_ms
                 FROM runs ORDER BY id DESC LIMIT ?1",
            )
            .map_err(|e| AppError::History(format!("Failed to prepare history query: {}", e)))?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                let started_at: String = row.get(6)?;
                let started_at = chrono::DateTime::parse_from_rfc3339(&started_at)
                    .map(|t| t.with_timezone(&chrono::Utc))
                    .unwrap_or_default();

                Ok(RunRecord {
                    document: row.get(0)?,
                    instruction: row.get(1)?,
                    chunk_count: row.get(2)?,
                    failed_chunks: row.get(3)?,
                    merge_tier: row.get(4)?,
                    output_bytes: row.get::<_, i64>(5)? as u64,
                    started_at,
                    duration_ms: row.get::<_, i64>(7)? as u64,
                })
            })
            .map_err(|e| AppError::History(format!("Failed to query history: {}", e)))?;

        Ok(rows.filter_map(|r| r.ok()).collect())
    }
}

/// Default history database path under the working directory.
pub fn default_db_path() -> PathBuf {
    Path::new(STATE_DIR).join(HISTORY_DB)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
