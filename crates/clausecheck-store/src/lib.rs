//! ClauseCheck Storage Layer
//!
//! Implements the AnalysisStore trait using SQLite.
//!
//! # Architecture
//!
//! - `analyses` table holds one row per record (id, filename, processed_at)
//! - `findings` table holds the findings with an `ordinal` column so the
//!   chunk order of the analysis survives the round trip
//! - Creation and deletion run inside a single transaction
//!
//! # Examples
//!
//! ```no_run
//! use clausecheck_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for record operations
//! ```

#![warn(missing_docs)]

use chrono::{DateTime, SecondsFormat, Utc};
use clausecheck_domain::traits::AnalysisStore;
use clausecheck_domain::{AnalysisId, AnalysisRecord, Finding, RiskLevel};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored data could not be mapped back to the domain model
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A record with this id already exists
    #[error("Duplicate analysis id: {0}")]
    Duplicate(String),

    /// The store mutex was poisoned by a panicking holder
    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// SQLite-based implementation of AnalysisStore
///
/// # Thread Safety
///
/// SQLite connections are not `Sync`. Share a store between tasks by wrapping it
/// in a `Mutex`; every trait method is a single locked call.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use clausecheck_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("clausecheck.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        self.conn.pragma_update(None, "foreign_keys", "ON")?;
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Fixed-precision RFC 3339 so lexical order equals chronological order
    fn timestamp_to_str(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn str_to_timestamp(s: &str) -> Result<DateTime<Utc>, StoreError> {
        DateTime::parse_from_rfc3339(s)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| StoreError::InvalidData(format!("Bad timestamp '{}': {}", s, e)))
    }

    fn str_to_id(s: &str) -> Result<AnalysisId, StoreError> {
        AnalysisId::from_string(s).map_err(StoreError::InvalidData)
    }

    /// Load the ordered findings of one record
    fn load_findings(&self, id: &str) -> Result<Vec<Finding>, StoreError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT clause_text, issue_detected, explanation, suggested_alternative, risk_level
             FROM findings WHERE analysis_id = ?1 ORDER BY ordinal ASC",
        )?;

        let rows = stmt
            .query_map(params![id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(clause_text, issue_detected, explanation, suggested_alternative, risk)| {
                let risk_level = RiskLevel::parse(&risk)
                    .ok_or_else(|| StoreError::InvalidData(format!("Unknown risk level: {}", risk)))?;
                Ok(Finding {
                    clause_text,
                    issue_detected,
                    explanation,
                    suggested_alternative,
                    risk_level,
                })
            })
            .collect()
    }

    /// Assemble a record from its `analyses` row
    fn hydrate(
        &self,
        id: String,
        filename: String,
        processed_at: String,
    ) -> Result<AnalysisRecord, StoreError> {
        let analysis_results = self.load_findings(&id)?;
        Ok(AnalysisRecord {
            id: Self::str_to_id(&id)?,
            filename,
            analysis_results,
            processed_at: Self::str_to_timestamp(&processed_at)?,
        })
    }
}

impl AnalysisStore for SqliteStore {
    type Error = StoreError;

    fn create(&mut self, record: &AnalysisRecord) -> Result<(), Self::Error> {
        let id = record.id.to_string();

        let tx = self.conn.transaction()?;

        let exists: bool = tx
            .query_row("SELECT 1 FROM analyses WHERE id = ?1", params![&id], |_| Ok(true))
            .optional()?
            .unwrap_or(false);
        if exists {
            return Err(StoreError::Duplicate(id));
        }

        tx.execute(
            "INSERT INTO analyses (id, filename, processed_at) VALUES (?1, ?2, ?3)",
            params![&id, &record.filename, Self::timestamp_to_str(&record.processed_at)],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO findings (analysis_id, ordinal, clause_text, issue_detected,
                                       explanation, suggested_alternative, risk_level)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for (ordinal, finding) in record.analysis_results.iter().enumerate() {
                stmt.execute(params![
                    &id,
                    ordinal as i64,
                    &finding.clause_text,
                    &finding.issue_detected,
                    &finding.explanation,
                    &finding.suggested_alternative,
                    finding.risk_level.as_str(),
                ])?;
            }
        }

        tx.commit()?;
        debug!("Stored analysis {} with {} findings", id, record.analysis_results.len());
        Ok(())
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<AnalysisRecord>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, filename, processed_at FROM analyses
             ORDER BY processed_at DESC, id DESC LIMIT ?1",
        )?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, filename, processed_at)| self.hydrate(id, filename, processed_at))
            .collect()
    }

    fn get_by_id(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>, Self::Error> {
        let row = self
            .conn
            .query_row(
                "SELECT id, filename, processed_at FROM analyses WHERE id = ?1",
                params![id.to_string()],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)),
            )
            .optional()?;

        row.map(|(id, filename, processed_at)| self.hydrate(id, filename, processed_at))
            .transpose()
    }

    fn delete_by_id(&mut self, id: &AnalysisId) -> Result<usize, Self::Error> {
        let id = id.to_string();

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM findings WHERE analysis_id = ?1", params![&id])?;
        let removed = tx.execute("DELETE FROM analyses WHERE id = ?1", params![&id])?;
        tx.commit()?;

        Ok(removed)
    }

    fn ping(&self) -> Result<(), Self::Error> {
        self.conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }
}
