//! Repository module
//!
//! CRUD and range queries over SurrealDB tables.

pub mod reserva;

pub use reserva::ReservaRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse an id as given by the API into a `RecordId`.
///
/// Accepts both the full `"table:key"` form and a bare key.
pub fn parse_record_id(table: &str, id: &str) -> RepoResult<RecordId> {
    if id.trim().is_empty() {
        return Err(RepoError::Validation("Empty id".to_string()));
    }
    if id.contains(':') {
        let rid: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid id: {}", id)))?;
        if rid.table() != table {
            return Err(RepoError::Validation(format!("Invalid id: {}", id)));
        }
        Ok(rid)
    } else {
        Ok(RecordId::from_table_key(table, id))
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
