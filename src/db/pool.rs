//! Owned SQLite connection handle.

use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
    path: String,
}

impl DbPool {
    /// Open (or create) the database file. Any failure to open the file is
    /// reported as `StorageUnavailable`.
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))
            .map_err(|e| AppError::StorageUnavailable(format!("{}: {}", path, e)))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn,
            path: path.to_string(),
        })
    }

    /// Private in-memory database.
    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::StorageUnavailable(format!(":memory:: {}", e)))?;
        Ok(Self {
            conn,
            path: ":memory:".to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Close the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> AppResult<()> {
        self.conn.close().map_err(|(_, e)| AppError::Db(e))
    }
}
