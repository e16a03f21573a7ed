//! Durable CRUD over one record kind.
//!
//! A `RecordStore` owns its connection. Records are kept in a cache that is
//! only refreshed by `load()`; positions handed out by `loaded()` are valid
//! until the next insert or delete.

use crate::db::log::ttlog;
use crate::db::migrate::{init_db, migrate_store};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Record, RecordId};
use crate::ui::messages::warning;
use rusqlite::Connection;

pub use crate::db::migrate::LATEST_SCHEMA_VERSION;

/// Tables the store layer creates for itself.
const RESERVED_NAMES: [&str; 2] = ["log", "stores"];

pub struct RecordStore<R: Record> {
    pool: Option<DbPool>,
    name: String,
    schema_version: u32,
    cache: Vec<R>,
}

/// Store names end up as table names, so only plain identifiers are accepted.
/// SQLite table names ignore case; the name is returned in lowercase.
fn normalize_store_name(name: &str) -> AppResult<String> {
    let mut chars = name.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    let lower = name.to_ascii_lowercase();
    let reserved = RESERVED_NAMES.contains(&lower.as_str()) || lower.starts_with("sqlite_");

    if !valid_start || !valid_rest || reserved {
        return Err(AppError::InvalidStoreName(name.to_string()));
    }
    Ok(lower)
}

impl<R: Record> RecordStore<R> {
    /// Open or create the store `name` inside the database at `db_path`.
    pub fn init_for(db_path: &str, name: &str, schema_version: u32) -> AppResult<Self> {
        normalize_store_name(name)?;
        let pool = DbPool::new(db_path)?;
        Self::init_for_pool(pool, name, schema_version)
    }

    /// Same as `init_for`, on a connection the caller already opened.
    pub fn init_for_pool(pool: DbPool, name: &str, schema_version: u32) -> AppResult<Self> {
        let name = normalize_store_name(name)?;
        init_db(&pool.conn)?;
        let effective = migrate_store::<R>(&pool.conn, &name, schema_version)?;

        Ok(Self {
            pool: Some(pool),
            name,
            schema_version: effective,
            cache: Vec::new(),
        })
    }

    fn conn(&self) -> AppResult<&Connection> {
        self.pool
            .as_ref()
            .map(|p| &p.conn)
            .ok_or(AppError::NotInitialized)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version the store is at, which can be higher than the one requested.
    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    /// Read every record, most recent first, into the cache.
    pub fn load(&mut self) -> AppResult<()> {
        let records = {
            let conn = self.conn()?;
            let mut stmt = conn.prepare_cached(&R::select_sql(&self.name))?;
            let rows = stmt.query_map([], R::from_row)?;

            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            out
        };

        self.cache = records;
        Ok(())
    }

    /// Records read by the last `load()`.
    pub fn loaded(&self) -> &[R] {
        &self.cache
    }

    /// Index of `id` in the cache.
    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.cache.iter().position(|r| r.id() == id)
    }

    pub fn count(&self) -> AppResult<usize> {
        let conn = self.conn()?;
        let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", self.name), [], |row| {
            row.get(0)
        })?;
        Ok(n as usize)
    }

    /// Persist a new record and return its id. The cache is not touched.
    ///
    /// The row and its audit line are written together or not at all.
    pub fn try_insert(&mut self, draft: &R::Draft) -> AppResult<RecordId> {
        let clean = R::validate(draft)?;
        let tx = self.conn()?.unchecked_transaction()?;

        let id = R::insert(&tx, &self.name, &clean)?;
        ttlog(
            &tx,
            "add",
            &self.name,
            &format!("Inserted {} #{}", R::KIND, id),
        )?;

        tx.commit()?;
        Ok(RecordId(id))
    }

    /// Like `try_insert`, returning `RecordId::INVALID` when nothing was stored.
    pub fn insert(&mut self, draft: &R::Draft) -> RecordId {
        match self.try_insert(draft) {
            Ok(id) => id,
            Err(e) => {
                warning(format!("Insert into '{}' failed: {}", self.name, e));
                RecordId::INVALID
            }
        }
    }

    /// Delete the record at `position` of the last-loaded cache.
    ///
    /// Returns `false` when the position is out of range or the row is
    /// already gone.
    pub fn delete_by_position(&mut self, position: usize) -> AppResult<bool> {
        let Some(id) = self.cache.get(position).map(|r| r.id()) else {
            return Ok(false);
        };
        self.delete_by_id(id)
    }

    /// Delete the record with `id`. Returns `true` iff one row was removed.
    /// On error the row is still there.
    pub fn delete_by_id(&mut self, id: RecordId) -> AppResult<bool> {
        let tx = self.conn()?.unchecked_transaction()?;

        let removed = tx.execute(
            &format!("DELETE FROM {} WHERE id = ?1", self.name),
            [id.0],
        )?;

        if removed != 1 {
            return Ok(false);
        }

        ttlog(
            &tx,
            "del",
            &self.name,
            &format!("Deleted {} #{}", R::KIND, id),
        )?;
        tx.commit()?;

        if let Some(pos) = self.position_of(id) {
            self.cache.remove(pos);
        }
        Ok(true)
    }

    /// Release the connection. Later calls fail with `NotInitialized`.
    pub fn close(&mut self) -> AppResult<()> {
        match self.pool.take() {
            Some(pool) => pool.close(),
            None => Ok(()),
        }
    }

    /// Give the connection back, for callers that open further stores on it.
    pub fn into_pool(mut self) -> Option<DbPool> {
        self.pool.take()
    }
}
