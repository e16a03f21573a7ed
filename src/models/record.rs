//! The record abstraction shared by every list screen.

use crate::errors::AppResult;
use rusqlite::{Connection, Row};
use serde::Serialize;
use std::fmt;

/// Store-assigned identifier of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    /// Sentinel returned by a failed insert.
    pub const INVALID: RecordId = RecordId(-1);

    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A kind of record persisted in its own store table.
///
/// SQL fragments take the table name because the store name is chosen at
/// runtime; it is validated as an identifier before it reaches these methods.
pub trait Record: Clone + fmt::Debug + Serialize {
    /// User-submitted fields before the store assigns an id.
    type Draft: Clone + fmt::Debug;

    /// Kind tag written to the store registry ("task", "workshop").
    const KIND: &'static str;

    /// Schema steps; element `n` upgrades a store from version `n` to `n + 1`.
    fn schema_steps(table: &str) -> Vec<String>;

    fn select_sql(table: &str) -> String;

    fn from_row(row: &Row) -> rusqlite::Result<Self>;

    /// Check required fields and normalize the draft (trimmed text).
    fn validate(draft: &Self::Draft) -> AppResult<Self::Draft>;

    /// Insert an already validated draft and return the new row id.
    fn insert(conn: &Connection, table: &str, draft: &Self::Draft) -> rusqlite::Result<i64>;

    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;

    fn id(&self) -> RecordId;

    fn name(&self) -> &str;

    /// Text shown for the record in a list row.
    fn label(&self) -> String;
}

/// Trim a required text field, failing when nothing is left.
pub(crate) fn required(value: &str, field: &str) -> AppResult<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(crate::errors::AppError::Validation(format!(
            "Please enter a {}",
            field
        )));
    }
    Ok(v.to_string())
}
