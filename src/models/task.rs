use crate::errors::AppResult;
use crate::models::record::{Record, RecordId, required};
use rusqlite::{Connection, Row, params};
use serde::Serialize;

/// A to-do entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub order: i64,
}

/// Fields collected by the add-task screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub order: i64,
}

impl NewTask {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            order: 0,
        }
    }
}

impl Record for Task {
    type Draft = NewTask;

    const KIND: &'static str = "task";

    fn schema_steps(table: &str) -> Vec<String> {
        vec![
            format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    id          INTEGER PRIMARY KEY AUTOINCREMENT,
                    name        TEXT NOT NULL CHECK(length(name) > 0),
                    description TEXT NOT NULL DEFAULT '',
                    sort_order  INTEGER NOT NULL DEFAULT 0
                );"
            ),
            format!("CREATE INDEX IF NOT EXISTS idx_{table}_name ON {table}(name);"),
        ]
    }

    fn select_sql(table: &str) -> String {
        format!("SELECT id, name, description, sort_order FROM {table} ORDER BY id DESC")
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Task {
            id: RecordId(row.get("id")?),
            name: row.get("name")?,
            description: row.get("description")?,
            order: row.get("sort_order")?,
        })
    }

    fn validate(draft: &NewTask) -> AppResult<NewTask> {
        Ok(NewTask {
            name: required(&draft.name, "task")?,
            description: draft.description.trim().to_string(),
            order: draft.order,
        })
    }

    fn insert(conn: &Connection, table: &str, draft: &NewTask) -> rusqlite::Result<i64> {
        let mut stmt = conn.prepare_cached(&format!(
            "INSERT INTO {table} (name, description, sort_order) VALUES (?1, ?2, ?3)"
        ))?;
        stmt.execute(params![draft.name, draft.description, draft.order])?;
        Ok(conn.last_insert_rowid())
    }

    fn from_draft(id: RecordId, draft: NewTask) -> Self {
        Task {
            id,
            name: draft.name,
            description: draft.description,
            order: draft.order,
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> String {
        if self.description.is_empty() {
            self.name.clone()
        } else {
            format!("{}: {}", self.name, self.description)
        }
    }
}
