use crate::errors::{AppError, AppResult};
use crate::models::record::{Record, RecordId, required};
use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

/// A scheduled yoga workshop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workshop {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub capacity: u32,
    pub price: Decimal,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Fields collected by the add-workshop screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewWorkshop {
    pub name: String,
    pub description: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub capacity: u32,
    pub price: Decimal,
    pub kind: String,
}

/// Parse a price as typed by the user ("25", "19.90").
pub fn parse_price(raw: &str) -> AppResult<Decimal> {
    let price =
        Decimal::from_str(raw.trim()).map_err(|_| AppError::InvalidPrice(raw.to_string()))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(AppError::InvalidPrice(format!("{} (must not be negative)", raw)));
    }
    Ok(price)
}

impl Record for Workshop {
    type Draft = NewWorkshop;

    const KIND: &'static str = "workshop";

    fn schema_steps(table: &str) -> Vec<String> {
        vec![
            format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    id          INTEGER PRIMARY KEY AUTOINCREMENT,
                    name        TEXT NOT NULL CHECK(length(name) > 0),
                    description TEXT NOT NULL DEFAULT '',
                    date        TEXT NOT NULL,
                    start_time  TEXT NOT NULL,
                    end_time    TEXT NOT NULL,
                    capacity    INTEGER NOT NULL CHECK(capacity >= 0),
                    price       TEXT NOT NULL,
                    type        TEXT NOT NULL
                );"
            ),
            format!("CREATE INDEX IF NOT EXISTS idx_{table}_name ON {table}(name);"),
        ]
    }

    fn select_sql(table: &str) -> String {
        format!(
            "SELECT id, name, description, date, start_time, end_time, capacity, price, type
             FROM {table} ORDER BY id DESC"
        )
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let price_str: String = row.get("price")?;
        let price = Decimal::from_str(&price_str).map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                7,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidPrice(price_str.clone())),
            )
        })?;

        Ok(Workshop {
            id: RecordId(row.get("id")?),
            name: row.get("name")?,
            description: row.get("description")?,
            date: row.get("date")?,
            start_time: row.get("start_time")?,
            end_time: row.get("end_time")?,
            capacity: row.get("capacity")?,
            price,
            kind: row.get("type")?,
        })
    }

    fn validate(draft: &NewWorkshop) -> AppResult<NewWorkshop> {
        if draft.price.is_sign_negative() && !draft.price.is_zero() {
            return Err(AppError::Validation(format!(
                "Price must not be negative (got {})",
                draft.price
            )));
        }

        Ok(NewWorkshop {
            name: required(&draft.name, "workshop name")?,
            description: draft.description.trim().to_string(),
            date: required(&draft.date, "workshop date")?,
            start_time: required(&draft.start_time, "start time")?,
            end_time: required(&draft.end_time, "end time")?,
            capacity: draft.capacity,
            price: draft.price.normalize(),
            kind: required(&draft.kind, "workshop type")?,
        })
    }

    fn insert(conn: &Connection, table: &str, draft: &NewWorkshop) -> rusqlite::Result<i64> {
        let mut stmt = conn.prepare_cached(&format!(
            "INSERT INTO {table} (name, description, date, start_time, end_time, capacity, price, type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
        ))?;
        stmt.execute(params![
            draft.name,
            draft.description,
            draft.date,
            draft.start_time,
            draft.end_time,
            draft.capacity,
            draft.price.to_string(),
            draft.kind,
        ])?;
        Ok(conn.last_insert_rowid())
    }

    fn from_draft(id: RecordId, draft: NewWorkshop) -> Self {
        Workshop {
            id,
            name: draft.name,
            description: draft.description,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            capacity: draft.capacity,
            price: draft.price,
            kind: draft.kind,
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> String {
        format!(
            "{} ({} {}-{})",
            self.name, self.date, self.start_time, self.end_time
        )
    }
}
