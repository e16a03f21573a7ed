use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::models::{Record, Task, Workshop};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

/// Highest schema version a store can be opened at.
pub const LATEST_SCHEMA_VERSION: u32 = 2;

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Ensure that the `stores` registry exists. One row per named store.
fn ensure_store_registry(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS stores (
            name           TEXT PRIMARY KEY,
            kind           TEXT NOT NULL,
            schema_version INTEGER NOT NULL,
            updated_at     TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Internal tables, always created before any store is opened.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;
    ensure_store_registry(conn)?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredStore {
    pub name: String,
    pub kind: String,
    pub schema_version: u32,
}

pub fn registered_store(conn: &Connection, name: &str) -> AppResult<Option<RegisteredStore>> {
    let reg = conn
        .query_row(
            "SELECT name, kind, schema_version FROM stores WHERE name = ?1",
            [name],
            |row| {
                Ok(RegisteredStore {
                    name: row.get(0)?,
                    kind: row.get(1)?,
                    schema_version: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(reg)
}

pub fn registered_stores(conn: &Connection) -> AppResult<Vec<RegisteredStore>> {
    let mut stmt = conn.prepare("SELECT name, kind, schema_version FROM stores ORDER BY name")?;
    let rows = stmt.query_map([], |row| {
        Ok(RegisteredStore {
            name: row.get(0)?,
            kind: row.get(1)?,
            schema_version: row.get(2)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn check_version(version: u32) -> AppResult<()> {
    if version == 0 || version > LATEST_SCHEMA_VERSION {
        return Err(AppError::Migration(format!(
            "unsupported schema version {} (supported: 1..={})",
            version, LATEST_SCHEMA_VERSION
        )));
    }
    Ok(())
}

/// Bring the store `name` of kind `R` up to `requested`.
///
/// Steps are additive and run inside one transaction. A request below the
/// recorded version leaves the store as it is. Returns the version the store
/// is at afterwards.
pub fn migrate_store<R: Record>(conn: &Connection, name: &str, requested: u32) -> AppResult<u32> {
    check_version(requested)?;

    let current = match registered_store(conn, name)? {
        Some(reg) if reg.kind != R::KIND => {
            return Err(AppError::StoreKindMismatch {
                name: name.to_string(),
                expected: R::KIND.to_string(),
                found: reg.kind,
            });
        }
        Some(reg) => reg.schema_version,
        None => 0,
    };

    if requested <= current {
        return Ok(current);
    }

    let steps = R::schema_steps(name);
    if steps.len() < requested as usize {
        return Err(AppError::Migration(format!(
            "no schema step for {} store '{}' at version {}",
            R::KIND,
            name,
            requested
        )));
    }

    let tx = conn.unchecked_transaction()?;

    for sql in steps
        .iter()
        .skip(current as usize)
        .take((requested - current) as usize)
    {
        tx.execute_batch(sql)?;
    }

    tx.execute(
        "INSERT INTO stores (name, kind, schema_version, updated_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(name) DO UPDATE
            SET schema_version = excluded.schema_version,
                updated_at     = excluded.updated_at",
        params![name, R::KIND, requested, Local::now().to_rfc3339()],
    )?;

    ttlog(
        &tx,
        "migration_applied",
        name,
        &format!(
            "{} store '{}' upgraded from v{} to v{}",
            R::KIND,
            name,
            current,
            requested
        ),
    )?;

    tx.commit()?;
    Ok(requested)
}

/// Upgrade every registered store to the latest schema version.
/// Returns `(store, from, to)` for each store that changed.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<(String, u32, u32)>> {
    init_db(conn)?;

    let mut applied = Vec::new();
    for reg in registered_stores(conn)? {
        if reg.schema_version >= LATEST_SCHEMA_VERSION {
            continue;
        }

        let to = match reg.kind.as_str() {
            k if k == Task::KIND => migrate_store::<Task>(conn, &reg.name, LATEST_SCHEMA_VERSION)?,
            k if k == Workshop::KIND => {
                migrate_store::<Workshop>(conn, &reg.name, LATEST_SCHEMA_VERSION)?
            }
            other => {
                return Err(AppError::Migration(format!(
                    "store '{}' has unknown kind '{}'",
                    reg.name, other
                )));
            }
        };
        applied.push((reg.name, reg.schema_version, to));
    }

    Ok(applied)
}
