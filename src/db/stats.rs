use crate::db::migrate::registered_stores;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

/// Row count of a registered store, if its table is readable.
fn store_rows(pool: &DbPool, name: &str) -> Option<i64> {
    pool.conn
        .query_row(&format!("SELECT COUNT(*) FROM {}", name), [], |row| {
            row.get(0)
        })
        .ok()
}

pub fn print_db_info(pool: &DbPool) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(pool.path()).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, pool.path(), RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) STORES
    //
    let stores = registered_stores(&pool.conn)?;
    println!("{}• Stores:{}", CYAN, RESET);
    if stores.is_empty() {
        println!("    {GREY}--{RESET}");
    }
    for s in &stores {
        let rows = store_rows(pool, &s.name)
            .map(|n| n.to_string())
            .unwrap_or_else(|| format!("{GREY}?{RESET}"));
        println!(
            "    {:<12} {:<9} v{}  {}{}{} records",
            s.name, s.kind, s.schema_version, GREEN, rows, RESET
        );
    }

    //
    // 3) AUDIT LOG
    //
    let log_rows: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM log", [], |row| row.get(0))?;
    println!("{}• Log entries:{} {}", CYAN, RESET, log_rows);
    println!();

    Ok(())
}
