use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{RESET, color_for_operation};
use crate::utils::table::{Column, Table};

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("No log entries.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("ID", 6),
            Column::new("DATE", 25),
            Column::new("OPERATION", 30),
            Column::new("MESSAGE", 60),
        ]);

        for e in entries {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or(e.date);

            let op_target = if e.target.is_empty() {
                e.operation.clone()
            } else {
                format!("{} ({})", e.operation, e.target)
            };

            table.add_row(vec![e.id.to_string(), date, op_target, e.message]);
        }

        // Color whole rows after rendering; escape codes would skew the widths.
        for line in table.render().lines() {
            let color = line
                .split_whitespace()
                .nth(3)
                .map(color_for_operation)
                .unwrap_or(RESET);
            println!("{}{}{}", color, line, RESET);
        }

        Ok(())
    }
}
