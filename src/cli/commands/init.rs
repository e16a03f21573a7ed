use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log;
use crate::db::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::{Task, Workshop};
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This prepares:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database
///  - the task and workshop stores at the configured schema version
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;

    println!("⚙️  Initializing yoga-admin…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &cfg.database);

    let tasks = RecordStore::<Task>::init_for(&cfg.database, &cfg.tasks_store, cfg.schema_version)?;
    let pool = tasks.into_pool().ok_or(AppError::NotInitialized)?;

    let workshops =
        RecordStore::<Workshop>::init_for_pool(pool, &cfg.workshops_store, cfg.schema_version)?;
    let pool = workshops.into_pool().ok_or(AppError::NotInitialized)?;

    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &cfg.database),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }
    pool.close()?;

    success(format!("Database initialized at {}", &cfg.database));
    Ok(())
}
