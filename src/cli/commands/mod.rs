pub mod config;
pub mod db;
pub mod init;
pub mod log;
pub mod task;
pub mod workshop;

use crate::cli::presenter::{ConsolePresenter, TableRow};
use crate::config::Config;
use crate::core::{RecordListController, ScreenPresenter};
use crate::db::store::RecordStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};

pub type Screen<R> = RecordListController<R, ConsolePresenter>;

/// Open the store `store_name` behind a console screen.
///
/// With `quiet` the screen is loaded without drawing it, for actions that
/// draw the list only once they are done. Otherwise the caller starts it.
pub fn open_screen<R: TableRow>(
    cfg: &Config,
    store_name: &str,
    mut presenter: ConsolePresenter,
    quiet: bool,
) -> AppResult<Screen<R>> {
    let store = match RecordStore::<R>::init_for(&cfg.database, store_name, cfg.schema_version)
    {
        Ok(store) => store,
        Err(e) => {
            ScreenPresenter::<R>::fatal(&mut presenter, &e);
            return Err(e.reported());
        }
    };

    let mut screen = RecordListController::new(store, presenter);
    if quiet {
        screen.presenter_mut().set_muted(true);
        screen.start();
        screen.presenter_mut().set_muted(false);
    }
    Ok(screen)
}

/// Shared `del` flow of both list screens.
pub fn delete_at<R: TableRow>(screen: &mut Screen<R>, position: usize) -> AppResult<()> {
    let len = screen.records().len();
    if position >= len {
        warning(format!(
            "No {} at position {} (the list has {} entries).",
            R::KIND,
            position,
            len
        ));
        return Ok(());
    }

    if !screen.request_delete(position).map_err(|e| e.reported())? {
        info("Nothing deleted.");
    }
    Ok(())
}
