use crate::cli::commands::{delete_at, open_screen};
use crate::cli::parser::{Commands, TaskAction};
use crate::cli::presenter::ConsolePresenter;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{NewTask, Task};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Task { action } = cmd {
        let presenter = ConsolePresenter::new(cfg.separator_char);

        match action {
            TaskAction::List { json } => {
                let mut screen =
                    open_screen::<Task>(cfg, &cfg.tasks_store, presenter.json(*json), false)?;
                screen.start();
            }

            TaskAction::Add { name, description } => {
                let mut screen = open_screen::<Task>(cfg, &cfg.tasks_store, presenter, true)?;
                screen
                    .add_record(NewTask::new(name.as_str(), description.as_str()))
                    .map_err(|e| e.reported())?;
            }

            TaskAction::Del { position, yes } => {
                let presenter = presenter.assume_yes(*yes || !cfg.confirm_delete);
                let mut screen = open_screen::<Task>(cfg, &cfg.tasks_store, presenter, true)?;
                delete_at(&mut screen, *position)?;
            }
        }
    }

    Ok(())
}
