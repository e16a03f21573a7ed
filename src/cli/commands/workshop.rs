use crate::cli::commands::{delete_at, open_screen};
use crate::cli::parser::{Commands, WorkshopAction, WorkshopArgs};
use crate::cli::presenter::ConsolePresenter;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::workshop::parse_price;
use crate::models::{NewWorkshop, Workshop};

fn draft_from_args(args: &WorkshopArgs) -> AppResult<NewWorkshop> {
    Ok(NewWorkshop {
        name: args.name.clone(),
        description: args.description.clone(),
        date: args.date.clone(),
        start_time: args.start.clone(),
        end_time: args.end.clone(),
        capacity: args.capacity,
        price: parse_price(&args.price)?,
        kind: args.kind.clone(),
    })
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Workshop { action } = cmd {
        let presenter = ConsolePresenter::new(cfg.separator_char);

        match action {
            WorkshopAction::List { json } => {
                let mut screen = open_screen::<Workshop>(
                    cfg,
                    &cfg.workshops_store,
                    presenter.json(*json),
                    false,
                )?;
                screen.start();
            }

            WorkshopAction::Add(args) => {
                let draft = draft_from_args(args)?;
                let mut screen =
                    open_screen::<Workshop>(cfg, &cfg.workshops_store, presenter, true)?;
                screen.add_record(draft).map_err(|e| e.reported())?;
            }

            WorkshopAction::Del { position, yes } => {
                let presenter = presenter.assume_yes(*yes || !cfg.confirm_delete);
                let mut screen =
                    open_screen::<Workshop>(cfg, &cfg.workshops_store, presenter, true)?;
                delete_at(&mut screen, *position)?;
            }
        }
    }

    Ok(())
}
