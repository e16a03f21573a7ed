//! Terminal implementation of a list screen.

use crate::core::ScreenPresenter;
use crate::errors::AppError;
use crate::models::{Record, Task, Workshop};
use crate::ui::messages::{error, header, info, warning};
use crate::utils::table::{Column, Table};
use std::io::{self, BufRead, Write};

/// How a record kind is laid out as a table row.
pub trait TableRow: Record {
    const TITLE: &'static str;

    fn columns() -> Vec<Column>;

    fn cells(&self) -> Vec<String>;
}

impl TableRow for Task {
    const TITLE: &'static str = "Tasks";

    fn columns() -> Vec<Column> {
        vec![
            Column::new("#", 4),
            Column::new("ID", 6),
            Column::new("NAME", 40),
            Column::new("DESCRIPTION", 50),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            String::new(),
            self.id.to_string(),
            self.name.clone(),
            if self.description.is_empty() {
                "--".to_string()
            } else {
                self.description.clone()
            },
        ]
    }
}

impl TableRow for Workshop {
    const TITLE: &'static str = "Workshops";

    fn columns() -> Vec<Column> {
        vec![
            Column::new("#", 4),
            Column::new("ID", 6),
            Column::new("NAME", 30),
            Column::new("DATE", 12),
            Column::new("TIME", 13),
            Column::new("TYPE", 12),
            Column::new("CAP", 5),
            Column::new("PRICE", 9),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            String::new(),
            self.id.to_string(),
            self.name.clone(),
            self.date.clone(),
            format!("{}-{}", self.start_time, self.end_time),
            self.kind.clone(),
            self.capacity.to_string(),
            self.price.to_string(),
        ]
    }
}

/// Ask a yes/no confirmation on `input`; anything but y/yes is a no.
pub fn ask_confirmation<I: BufRead>(input: &mut I, prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    match input.read_line(&mut s) {
        Ok(_) => matches!(s.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

pub struct ConsolePresenter {
    separator: char,
    assume_yes: bool,
    json: bool,
    muted: bool,
}

impl ConsolePresenter {
    pub fn new(separator: char) -> Self {
        Self {
            separator,
            assume_yes: false,
            json: false,
            muted: false,
        }
    }

    /// While muted, refreshes draw nothing.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Skip the delete prompt.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Render lists as JSON instead of a table.
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    fn render_json<R: Record>(records: &[R]) {
        match serde_json::to_string_pretty(records) {
            Ok(s) => println!("{}", s),
            Err(e) => error(format!("Cannot serialize list: {}", e)),
        }
    }
}

impl<R: TableRow> ScreenPresenter<R> for ConsolePresenter {
    fn refresh(&mut self, records: &[R]) {
        if self.muted {
            return;
        }

        if self.json {
            Self::render_json(records);
            return;
        }

        header(R::TITLE, self.separator);

        if records.is_empty() {
            println!("No {} yet.", R::TITLE.to_lowercase());
            return;
        }

        let mut table = Table::new(R::columns());
        for (pos, r) in records.iter().enumerate() {
            let mut cells = r.cells();
            cells[0] = pos.to_string();
            table.add_row(cells);
        }
        print!("{}", table.render());
    }

    fn confirm_delete(&mut self, record: &R) -> bool {
        if self.assume_yes {
            return true;
        }

        let stdin = io::stdin();
        let mut lock = stdin.lock();
        ask_confirmation(
            &mut lock,
            &format!("Are you sure you want to delete \"{}\"?", record.label()),
        )
    }

    fn notify(&mut self, message: &str) {
        if self.json {
            eprintln!("{}", message);
        } else {
            info(message);
        }
    }

    fn validation_failed(&mut self, err: &AppError) {
        warning(err);
    }

    fn fatal(&mut self, err: &AppError) {
        error(format!("Error: {}", err));
    }
}
