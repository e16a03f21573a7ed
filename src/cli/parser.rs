use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for yoga-admin
#[derive(Parser)]
#[command(
    name = "yoga-admin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Manage to-do tasks and yoga workshops stored in a local SQLite database",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the to-do task list
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Manage yoga workshops
    Workshop {
        #[command(subcommand)]
        action: WorkshopAction,
    },

    /// Show the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Upgrade every store to the latest schema")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks, most recent first
    List {
        #[arg(long, help = "Print the list as JSON")]
        json: bool,
    },

    /// Add a task at the top of the list
    Add {
        /// Task name
        name: String,

        #[arg(long, short, default_value = "")]
        description: String,
    },

    /// Delete the task at a position shown by `task list`
    Del {
        /// Zero-based position
        position: usize,

        #[arg(long, short, help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum WorkshopAction {
    /// List workshops, most recent first
    List {
        #[arg(long, help = "Print the list as JSON")]
        json: bool,
    },

    /// Add a workshop at the top of the list
    Add(WorkshopArgs),

    /// Delete the workshop at a position shown by `workshop list`
    Del {
        /// Zero-based position
        position: usize,

        #[arg(long, short, help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Args, Clone)]
pub struct WorkshopArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Workshop date (free text, e.g. 2026-11-03)
    #[arg(long)]
    pub date: String,

    /// Start time (free text, e.g. 18:30)
    #[arg(long)]
    pub start: String,

    /// End time (free text, e.g. 20:00)
    #[arg(long)]
    pub end: String,

    /// Number of places
    #[arg(long)]
    pub capacity: u32,

    /// Price per participant, e.g. 25 or 19.90
    #[arg(long)]
    pub price: String,

    /// Workshop type (hatha, vinyasa, yin, ...)
    #[arg(long = "type")]
    pub kind: String,
}
