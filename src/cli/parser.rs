use crate::export::ExportFormat;
use crate::models::role::Role;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for rDowntime
/// Shop-floor downtime tracker with production periods and efficiency, on SQLite
#[derive(Parser)]
#[command(
    name = "rdowntime",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track machine downtimes per production lot and report efficiency using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Login name
    #[arg(global = true, long = "user", short = 'u')]
    pub user: Option<String>,

    /// Password for --user
    #[arg(global = true, long = "password", short = 'p')]
    pub password: Option<String>,

    /// Pretend the current time is "YYYY-MM-DD HH:MM"
    #[arg(global = true, long = "at", value_name = "DATETIME")]
    pub at: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing backup file")]
        force: bool,
    },

    /// Manage users (admin only, except changing your own password)
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage machines (admin only)
    Machine {
        #[command(subcommand)]
        action: MachineAction,
    },

    /// Start a downtime timer on a machine
    Start {
        /// Machine name (case-insensitive)
        machine: String,
    },

    /// Stop the running downtime of a machine
    Stop {
        machine: String,

        #[arg(long, short = 'c', help = "Reason for the stop (required)")]
        comment: String,

        #[arg(long, help = "Post / lot number (required for the lot marker)")]
        post: Option<String>,
    },

    /// Correct a recorded downtime
    Edit {
        id: i64,

        #[arg(long, short = 'c')]
        comment: Option<String>,

        #[arg(long, short = 'd', help = "Duration in minutes")]
        duration: Option<i64>,

        #[arg(long, help = "Post number (empty string clears it)")]
        post: Option<String>,
    },

    /// Delete a recorded downtime
    Del {
        id: i64,
    },

    /// List recorded downtimes
    List {
        #[arg(long, help = "Filter by year/month/day or a custom range (default: today)")]
        period: Option<String>,

        #[arg(long, help = "Only running downtimes")]
        active: bool,

        #[arg(long, short = 'm', help = "Only this machine")]
        machine: Option<String>,
    },

    /// Show production periods and their efficiency
    Periods {
        #[arg(long, help = "Day to evaluate (YYYY-MM-DD, default: today)")]
        date: Option<String>,
    },

    /// List downtimes grouped by post
    Posts {
        #[arg(long, help = "Filter by year/month/day or a custom range (default: today)")]
        period: Option<String>,
    },

    /// Daily or weekly downtime report
    Report {
        #[arg(value_enum, default_value = "daily")]
        kind: ReportKind,

        #[arg(long, help = "Any day of the report (YYYY-MM-DD, default: today)")]
        date: Option<String>,
    },

    /// Export downtimes or production periods
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, value_name = "RANGE", help = "Filter export by year/month/day or a custom range")]
        range: Option<String>,

        #[arg(long, help = "Export production periods with efficiency instead of downtimes")]
        periods: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Role-specific dashboard
    Dashboard {
        #[arg(long, help = "Keep refreshing until interrupted")]
        watch: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create a user
    Add {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "new-password")]
        new_password: String,

        #[arg(long, value_enum, default_value = "operator")]
        role: Role,
    },
    /// List users
    List,
    /// Delete a user
    Del { id: String },
    /// Change a password (your own unless admin)
    Passwd {
        /// Defaults to the logged-in user
        id: Option<String>,

        #[arg(long = "new-password")]
        new_password: String,
    },
    /// Change a user's role
    Role {
        id: String,

        #[arg(value_enum)]
        role: Role,
    },
}

#[derive(Subcommand)]
pub enum MachineAction {
    /// Register a machine
    Add { name: String },
    /// List machines
    List,
    /// Remove a machine without recorded downtimes
    Del { name: String },
    /// Rename a machine
    Rename { name: String, new_name: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportKind {
    Daily,
    Weekly,
}
