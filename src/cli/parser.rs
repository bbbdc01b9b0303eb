use crate::export::ExportFormat;
use crate::models::program::Program;
use crate::models::session::Session;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rAttendance
/// CLI application to record event attendance by scanning membership cards
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track member attendance at organization events: roster, events, card scanning and reports on SQLite",
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

fn parse_session(s: &str) -> Result<Session, String> {
    Session::from_code(s).ok_or_else(|| format!("invalid session '{}': use morning or afternoon", s))
}

fn parse_program(s: &str) -> Result<Program, String> {
    Program::from_code(s).ok_or_else(|| {
        let codes: Vec<&str> = Program::ALL.iter().map(|p| p.code()).collect();
        format!("invalid program '{}': use one of {}", s, codes.join(", "))
    })
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

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

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

    /// Officer accounts and sign-in
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Manage the member roster
    Member {
        #[command(subcommand)]
        action: MemberAction,
    },

    /// Manage events
    Event {
        #[command(subcommand)]
        action: EventAction,
    },

    /// Scan membership cards for an event (toggles time-in / time-out)
    Scan {
        #[arg(long, short = 'e', help = "Event ID to record attendance for")]
        event: i64,

        #[arg(long, short = 's', value_parser = parse_session, help = "Force the session (morning/afternoon) instead of using the clock")]
        session: Option<Session>,

        /// School IDs read by the scanner; read from stdin when omitted
        codes: Vec<String>,
    },

    /// Attendance report for an event (default: most recent)
    Report {
        #[arg(long, short = 'e')]
        event: Option<i64>,

        #[arg(long, short = 's', value_parser = parse_session)]
        session: Option<Session>,
    },

    /// Overview of members, events and today's attendance
    Dashboard,

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Export attendance records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute path of the output file")]
        file: String,

        #[arg(long, short = 'e', help = "Event ID (default: most recent event)")]
        event: Option<i64>,

        #[arg(
            long,
            value_name = "RANGE",
            conflicts_with = "event",
            help = "Every event in a year/month/day or a custom range (e.g. 2025-08:2025-10)"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an officer account and sign in
    Signup {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign in as an existing officer
    Signin {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign out the current officer
    Signout,

    /// Show the signed-in officer
    Whoami,
}

#[derive(Subcommand)]
pub enum MemberAction {
    /// Add a member to the roster
    Add {
        #[arg(long = "school-id")]
        school_id: String,

        #[arg(long)]
        name: String,

        #[arg(long, help = "BSCS, BSIT, BSIS or BTVTED-CSS")]
        program: String,

        #[arg(long, help = "Block 1-5")]
        block: String,

        #[arg(long = "year", help = "Year level 1-4")]
        year_level: String,
    },

    /// Edit a member; only the given fields change
    Edit {
        id: i64,

        #[arg(long = "school-id")]
        school_id: Option<String>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        program: Option<String>,

        #[arg(long)]
        block: Option<String>,

        #[arg(long = "year")]
        year_level: Option<String>,
    },

    /// Delete a member and their attendance
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List the roster
    List {
        #[arg(long = "school-id", help = "School ID contains")]
        school_id: Option<String>,

        #[arg(long, help = "Name contains (case-insensitive)")]
        name: Option<String>,

        #[arg(long, value_parser = parse_program)]
        program: Option<Program>,

        #[arg(long)]
        block: Option<u8>,

        #[arg(long = "year")]
        year_level: Option<u8>,

        #[arg(long, short = 'p', default_value_t = 1)]
        page: usize,
    },

    /// Bulk import members from a tab-separated file (school_id, name, program)
    Import {
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Recompute year levels from the entry year in each school ID
    RecalcYears,
}

#[derive(Subcommand)]
pub enum EventAction {
    /// Create an event
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, help = "Event date (YYYY-MM-DD)")]
        date: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Edit an event; only the given fields change
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete an event and its attendance
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List events, newest first
    List {
        #[arg(long, short = 'r', help = "Filter by year/month/day or a custom range")]
        range: Option<String>,
    },
}
