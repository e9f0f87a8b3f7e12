use crate::registry::Category;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// funrun: Fun Run registration and bib number allocation
#[derive(Parser)]
#[command(name = "funrun")]
#[command(version = "0.1.0")]
#[command(about = "Fun Run registration and bib number allocation")]
#[command(
    long_about = "funrun registers participants, assigns each one the next free bib number in their category's band, and gives the administrator a dashboard to list, search, export and clear registrations."
)]
pub struct Cli {
    /// Configuration file (defaults to ./funrun.yaml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding registration data, overrides the config file
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log verbosity, RUST_LOG takes precedence when set
    #[arg(long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a participant and print their bib number
    Register {
        /// Full name, each word is capitalized
        #[arg(short, long)]
        name: String,

        /// National ID (NIK), non-digits are stripped
        #[arg(long)]
        nik: String,

        /// Category: pelajar (student) or umum (general)
        #[arg(short, long, default_value = "pelajar")]
        category: Category,
    },

    /// Log in as administrator
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Log out of the administrator dashboard
    Logout,

    /// List registrations (administrator)
    List {
        /// Case-insensitive filter on name, bib number, NIK or category
        #[arg(short, long)]
        search: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Export registrations to an Excel workbook (administrator)
    Export {
        /// Output file (defaults to the configured export file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete every registration (administrator)
    Clear {
        /// Skip interactive confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

impl Commands {
    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Register { .. } => "register",
            Commands::Login { .. } => "login",
            Commands::Logout => "logout",
            Commands::List { .. } => "list",
            Commands::Export { .. } => "export",
            Commands::Clear { .. } => "clear",
        }
    }

    /// Check if this command is behind the administrator login
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Commands::List { .. } | Commands::Export { .. } | Commands::Clear { .. }
        )
    }

    /// Check if this command modifies stored data
    pub fn modifies_data(&self) -> bool {
        matches!(
            self,
            Commands::Register { .. }
                | Commands::Login { .. }
                | Commands::Logout
                | Commands::Clear { .. }
        )
    }
}
