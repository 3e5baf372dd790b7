//! srdm - Simple Research Data Manager
//!
//! Catalogs research datasets as tables (`db:table`) holding records
//! (`db:table:record`) in a single SQLite file.
//!
//! The catalog location is resolved in this order:
//! - `--path`
//! - `$SRDM_DATA_REPO_PATH`
//! - `[database] path` in `$XDG_CONFIG_HOME/srdm/config.toml`
//! - `$HOME/Data/SRDM/srdm_dataRepo.sqlite`

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::search::{Format, Mode};
use commands::EntryFields;
use srdm_core::{Config, Database, Repository};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "srdm")]
#[command(about = "Simple Research Data Manager")]
#[command(version)]
struct Args {
    /// Catalog file location
    #[arg(long, global = true)]
    path: Option<PathBuf>,

    /// Write a log to $XDG_STATE_HOME/srdm/ at the configured level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Insert a table (db:table) or a record (db:table:record)
    Insert {
        /// Identity of the new entry
        #[arg(long)]
        name: String,

        #[command(flatten)]
        fields: EntryFields,
    },

    /// Change fields of an existing table or record
    Update {
        /// Identity of the entry to change
        #[arg(long)]
        name: String,

        #[command(flatten)]
        fields: EntryFields,
    },

    /// Delete tables or records
    #[command(visible_alias = "rm")]
    Delete {
        /// Identities to delete
        #[arg(required = true)]
        names: Vec<String>,

        /// Also delete the records of a non-empty table
        #[arg(short, long)]
        force: bool,
    },

    /// Show every field of a table or record
    View {
        /// Identity to show
        name: String,
    },

    /// Look up tables and records by identity or record prefix
    Search {
        /// Identities or prefixes to look up
        #[arg(required = true)]
        names: Vec<String>,

        /// Output encoding
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Text layout
        #[arg(long, value_enum, default_value_t = Mode::Detail)]
        mode: Mode,

        /// Write results to a file instead of stdout
        #[arg(long = "output-file", alias = "output_file")]
        output_file: Option<PathBuf>,
    },

    /// Export records matching a pattern ('%' is the wildcard) as JSON
    Export {
        /// Record pattern, e.g. 'genomics:%'
        #[arg(default_value = commands::export::DEFAULT_PATTERN)]
        pattern: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Copy the data file of a table
    Get {
        /// Table identity
        name: String,

        /// Destination (default: the data file's name in the working directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show catalog statistics
    Info,

    /// Check the catalog connection
    Test,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;

    // Logging stays off unless asked for; the guard must outlive the command.
    let _log_guard = if args.verbose {
        Some(srdm_core::logging::init(&config.logging).context("failed to initialize logging")?)
    } else {
        None
    };

    let db_path = config.database_path(args.path.as_deref());
    tracing::debug!(path = %db_path.display(), "Opening catalog");
    let db = Database::open_with_config(&db_path, &config.database)
        .with_context(|| format!("could not open catalog at {}", db_path.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = dispatch(&db, &config, args.command, &mut out);
    out.flush()?;

    db.close().context("failed to close catalog")?;
    result
}

fn dispatch(db: &Database, config: &Config, command: Command, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Insert { name, fields } => {
            commands::insert::run(db, &config.defaults, &name, &fields, out)
        }
        Command::Update { name, fields } => commands::update::run(db, &name, &fields, out),
        Command::Delete { names, force } => commands::delete::run(db, &names, force, out),
        Command::View { name } => commands::view::run(db, &name, out),
        Command::Search {
            names,
            format,
            mode,
            output_file,
        } => commands::search::run(db, &names, format, mode, output_file.as_deref(), out),
        Command::Export { pattern, output } => {
            commands::export::run(db, &pattern, output.as_deref(), out)
        }
        Command::Get { name, output } => commands::get::run(db, &name, output.as_deref(), out),
        Command::Info => commands::info::run(db, out),
        Command::Test => commands::ping::run(db, out),
    }
}
