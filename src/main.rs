//! Binary entry point for session-journal.
//!
//! This binary provides the CLI for recording sessions and moving them in
//! and out of the CSV interchange format.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{Parser, Subcommand};
use commands::{AddArgs, cmd_add, cmd_export, cmd_import, cmd_list};
use session_journal::config::{CONFIG_PATH_ENV, JournalConfig};
use session_journal::observability;
use std::path::PathBuf;
use std::process::ExitCode;

/// Session Journal - record sessions and exchange them as CSV.
#[derive(Parser)]
#[command(name = "session-journal")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Record a session.
    Add {
        /// Treatment type (e.g. psilocybin, LSD, "Other").
        #[arg(short, long)]
        treatment: String,

        /// Administration method (e.g. oral, nasal).
        #[arg(short, long, default_value = "oral")]
        method: String,

        /// Session time as `YYYY-MM-DD HH:MM` (default: now).
        #[arg(long)]
        at: Option<String>,

        /// Intention for the session.
        #[arg(short, long)]
        intention: Option<String>,

        /// Reflections after the session.
        #[arg(short, long)]
        reflections: Option<String>,

        /// Mood before the session.
        #[arg(long, default_value = "5", allow_hyphen_values = true)]
        mood_before: i64,

        /// Mood after the session.
        #[arg(long, default_value = "5", allow_hyphen_values = true)]
        mood_after: i64,

        /// Music link (Spotify, YouTube, SoundCloud, Apple Music, or any URL).
        #[arg(long)]
        music: Option<String>,
    },

    /// List recorded sessions, newest first.
    List {
        /// Maximum number of entries to show.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Export sessions to CSV.
    Export {
        /// Output file (`-` for stdout; default: `Journal_Export_<date>.csv`).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// First day to include (`YYYY-MM-DD`).
        #[arg(long)]
        from: Option<String>,

        /// Last day to include (`YYYY-MM-DD`).
        #[arg(long)]
        to: Option<String>,

        /// Only export this treatment type.
        #[arg(short, long)]
        treatment: Option<String>,
    },

    /// Import sessions from a CSV export.
    Import {
        /// File to import.
        file: PathBuf,

        /// Merge the entries; without this flag only a summary is shown.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_settings(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(command: Commands, config: &JournalConfig) -> session_journal::Result<()> {
    match command {
        Commands::Add {
            treatment,
            method,
            at,
            intention,
            reflections,
            mood_before,
            mood_after,
            music,
        } => cmd_add(
            config,
            AddArgs {
                at,
                treatment,
                method,
                intention,
                reflections,
                mood_before,
                mood_after,
                music,
            },
        ),

        Commands::List { limit } => cmd_list(config, limit),

        Commands::Export {
            output,
            from,
            to,
            treatment,
        } => cmd_export(config, output, from, to, treatment),

        Commands::Import { file, yes } => cmd_import(config, file, yes),
    }
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> session_journal::Result<JournalConfig> {
    load_config_from(path, std::env::var(CONFIG_PATH_ENV).ok())
}

/// Resolves the config source: explicit path, then env path, then default location.
fn load_config_from(
    path: Option<&str>,
    env_path: Option<String>,
) -> session_journal::Result<JournalConfig> {
    // If a path is provided, load from that file
    if let Some(config_path) = path {
        return JournalConfig::load_from_file(std::path::Path::new(config_path));
    }

    // Environment override for config path
    if let Some(config_path) = env_path
        && !config_path.trim().is_empty()
    {
        return JournalConfig::load_from_file(std::path::Path::new(&config_path));
    }

    // Otherwise, load from default location
    Ok(JournalConfig::load_default())
}
