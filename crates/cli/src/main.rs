mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tally_core::{CalendarDate, Clock, DEFAULT_DURATION_DAYS};
use tally_storage::{FileStore, ProgressRepository};
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use commands::Session;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Track a daily challenge: log days, keep notes, watch the streak.
#[derive(Parser)]
#[command(name = "tally", version, about = "Daily challenge tracker")]
struct Cli {
    /// Directory holding the challenge data (overrides TALLY_DATA_DIR and the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to a tally.toml config file (default: ./tally.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Treat this date (YYYY-MM-DD) as today instead of reading the system clock
    #[arg(long, global = true)]
    today: Option<CalendarDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new challenge
    Start {
        /// Participant name
        name: String,
        /// Challenge length in days (10-365)
        #[arg(long, default_value_t = i64::from(DEFAULT_DURATION_DAYS))]
        days: i64,
        /// First day of the challenge (default: today)
        #[arg(long)]
        start: Option<CalendarDate>,
        /// Replace a challenge that is already in progress
        #[arg(long)]
        force: bool,
    },

    /// Show progress, streak and the next milestone
    Status,

    /// Mark today as done
    Log {
        /// Note to attach to today
        #[arg(long)]
        note: Option<String>,
    },

    /// Mark an earlier day as done
    LogPast {
        /// Date to log (YYYY-MM-DD)
        date: CalendarDate,
        /// Note to attach to that day
        #[arg(long)]
        note: Option<String>,
    },

    /// Write the note for a day, replacing any existing text
    Note {
        /// Note text
        text: String,
        /// Day the note belongs to (default: today)
        #[arg(long)]
        date: Option<CalendarDate>,
    },

    /// Change the text of an existing note
    EditNote {
        /// Date of the note (YYYY-MM-DD)
        date: CalendarDate,
        /// New note text (may be empty)
        text: String,
    },

    /// Remove a logged day and its note
    Delete {
        /// Date to remove (YYYY-MM-DD)
        date: CalendarDate,
    },

    /// Change the challenge length
    Duration {
        /// New length in days (10-365, not below the days already logged)
        days: i64,
    },

    /// List every day of the challenge with its status and note
    Days,

    /// List milestones and which are achieved
    Milestones,

    /// Check a stored challenge file and report what would be repaired
    Validate {
        /// Path to the JSON file
        file: PathBuf,
        /// Rewrite the file in canonical form
        #[arg(long)]
        fix: bool,
    },

    /// Delete the current challenge
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let session = match open_session(&cli) {
        Ok(s) => s,
        Err(msg) => {
            report_error(&msg, cli.output, cli.quiet);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Start {
            name,
            days,
            start,
            force,
        } => {
            commands::start::cmd_start(&session, &name, days, start, force);
        }
        Commands::Status => {
            commands::status::cmd_status(&session);
        }
        Commands::Log { note } => {
            commands::log::cmd_log(&session, note.as_deref());
        }
        Commands::LogPast { date, note } => {
            commands::log::cmd_log_past(&session, date, note.as_deref());
        }
        Commands::Note { text, date } => {
            commands::note::cmd_note(&session, date, &text);
        }
        Commands::EditNote { date, text } => {
            commands::note::cmd_edit_note(&session, date, &text);
        }
        Commands::Delete { date } => {
            commands::log::cmd_delete(&session, date);
        }
        Commands::Duration { days } => {
            commands::duration::cmd_duration(&session, days);
        }
        Commands::Days => {
            commands::days::cmd_days(&session);
        }
        Commands::Milestones => {
            commands::milestones::cmd_milestones(&session);
        }
        Commands::Validate { file, fix } => {
            commands::validate::cmd_validate(&session, &file, fix);
        }
        Commands::Reset { yes } => {
            commands::reset::cmd_reset(&session, yes);
        }
    }
}

/// Repairs are reported by the commands themselves, so library warnings stay
/// hidden unless TALLY_LOG asks for them.
fn init_logging(quiet: bool) {
    let default_level = if quiet { "off" } else { "error" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TALLY_LOG").unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn open_session(cli: &Cli) -> Result<Session, String> {
    let config = config::load_config(cli.config.as_deref())?;
    let env_dir = std::env::var_os(config::DATA_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    let data_dir = config::resolve_data_dir(cli.data_dir.clone(), env_dir, &config);
    tracing::debug!(data_dir = %data_dir.display(), "opening challenge store");

    let store = FileStore::new(data_dir);
    let repo = match &config.key {
        Some(key) => ProgressRepository::with_key(store, key.as_str())
            .map_err(|e| format!("invalid key in config: {}", e))?,
        None => ProgressRepository::new(store),
    };

    let clock = match cli.today {
        Some(today) => Clock::fixed(today),
        None => system_clock()?,
    };

    Ok(Session {
        repo,
        clock,
        output: cli.output,
        quiet: cli.quiet,
    })
}

fn system_clock() -> Result<Clock, String> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    Clock::from_instant(now).ok_or_else(|| format!("system clock reads an unsupported time: {}", now))
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
