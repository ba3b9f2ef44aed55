//! WWDC notes command-line interface
//!
//! Browse the session registry and check which sessions have notes.
//!
//! # Usage
//!
//! ```bash
//! # List sessions from the bundled registry
//! wwdc-notes list --year 2023
//!
//! # Print the note file name for a session
//! wwdc-notes file-name wwdc2023-10187
//!
//! # Use an external sessions.json and reject key/id mismatches
//! wwdc-notes --sessions data/sessions.json --verify-keys show wwdc2023-10187
//!
//! # Report note coverage for a directory of articles
//! wwdc-notes notes Notes.docc
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;
use wwdc_sessions::{LoadOptions, NoteIndex, SessionRecord, SessionRegistry};

#[derive(Debug, Parser)]
#[command(name = "wwdc-notes")]
#[command(version)]
#[command(about = "Browse WWDC sessions and check note coverage")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Session lookup JSON (uses the bundled registry if omitted)
    #[arg(long, global = true)]
    sessions: Option<PathBuf>,

    /// Fail if a registry key differs from its record id
    #[arg(long, global = true)]
    verify_keys: bool,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List sessions with their note file names
    List {
        /// Only sessions from this year
        #[arg(long)]
        year: Option<u16>,
    },

    /// Show one session in full
    Show {
        /// Session id, e.g. wwdc2023-10187
        id: String,
    },

    /// Print the note file name for a session
    FileName {
        /// Session id
        id: String,
    },

    /// List related sessions
    Related {
        /// Session id
        id: String,
    },

    /// Search titles, ignoring case, diacritics and width
    Search {
        /// Text to look for
        query: String,
    },

    /// Report which sessions have notes in a directory
    Notes {
        /// Directory holding note articles
        dir: PathBuf,
    },
}

/// Session plus its derived file name, for JSON output.
#[derive(Serialize)]
struct SessionView<'a> {
    #[serde(flatten)]
    session: &'a SessionRecord,
    #[serde(rename = "fileName")]
    file_name: String,
}

impl<'a> From<&'a SessionRecord> for SessionView<'a> {
    fn from(session: &'a SessionRecord) -> Self {
        Self {
            session,
            file_name: session.file_name(),
        }
    }
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

/// `RUST_LOG` directives win when present and valid; otherwise `level`.
fn env_filter(level: Level, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(level.into()))
}

fn load_registry(cli: &Cli) -> Result<SessionRegistry> {
    match &cli.sessions {
        Some(path) => {
            let options = if cli.verify_keys {
                LoadOptions::verified()
            } else {
                LoadOptions::default()
            };
            SessionRegistry::load_with(path, &options)
                .with_context(|| format!("loading sessions from {}", path.display()))
        }
        None => SessionRegistry::bundled().context("decoding bundled sessions"),
    }
}

fn lookup<'a>(registry: &'a SessionRegistry, id: &str) -> Result<&'a SessionRecord> {
    registry
        .get(id)
        .ok_or_else(|| anyhow!("unknown session id {id:?}"))
}

fn run(cli: &Cli) -> Result<()> {
    let registry = load_registry(cli)?;
    debug!(sessions = registry.len(), "registry ready");

    match &cli.command {
        Commands::List { year } => {
            let sessions: Vec<&SessionRecord> = match year {
                Some(year) => registry.by_year(*year),
                None => registry.iter().map(|(_, session)| session).collect(),
            };
            print_sessions(&sessions, cli.format)
        }
        Commands::Show { id } => {
            let session = lookup(&registry, id)?;
            match cli.format {
                OutputFormat::Json => print_json(&SessionView::from(session)),
                OutputFormat::Text => {
                    print_session(session);
                    Ok(())
                }
            }
        }
        Commands::FileName { id } => {
            let session = lookup(&registry, id)?;
            match cli.format {
                OutputFormat::Json => print_json(&session.file_name()),
                OutputFormat::Text => {
                    println!("{}", session.file_name());
                    Ok(())
                }
            }
        }
        Commands::Related { id } => {
            let related = registry
                .related(id)
                .ok_or_else(|| anyhow!("unknown session id {id:?}"))?;
            print_sessions(&related, cli.format)
        }
        Commands::Search { query } => print_sessions(&registry.search(query), cli.format),
        Commands::Notes { dir } => {
            let index = NoteIndex::scan(dir)
                .with_context(|| format!("scanning notes in {}", dir.display()))?;
            let coverage = index.coverage(&registry);
            match cli.format {
                OutputFormat::Json => print_json(&coverage),
                OutputFormat::Text => {
                    println!(
                        "{} of {} sessions have notes ({:.0}%)",
                        coverage.documented.len(),
                        registry.len(),
                        coverage.ratio() * 100.0
                    );
                    for id in &coverage.missing {
                        println!("missing  {id}");
                    }
                    for id in &coverage.unstorable {
                        println!("unstorable {id}");
                    }
                    for stem in &coverage.orphans {
                        println!("orphan   {stem}");
                    }
                    Ok(())
                }
            }
        }
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_sessions(sessions: &[&SessionRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let views: Vec<SessionView<'_>> =
                sessions.iter().map(|s| SessionView::from(*s)).collect();
            print_json(&views)
        }
        OutputFormat::Text => {
            for session in sessions {
                println!("{:<18} {}", session.id, session.file_name());
            }
            Ok(())
        }
    }
}

fn print_session(session: &SessionRecord) {
    println!("{}", session.title);
    println!("  id:        {}", session.id);
    println!("  year:      {}", session.year);
    println!("  code:      {}", session.code);
    println!("  file name: {}", session.file_name());
    if let Some(permalink) = &session.permalink {
        println!("  permalink: {permalink}");
    }
    if let Some(minutes) = session.length_in_minutes {
        println!("  length:    {minutes} min");
    }
    if session.has_related() {
        println!("  related:   {}", session.related_session_ids.join(", "));
    }
    println!();
    println!("{}", session.description);
}
