//! trackbounce - Renders every audio track of a session to its own file.
//!
//! For each audio track the session is muted down to that single track and
//! rendered, so the output folder ends up holding one file per track.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- session.json
//! ```
//!
//! The output format and profile are chosen interactively. Files are written
//! to an `AudioExports` folder next to the session file.

use anyhow::{Context, Result};
use std::path::PathBuf;
use trackbounce::ui::TerminalPresenter;
use trackbounce::{export_audio_tracks, Session};

/// Command-line options for the application.
struct CliOptions {
    /// Session document to export.
    session: PathBuf,
}

impl CliOptions {
    /// Parses command-line arguments.
    ///
    /// Supports:
    /// - `<session.json>`: the session to export (required)
    /// - `--help` or `-h`: Print help and exit
    fn parse() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        let program = args.first().map(String::as_str).unwrap_or("trackbounce");
        let mut session: Option<PathBuf> = None;

        for arg in args.iter().skip(1) {
            match arg.as_str() {
                "--help" | "-h" => {
                    print_usage(program);
                    std::process::exit(0);
                }
                other if other.starts_with('-') => {
                    eprintln!("Unknown option: {}", other);
                    eprintln!("Use --help for usage information");
                    std::process::exit(1);
                }
                other => {
                    if session.is_some() {
                        anyhow::bail!("only one session file may be given");
                    }
                    session = Some(PathBuf::from(other));
                }
            }
        }

        match session {
            Some(session) => Ok(Self { session }),
            None => {
                print_usage(program);
                std::process::exit(1);
            }
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("trackbounce - Export every audio track of a session to its own file");
    eprintln!();
    eprintln!("Usage: {} <SESSION.json>", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -h, --help  Print this help message");
}

/// Main entry point.
fn main() -> Result<()> {
    let cli = CliOptions::parse()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut session = Session::load_from_file(&cli.session)
        .with_context(|| format!("Failed to load session: {}", cli.session.display()))?;
    tracing::info!(
        "Loaded session '{}' with {} track(s)",
        session.name,
        session.tracks().len()
    );
    let settings = session.export.clone();

    let mut presenter = TerminalPresenter::new().context("Failed to setup terminal")?;
    let result = export_audio_tracks(&mut session, &mut presenter, &settings);
    presenter.restore().context("Failed to restore terminal")?;

    match result {
        Ok(summary) => {
            println!(
                "Exported {} track(s) to {}",
                summary.file_count(),
                summary.output_folder.display()
            );
            Ok(())
        }
        Err(e) if e.is_cancellation() => {
            println!("Export cancelled: {}", e);
            Ok(())
        }
        Err(e) => Err(e).context("Export failed"),
    }
}
