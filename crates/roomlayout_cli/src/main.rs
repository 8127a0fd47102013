//! Scripted driver for a room-layout session.
//!
//! # Responsibility
//! - Own exactly one `LayoutSession` and forward command lines into it.
//! - Print one outcome per command and, optionally, the final layout as JSON.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::warn;
use roomlayout_core::{
    default_log_level, init_logging, FurnitureCollection, LayoutCommand, LayoutSession, LogLevel,
};

const LOG_DIR_ENV: &str = "ROOMLAYOUT_LOG_DIR";

#[derive(Parser)]
#[command(name = "roomlayout")]
#[command(version = roomlayout_core::core_version())]
#[command(about = "Place, move and rotate furniture in a room layout", long_about = None)]
struct Cli {
    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print the final layout as JSON
    #[arg(long)]
    json: bool,

    /// Log level: trace, debug, info, warn or error
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Absolute directory for rolling log files
    #[arg(long)]
    log_dir: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = resolve_log_dir(cli.log_dir) {
        let level = cli.log_level.unwrap_or_else(default_log_level);
        init_logging(level.as_str(), &log_dir).map_err(anyhow::Error::msg)?;
    }

    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut session = LayoutSession::start();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_script(&mut session, input, &mut out)?;

    let layout = session.end();
    if cli.json {
        write_layout_json(&layout, &mut out)?;
    }

    Ok(())
}

/// Writes the final layout as pretty-printed snapshot JSON.
fn write_layout_json(layout: &FurnitureCollection, out: &mut impl Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &layout.snapshot())?;
    writeln!(out)?;
    Ok(())
}

/// Applies every command line from `input`, writing one outcome per command.
///
/// Parse errors are reported with their line number and skipped.
fn run_script(
    session: &mut LayoutSession,
    input: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    for (index, line) in input.lines().enumerate() {
        let line = line.context("failed to read command line")?;
        match LayoutCommand::parse(&line) {
            Ok(Some(command)) => writeln!(out, "{}", session.apply(command))?,
            Ok(None) => {}
            Err(err) => {
                warn!("event=command_rejected module=cli status=error line={}", index + 1);
                writeln!(out, "line {}: {err}", index + 1)?;
            }
        }
    }
    Ok(())
}

/// Flag first, then `ROOMLAYOUT_LOG_DIR`; `None` keeps file logging off.
fn resolve_log_dir(flag: Option<String>) -> Option<String> {
    flag.or_else(|| std::env::var(LOG_DIR_ENV).ok())
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}
