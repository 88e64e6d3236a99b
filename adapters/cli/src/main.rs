#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Labyrinth session from text commands.

mod config;
mod input;
mod layout_transfer;
mod render;
mod session;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use labyrinth_world::query;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    config::{FileConfig, Settings},
    input::Input,
    layout_transfer::LayoutSnapshot,
    session::Session,
};

/// Command-line arguments accepted by the `labyrinth` binary.
#[derive(Debug, Parser)]
#[command(name = "labyrinth", about = "Two-player turn-based maze duel")]
struct Args {
    /// Board edge length in cells.
    #[arg(long)]
    size: Option<u32>,
    /// Shots each player starts a match with.
    #[arg(long)]
    shots: Option<u32>,
    /// TOML file providing `board_size` and `starting_shots`.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Layout string produced by the `export` command.
    #[arg(long, value_name = "STRING")]
    layout: Option<String>,
}

/// Entry point for the Labyrinth command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(file, args.size, args.shots);
    info!(?settings, "starting session");

    let (mut session, events) = Session::new(settings);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", query::welcome_banner(session.world()))?;
    for event in &events {
        writeln!(out, "{event}")?;
    }

    if let Some(layout) = &args.layout {
        let snapshot = LayoutSnapshot::decode(layout).context("failed to import layout")?;
        for event in session.submit(snapshot.commands()) {
            writeln!(out, "{event}")?;
        }
    }
    writeln!(out, "{}", render::board(session.world()))?;
    out.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read command from stdin")?;
        let input = match input::parse(&line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(error) => {
                warn!(%error, line = line.as_str(), "rejected input");
                writeln!(out, "{error}")?;
                continue;
            }
        };
        if input == Input::Quit {
            break;
        }

        for status in session.execute(input) {
            writeln!(out, "{status}")?;
        }
        out.flush()?;
    }

    Ok(())
}

/// Routes diagnostics to stderr, filtered by `RUST_LOG` and defaulting to warnings.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
