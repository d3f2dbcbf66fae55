//! CLI commands for Realms.
//!
//! Runs the search and reorder core against a JSON session snapshot, which is
//! handy for inspecting what the sidebar and search palette would do.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::core::reorder::{move_item, CommitOutcome, DragItem, DropRegion};
use crate::core::search::SearchEngine;
use crate::model::Snapshot;
use crate::services::session::{MemorySession, SessionProvider};

#[derive(Parser)]
#[command(name = "realms")]
#[command(about = "Tab search and dock reordering for realm snapshots", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Snapshot file (default: session.snapshot_path from the config)
    #[arg(long, global = true, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Config file (default: <config dir>/realms/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank tabs across all realms
    Search {
        /// Query text; empty lists tabs in session order
        #[arg(default_value = "")]
        query: String,
    },

    /// Move a tab into a dock
    MoveTab {
        tab: String,

        /// Target dock
        #[arg(long)]
        to: String,

        /// Insert before this tab (default: append)
        #[arg(long)]
        before: Option<String>,

        /// Write the reordered snapshot back to the file
        #[arg(long)]
        write: bool,
    },

    /// Move a dock to the position of another dock
    MoveDock {
        dock: String,

        /// Dock whose position it takes
        #[arg(long)]
        over: String,

        /// Write the reordered snapshot back to the file
        #[arg(long)]
        write: bool,
    },

    /// Validate the snapshot and print a summary
    Check,
}

/// Parse arguments and run the selected command, printing its output
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let output = execute(cli)?;
    print!("{}", output);
    Ok(())
}

/// Run a parsed command and return what it would print
pub fn execute(cli: Cli) -> anyhow::Result<String> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load(),
    };

    let snapshot_path = cli
        .snapshot
        .clone()
        .unwrap_or_else(|| config.session.resolved_snapshot_path());

    let mut session = MemorySession::load(&snapshot_path)
        .with_context(|| format!("Failed to load snapshot {}", snapshot_path.display()))?;

    match cli.command {
        Commands::Search { query } => search(&config, &session, &query),
        Commands::Check => check(&session),
        Commands::MoveTab {
            tab,
            to,
            before,
            write,
        } => {
            let region = match before {
                Some(tab_id) => DropRegion::Tab {
                    dock_id: to,
                    tab_id,
                },
                None => DropRegion::DockBody { dock_id: to },
            };
            reorder(&mut session, DragItem::Tab { tab_id: tab }, region, write.then_some(&snapshot_path))
        }
        Commands::MoveDock { dock, over, write } => reorder(
            &mut session,
            DragItem::Dock { dock_id: dock },
            DropRegion::Dock { dock_id: over },
            write.then_some(&snapshot_path),
        ),
    }
}

fn search(config: &Config, session: &MemorySession, query: &str) -> anyhow::Result<String> {
    let engine = SearchEngine::new(&config.search);
    let results = engine.rank(session.current(), query);

    let mut out = String::new();
    if results.is_empty() {
        writeln!(out, "{}", if query.is_empty() { "No open tabs" } else { "No tabs found" })?;
        return Ok(out);
    }

    for result in &results {
        let breadcrumb = result.breadcrumb();
        writeln!(
            out,
            "{:>5.1}  {}{}  {}",
            result.score,
            result.display_title(&config.search.placeholder_title),
            if breadcrumb.is_empty() {
                String::new()
            } else {
                format!("  [{}]", breadcrumb)
            },
            result.tab.url
        )?;
    }
    Ok(out)
}

fn check(session: &MemorySession) -> anyhow::Result<String> {
    let snapshot = session.current();
    let mut out = String::new();
    writeln!(
        out,
        "{} realms, {} docks, {} tabs",
        snapshot.realms.len(),
        snapshot.docks.len(),
        snapshot.tabs.len()
    )?;
    write_docks(&mut out, snapshot)?;
    Ok(out)
}

fn reorder(
    session: &mut MemorySession,
    item: DragItem,
    region: DropRegion,
    write_to: Option<&PathBuf>,
) -> anyhow::Result<String> {
    let snapshot = session.snapshot()?;

    let next = match move_item(&snapshot, &item, &region) {
        CommitOutcome::Committed(next) => next,
        CommitOutcome::NoOp(reason) => bail!("Nothing to move ({:?})", reason),
    };

    session.commit(next)?;
    if let Some(path) = write_to {
        session
            .current()
            .save(path)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        tracing::info!(path = %path.display(), "Saved reordered snapshot");
    }

    let mut out = String::new();
    write_docks(&mut out, session.current())?;
    Ok(out)
}

fn write_docks(out: &mut String, snapshot: &Snapshot) -> std::fmt::Result {
    for dock in &snapshot.docks {
        writeln!(
            out,
            "{}{}: {}",
            dock.name,
            if dock.is_collapsed { " (collapsed)" } else { "" },
            dock.tab_ids.join(", ")
        )?;
    }
    Ok(())
}
