//! Command-line view over a saved sync response.
//!
//! # Responsibility
//! - Load one sync response, rebuild the project/section/task forest, and
//!   print outlines, roots, orphans or suffix-based task selections.
//! - Keep output deterministic for scripting.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use todotree_core::tree::walk::outline;
use todotree_core::{
    default_log_level, init_logging, map_id_to_branch, read_changes, select, ChangeSet,
    FileSyncSource, FlatRecord, LogConfig, Node, Registry, SelectMode, SyncOutcome,
};

#[derive(Parser, Debug)]
#[command(name = "todotree", version, about = "Rebuild the task tree from a sync response")]
struct Args {
    /// Saved sync response (JSON)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Sync token the response answers; `*` for a full sync
    #[arg(long, default_value = "*")]
    sync_token: String,

    /// Log level: trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every root with its subtree
    Tree,
    /// List nodes that declare no parent
    Roots,
    /// List nodes whose parent is missing from the response
    Orphans,
    /// Select tasks under records whose name ends with a suffix
    Select {
        #[arg(long, value_enum, default_value_t = Mode::Parallel)]
        mode: Mode,
        #[arg(long)]
        suffix: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Serial,
    Parallel,
    All,
}

impl From<Mode> for SelectMode {
    fn from(value: Mode) -> Self {
        match value {
            Mode::Serial => SelectMode::Serial,
            Mode::Parallel => SelectMode::Parallel,
            Mode::All => SelectMode::All,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        let config = LogConfig::new(level, log_dir)?;
        init_logging(&config)?;
    }

    let source = FileSyncSource::new(&args.input);
    let change_set = match read_changes(&source, &args.sync_token)
        .with_context(|| format!("reading sync response {}", args.input.display()))?
    {
        SyncOutcome::NoChanges => {
            println!("no changes since last sync");
            return Ok(());
        }
        SyncOutcome::Changes(change_set) => change_set,
    };

    let registry = map_id_to_branch(&change_set).context("building task tree")?;
    for line in render(&args.command, &change_set, &registry) {
        println!("{line}");
    }
    Ok(())
}

fn render(command: &Command, change_set: &ChangeSet, registry: &Registry) -> Vec<String> {
    match command {
        Command::Tree => registry
            .roots()
            .flat_map(|(index, _)| outline(registry, index))
            .map(|(depth, node)| format!("{}{}", "  ".repeat(depth), describe(node)))
            .collect(),
        Command::Roots => registry.roots().map(|(_, node)| describe(node)).collect(),
        Command::Orphans => registry
            .orphans()
            .map(|(_, node)| {
                let parent = node
                    .record()
                    .parent_id()
                    .map(|id| id.to_string())
                    .unwrap_or_default();
                format!("{} (missing parent {parent})", describe(node))
            })
            .collect(),
        Command::Select { mode, suffix } => {
            let selection = select((*mode).into(), change_set, registry, suffix);
            let mut lines: Vec<String> = selection
                .selected
                .iter()
                .map(|task| describe_record(*task))
                .collect();
            lines.push(format!(
                "selected={} rejected={}",
                selection.selected.len(),
                selection.rejected.len()
            ));
            lines
        }
    }
}

fn describe(node: &Node) -> String {
    describe_record(node.record())
}

fn describe_record(record: &dyn FlatRecord) -> String {
    let id = record.id().map(|id| id.to_string()).unwrap_or_default();
    format!("{} {} [{}]", record.kind(), record.display_name(), id)
}
