use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::cli::commands::{Cli, Commands, EventsArgs, ExportArgs, ImportArgs};
use crate::ops::transfer::{self, TransferError};
use crate::storage::kv::FileKv;
use crate::storage::log::{self, EventCategory, EventEntry};
use crate::storage::{self, DataDirError, STORE_FILE};
use crate::store::TaskStore;

/// Error type for CLI commands
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    DataDir(#[from] DataDirError),
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error("could not read {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteFile { path: PathBuf, source: io::Error },
    #[error("import replaces the whole collection; re-run with --yes to confirm")]
    ImportNotConfirmed,
}

/// Dispatch a parsed CLI invocation to its handler.
pub fn dispatch(cli: Cli) -> Result<(), CliError> {
    let data_dir = storage::resolve_data_dir(cli.data_dir.as_deref())?;
    match cli.command {
        Some(Commands::Export(args)) => cmd_export(&data_dir, args),
        Some(Commands::Import(args)) => cmd_import(&data_dir, args),
        Some(Commands::Events(args)) => cmd_events(&data_dir, args),
        // No subcommand launches the TUI from main
        None => Ok(()),
    }
}

fn open_store(data_dir: &Path) -> TaskStore<FileKv> {
    let kv = FileKv::open(&data_dir.join(STORE_FILE));
    TaskStore::open(kv, data_dir)
}

fn cmd_export(data_dir: &Path, args: ExportArgs) -> Result<(), CliError> {
    let store = open_store(data_dir);
    let json = transfer::export_json(store.tasks())?;

    match args.output {
        Some(path) => {
            fs::write(&path, &json).map_err(|e| CliError::WriteFile {
                path: path.clone(),
                source: e,
            })?;
            println!("exported {} tasks to {}", store.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn cmd_import(data_dir: &Path, args: ImportArgs) -> Result<(), CliError> {
    let text = fs::read_to_string(&args.file).map_err(|e| CliError::ReadFile {
        path: args.file.clone(),
        source: e,
    })?;
    let tasks = transfer::import_json(&text)?;

    if !args.yes {
        return Err(CliError::ImportNotConfirmed);
    }

    let mut store = open_store(data_dir);
    let replaced = store.len();
    let count = tasks.len();
    store.replace_all(tasks);

    log::log_event(
        data_dir,
        EventEntry::new(EventCategory::Import, "collection replaced")
            .field("Source", args.file.display().to_string())
            .field("Tasks", count.to_string())
            .field("Replaced", replaced.to_string()),
    );

    println!("imported {} tasks (replaced {})", count, replaced);
    Ok(())
}

fn cmd_events(data_dir: &Path, args: EventsArgs) -> Result<(), CliError> {
    let entries = log::read_events(data_dir, Some(args.limit));
    if entries.is_empty() {
        println!("no storage events recorded");
        return Ok(());
    }

    for entry in entries {
        println!(
            "{}  {:<6} {}",
            entry
                .timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            entry.category.to_string(),
            entry.description,
        );
        for (key, value) in &entry.fields {
            println!("    {}: {}", key, value);
        }
    }
    Ok(())
}
