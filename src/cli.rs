use clap::Parser;
use std::path::PathBuf;

/// Sync pending to-dos from the local to-do service into the memory store.
#[derive(Parser, Debug)]
#[command(name = "todo_memory_sync", version, about)]
pub struct Cli {
    /// Path to the JSON config file (default: ~/.config/todo-sync/config.json).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
