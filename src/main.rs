//! Threads CLI - track ongoing questions and the resources they accumulate

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "thread")]
#[command(version)]
#[command(about = "Track ongoing questions and the resources they accumulate")]
#[command(long_about = r#"
Threads keeps a local notebook of open questions. Each thread collects
resources (URLs or text snippets) and tags as an investigation unfolds.

Example usage:
  thread new "Why is the cache cold after deploys?" --deep
  thread attach "https://bugs.example.com/123"
  thread ls --all
  thread export 3
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (defaults to ~/.config/threads/threads.db)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new thread
    New {
        /// Question or title for the thread
        #[arg(required = true)]
        question: Vec<String>,

        /// Mark the thread as requiring deep analysis
        #[arg(long)]
        deep: bool,

        /// Tags to attach to the thread (repeatable)
        #[arg(long = "tag", value_name = "NAME")]
        tags: Vec<String>,
    },

    /// Attach a resource to a thread via an interactive picker
    Attach {
        /// Resource content; reads the clipboard when omitted
        content: Vec<String>,

        /// Mark the thread as requiring deep analysis
        #[arg(long)]
        deep: bool,

        /// Tags to attach to the thread (repeatable)
        #[arg(long = "tag", value_name = "NAME")]
        tags: Vec<String>,
    },

    /// List threads by last activity
    Ls {
        /// Include archived threads
        #[arg(long)]
        all: bool,

        /// Maximum number of threads to list
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// View a thread's details
    View {
        /// Thread ID
        id: i64,
    },

    /// View the most recently active thread
    Current {
        /// Consider archived threads too
        #[arg(long)]
        all: bool,
    },

    /// Archive a thread
    Archive {
        /// Thread ID
        id: i64,
    },

    /// Unarchive a thread
    Unarchive {
        /// Thread ID
        id: i64,
    },

    /// Export a thread to the clipboard
    Export {
        /// Thread ID
        id: i64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let mut store = commands::open_store(cli.database)?;

    match cli.command {
        Commands::New { question, deep, tags } => {
            commands::run_new(&store, &question.join(" "), deep, &tags)
        }
        Commands::Attach { content, deep, tags } => {
            commands::run_attach(&mut store, &content.join(" "), deep, &tags)
        }
        Commands::Ls { all, limit } => commands::run_ls(&store, limit, all),
        Commands::View { id } => commands::run_view(&store, id),
        Commands::Current { all } => commands::run_current(&store, all),
        Commands::Archive { id } => commands::run_archive(&store, id),
        Commands::Unarchive { id } => commands::run_unarchive(&store, id),
        Commands::Export { id } => commands::run_export(&store, id),
    }
}
