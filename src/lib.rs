//! # Threads - Personal investigation tracker
//!
//! A small CLI for tracking "threads": ongoing questions that accumulate
//! tagged resources (URLs or text snippets) over time.
//!
//! Threads provides:
//! - SQLite-backed storage for threads, resources and tags
//! - Additive, versioned schema migrations
//! - Best-effort timestamped database backups before writes
//! - Listing, archival and clipboard-export of threads

pub mod clock;
pub mod config;
pub mod export;
pub mod resource;
pub mod store;
pub mod thread;
pub mod ui;

// Re-exports for convenient access
pub use clock::{Clock, SystemClock};
pub use resource::{Resource, ResourceKind};
pub use store::ThreadStore;
pub use thread::{Thread, ThreadBrief, ThreadSummary};

/// Result type alias for Threads operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Threads operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Thread not found: #{0}")]
    ThreadNotFound(i64),
}
