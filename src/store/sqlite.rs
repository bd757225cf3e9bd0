//! SQLite-backed thread store

use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::backup;
use super::schema;
use crate::clock::{Clock, SystemClock};
use crate::resource::{Resource, ResourceKind};
use crate::thread::{Thread, ThreadBrief, ThreadSummary};
use crate::{Error, Result};

/// SQLite-backed storage for threads, resources and tags.
///
/// Opening a store creates the backing file and directory if absent,
/// ensures the base schema, and applies pending migrations. File-backed
/// stores take a best-effort backup snapshot before every write.
pub struct ThreadStore {
    conn: Connection,
    clock: Box<dyn Clock>,
    paths: Option<StorePaths>,
}

struct StorePaths {
    db_path: PathBuf,
    backup_dir: PathBuf,
}

impl ThreadStore {
    /// Open a database file (creates if it doesn't exist)
    pub fn open(db_path: &Path, backup_dir: &Path) -> Result<Self> {
        Self::open_with_clock(db_path, backup_dir, Box::new(SystemClock))
    }

    /// Open a database file with an explicit clock
    pub fn open_with_clock(db_path: &Path, backup_dir: &Path, clock: Box<dyn Clock>) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(db_path)?;
        let store = Self {
            conn,
            clock,
            paths: Some(StorePaths {
                db_path: db_path.to_path_buf(),
                backup_dir: backup_dir.to_path_buf(),
            }),
        };
        store.ensure_ready()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing). No backups are taken.
    pub fn open_in_memory() -> Result<Self> {
        Self::open_in_memory_with_clock(Box::new(SystemClock))
    }

    /// Open an in-memory database with an explicit clock
    pub fn open_in_memory_with_clock(clock: Box<dyn Clock>) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn,
            clock,
            paths: None,
        };
        store.ensure_ready()?;
        Ok(store)
    }

    // ========== Schema Management ==========

    /// Ensure base tables exist and run pending migrations. Idempotent.
    fn ensure_ready(&self) -> Result<()> {
        for stmt in schema::base_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        self.migrate()
    }

    /// Apply every migration newer than the current version, in order.
    /// Pending steps are detected via the version marker, never via
    /// "table already exists" errors.
    fn migrate(&self) -> Result<()> {
        let current = self.schema_version()?;
        for migration in schema::MIGRATIONS {
            if migration.version <= current {
                continue;
            }
            debug!("applying schema migration {}", migration.version);
            self.conn.execute_batch(migration.sql)?;
            self.set_schema_version(migration.version)?;
        }
        Ok(())
    }

    /// Current schema version; 0 when the marker table does not exist yet.
    pub fn schema_version(&self) -> Result<i32> {
        let marker_exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
            [],
            |row| row.get(0),
        )?;
        if !marker_exists {
            return Ok(0);
        }
        let version: Option<i32> = self
            .conn
            .query_row("SELECT version FROM schema_version WHERE id = 1", [], |row| row.get(0))
            .optional()?;
        Ok(version.unwrap_or(0))
    }

    fn set_schema_version(&self, version: i32) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO schema_version (id, version) VALUES (1, ?1)",
            [version],
        )?;
        Ok(())
    }

    /// Snapshot the database file before a write. Failures are logged and
    /// swallowed; the write proceeds either way. In-memory stores skip this.
    fn backup_before_write(&self) {
        let Some(paths) = &self.paths else { return };
        match backup::backup_database(&paths.db_path, &paths.backup_dir) {
            Ok(Some(path)) => debug!("database backed up to {}", path.display()),
            Ok(None) => {}
            Err(e) => debug!("skipping database backup: {}", e),
        }
    }

    // ========== Thread Operations ==========

    /// Create a new thread. Returns the assigned id.
    pub fn create_thread(&self, question: &str) -> Result<i64> {
        if question.trim().is_empty() {
            return Err(Error::Validation("thread question must not be empty".into()));
        }
        self.backup_before_write();
        let now = self.clock.now();
        self.conn.execute(
            "INSERT INTO threads (question, created_at, last_active) VALUES (?1, ?2, ?3)",
            params![question, now, now],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// List threads sorted by last activity, newest first, with a live
    /// resource count per thread. Archived threads are excluded unless
    /// `include_archived` is set.
    pub fn list_threads(&self, limit: usize, include_archived: bool) -> Result<Vec<ThreadSummary>> {
        let sql = format!(
            "SELECT t.id, t.question, \
             (SELECT COUNT(*) FROM resources r WHERE r.thread_id = t.id) AS resource_count, \
             t.last_active, t.is_archived \
             FROM threads t {} ORDER BY t.last_active DESC LIMIT ?1",
            archive_filter(include_archived)
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let threads = stmt
            .query_map([limit as i64], |row| {
                Ok(ThreadSummary {
                    id: row.get(0)?,
                    question: row.get(1)?,
                    resource_count: row.get(2)?,
                    last_active: row.get(3)?,
                    is_archived: row.get(4)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(threads)
    }

    /// Get a thread by id. Missing ids are `Ok(None)`, never an error.
    pub fn get_thread(&self, id: i64) -> Result<Option<Thread>> {
        self.conn
            .query_row(
                "SELECT t.id, t.question, t.created_at, t.last_active, t.is_archived \
                 FROM threads t WHERE t.id = ?1",
                [id],
                |row| self.row_to_thread(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// The single most recently active thread, if any.
    pub fn most_recent_thread(&self, include_archived: bool) -> Result<Option<Thread>> {
        let sql = format!(
            "SELECT t.id, t.question, t.created_at, t.last_active, t.is_archived \
             FROM threads t {} ORDER BY t.last_active DESC LIMIT 1",
            archive_filter(include_archived)
        );
        self.conn
            .query_row(&sql, [], |row| self.row_to_thread(row))
            .optional()
            .map_err(Into::into)
    }

    /// The last `n` active threads, projected down for picker UIs.
    pub fn last_n_threads(&self, n: usize, include_archived: bool) -> Result<Vec<ThreadBrief>> {
        let sql = format!(
            "SELECT t.id, t.question, t.last_active, t.is_archived \
             FROM threads t {} ORDER BY t.last_active DESC LIMIT ?1",
            archive_filter(include_archived)
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let threads = stmt
            .query_map([n as i64], |row| {
                Ok(ThreadBrief {
                    id: row.get(0)?,
                    question: row.get(1)?,
                    last_active: row.get(2)?,
                    is_archived: row.get(3)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(threads)
    }

    /// Bump a thread's last_active to now (viewing counts as activity).
    /// Unknown ids are a no-op.
    pub fn touch_thread(&self, id: i64) -> Result<()> {
        self.backup_before_write();
        let now = self.clock.now();
        self.conn.execute(
            "UPDATE threads SET last_active = ?1 WHERE id = ?2",
            params![now, id],
        )?;
        Ok(())
    }

    /// Mark a thread as archived. Returns whether a row was affected
    /// (false means the id was not found). Already-archived threads still
    /// return true.
    pub fn archive_thread(&self, id: i64) -> Result<bool> {
        self.set_archived(id, true)
    }

    /// Mark a thread as not archived. Symmetric with [`Self::archive_thread`].
    pub fn unarchive_thread(&self, id: i64) -> Result<bool> {
        self.set_archived(id, false)
    }

    fn set_archived(&self, id: i64, archived: bool) -> Result<bool> {
        self.backup_before_write();
        let affected = self.conn.execute(
            "UPDATE threads SET is_archived = ?1 WHERE id = ?2",
            params![archived, id],
        )?;
        Ok(affected > 0)
    }

    fn row_to_thread(&self, row: &rusqlite::Row) -> rusqlite::Result<Thread> {
        Ok(Thread {
            id: row.get(0)?,
            question: row.get(1)?,
            created_at: row.get(2)?,
            last_active: row.get(3)?,
            is_archived: row.get(4)?,
        })
    }

    // ========== Resource Operations ==========

    /// Attach a resource to a thread and bump the thread's last_active,
    /// both with the same timestamp, in a single transaction. Returns the
    /// new resource id.
    pub fn attach_resource(&mut self, thread_id: i64, content: &str, kind: ResourceKind) -> Result<i64> {
        if content.trim().is_empty() {
            return Err(Error::Validation("resource content must not be empty".into()));
        }
        self.backup_before_write();
        let now = self.clock.now();

        let tx = self.conn.transaction()?;
        let thread_exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM threads WHERE id = ?1)",
            [thread_id],
            |row| row.get(0),
        )?;
        if !thread_exists {
            return Err(Error::ThreadNotFound(thread_id));
        }
        tx.execute(
            "INSERT INTO resources (thread_id, type, content, added_at) VALUES (?1, ?2, ?3, ?4)",
            params![thread_id, kind.as_str(), content, now],
        )?;
        let resource_id = tx.last_insert_rowid();
        tx.execute(
            "UPDATE threads SET last_active = ?1 WHERE id = ?2",
            params![now, thread_id],
        )?;
        tx.commit()?;

        Ok(resource_id)
    }

    /// Resources for a thread, ordered by added_at ascending.
    pub fn resources_for_thread(&self, thread_id: i64) -> Result<Vec<Resource>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, type, content, added_at FROM resources \
             WHERE thread_id = ?1 ORDER BY added_at ASC",
        )?;

        let resources = stmt
            .query_map([thread_id], |row| self.row_to_resource(row))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(resources)
    }

    fn row_to_resource(&self, row: &rusqlite::Row) -> rusqlite::Result<Resource> {
        let kind_str: String = row.get(1)?;
        let kind: ResourceKind = kind_str.parse().map_err(|e: Error| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Resource {
            id: row.get(0)?,
            kind,
            content: row.get(2)?,
            added_at: row.get(3)?,
        })
    }

    // ========== Tag Operations ==========

    /// Add a tag to a thread. Duplicate (thread, name) pairs are a silent
    /// no-op, not an error.
    pub fn add_tag(&self, thread_id: i64, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::Validation("tag name must not be empty".into()));
        }
        self.backup_before_write();
        let now = self.clock.now();
        self.conn.execute(
            "INSERT OR IGNORE INTO tags (thread_id, name, created_at) VALUES (?1, ?2, ?3)",
            params![thread_id, name, now],
        )?;
        Ok(())
    }

    /// Tag names for a thread, sorted lexicographically.
    pub fn tags_for_thread(&self, thread_id: i64) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM tags WHERE thread_id = ?1 ORDER BY name ASC")?;

        let tags = stmt
            .query_map([thread_id], |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(tags)
    }
}

fn archive_filter(include_archived: bool) -> &'static str {
    if include_archived { "" } else { "WHERE t.is_archived = 0" }
}
