//! Timestamped database backups
//!
//! Backups are best-effort: the store swallows failures here so a
//! read-only backup directory never blocks the write that follows.

use chrono::Local;
use std::path::{Path, PathBuf};

/// Copy the database file into `backup_dir` under a timestamped name,
/// e.g. `threads_20260805_141502.db`. Returns the backup path, or `None`
/// when there is no database file to back up yet.
pub fn backup_database(db_path: &Path, backup_dir: &Path) -> std::io::Result<Option<PathBuf>> {
    if !db_path.exists() {
        return Ok(None);
    }
    std::fs::create_dir_all(backup_dir)?;

    let stem = db_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("threads");
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let backup_path = backup_dir.join(format!("{}_{}.db", stem, stamp));
    std::fs::copy(db_path, &backup_path)?;
    Ok(Some(backup_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_copies_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("threads.db");
        std::fs::write(&db_path, b"not really a database").unwrap();

        let backup_dir = dir.path().join("backups");
        let backup_path = backup_database(&db_path, &backup_dir).unwrap().unwrap();

        assert!(backup_path.starts_with(&backup_dir));
        let name = backup_path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("threads_"));
        assert!(name.ends_with(".db"));
        assert_eq!(std::fs::read(&backup_path).unwrap(), b"not really a database");
    }

    #[test]
    fn test_backup_skips_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let result = backup_database(&dir.path().join("absent.db"), &dir.path().join("backups"));
        assert!(result.unwrap().is_none());
    }
}
