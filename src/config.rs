use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional on-disk config overriding storage locations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThreadsConfig {
    pub database: Option<String>,
    pub backups: Option<String>,
}

/// Directory holding the database, backups and config file.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("threads")
}

pub fn default_database_path() -> PathBuf {
    config_dir().join("threads.db")
}

pub fn default_backup_dir() -> PathBuf {
    config_dir().join("backups")
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("threads.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<ThreadsConfig>> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ThreadsConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Resolve database and backup paths: explicit flag first, then config
/// file, then defaults. The store itself never sees a default path.
pub fn resolve_paths(database: Option<PathBuf>, config: Option<&ThreadsConfig>) -> (PathBuf, PathBuf) {
    let db_path = database
        .or_else(|| {
            config
                .and_then(|c| c.database.as_ref())
                .map(PathBuf::from)
        })
        .unwrap_or_else(default_database_path);

    let backup_dir = config
        .and_then(|c| c.backups.as_ref())
        .map(PathBuf::from)
        .unwrap_or_else(default_backup_dir);

    (db_path, backup_dir)
}
