//! Database schema definitions and the ordered migration list

/// SQL to create the threads table
pub const CREATE_THREADS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS threads (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question TEXT NOT NULL,
    created_at REAL NOT NULL,
    last_active REAL NOT NULL
)
"#;

/// SQL to create the resources table
pub const CREATE_RESOURCES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS resources (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    thread_id INTEGER NOT NULL,
    type TEXT NOT NULL,
    content TEXT NOT NULL,
    added_at REAL NOT NULL,
    FOREIGN KEY(thread_id) REFERENCES threads(id)
)
"#;

/// Base tables that exist at every schema version
pub fn base_schema_statements() -> Vec<&'static str> {
    vec![CREATE_THREADS_TABLE, CREATE_RESOURCES_TABLE]
}

/// An additive schema change applied at most once.
pub struct Migration {
    pub version: i32,
    pub sql: &'static str,
}

/// Migrations are applied in ascending order by `version`, each exactly
/// once. New steps are appended with the next version number; existing
/// steps are never rewritten.
pub const MIGRATIONS: &[Migration] = &[
    // v1: tags support; also bootstraps the schema_version marker itself
    Migration {
        version: 1,
        sql: r#"
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    thread_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    created_at REAL NOT NULL,
    FOREIGN KEY(thread_id) REFERENCES threads(id),
    UNIQUE(thread_id, name)
);
"#,
    },
    // v2: archive support for threads
    Migration {
        version: 2,
        sql: "ALTER TABLE threads ADD COLUMN is_archived INTEGER NOT NULL DEFAULT 0",
    },
];

/// Version a fully migrated database reports.
pub const SCHEMA_VERSION: i32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_strictly_increasing() {
        let mut prev = 0;
        for migration in MIGRATIONS {
            assert!(migration.version > prev, "migration versions must increase");
            prev = migration.version;
        }
        assert_eq!(prev, SCHEMA_VERSION);
    }
}
