//! Database migrations
//!
//! Versioned schema migrations tracked in the schema_migrations table.
//! Each migration runs inside a transaction so a failure leaves the schema
//! at the previous version.

use crate::core::error::{BoardError, Result};
use rusqlite::Connection;
use tracing::info;

/// Migration version tracking table
const MIGRATION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    applied_at DATETIME DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Initial schema migration (version 1)
const MIGRATION_V1: &str = r#"
-- Users table (authentication)
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_users_username ON users(username);

-- Items table (tracked work items)
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    status TEXT NOT NULL
);
"#;

/// Run all pending migrations
pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    info!("Running database migrations");

    conn.execute_batch(MIGRATION_TABLE)
        .map_err(BoardError::DatabaseError)?;

    let current_version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(BoardError::DatabaseError)?;

    info!("Current database schema version: {}", current_version);

    if current_version < 1 {
        info!("Applying migration v1: Initial schema");
        apply_migration(conn, 1, MIGRATION_V1)?;
    }

    info!("Database migrations completed successfully");
    Ok(())
}

/// Apply a single migration inside a transaction and record its version
fn apply_migration(conn: &mut Connection, version: i64, sql: &str) -> Result<()> {
    let tx = conn.transaction().map_err(BoardError::DatabaseError)?;

    tx.execute_batch(sql).map_err(BoardError::DatabaseError)?;
    tx.execute(
        "INSERT INTO schema_migrations (version) VALUES (?)",
        [version],
    )
    .map_err(BoardError::DatabaseError)?;

    tx.commit().map_err(BoardError::DatabaseError)?;

    info!("Migration v{} applied successfully", version);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_test_connection() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_migrations_create_tables() {
        let mut conn = open_test_connection();
        run_migrations(&mut conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"users".to_string()));
        assert!(tables.contains(&"items".to_string()));
        assert!(tables.contains(&"schema_migrations".to_string()));
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let mut conn = open_test_connection();
        run_migrations(&mut conn).unwrap();
        run_migrations(&mut conn).unwrap();

        let version: i64 = conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn test_username_unique_constraint() {
        let mut conn = open_test_connection();
        run_migrations(&mut conn).unwrap();

        conn.execute(
            "INSERT INTO users (username, password_hash) VALUES (?, ?)",
            ["alice", "hash"],
        )
        .unwrap();

        let duplicate = conn.execute(
            "INSERT INTO users (username, password_hash) VALUES (?, ?)",
            ["alice", "other-hash"],
        );
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_is_active_defaults_to_true() {
        let mut conn = open_test_connection();
        run_migrations(&mut conn).unwrap();

        conn.execute(
            "INSERT INTO users (username, password_hash) VALUES (?, ?)",
            ["alice", "hash"],
        )
        .unwrap();

        let is_active: bool = conn
            .query_row(
                "SELECT is_active FROM users WHERE username = ?",
                ["alice"],
                |row| row.get(0),
            )
            .unwrap();
        assert!(is_active);
    }
}
