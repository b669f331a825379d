//! SQLite persistence. Raw SQL with rusqlite, no ORM; repository structs
//! per table under this module.

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

pub mod analyses;
pub mod recordings;
pub mod templates;

/// Open the application database at its default location, creating the
/// parent directory and schema as needed.
pub fn init_db() -> Result<Connection> {
    let db_path = crate::global::db_file()?;

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create database directory")?;
    }

    open_at(&db_path)
}

/// Open (and migrate) a database at an explicit path.
pub fn open_at(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path).context("Failed to open database connection")?;
    migrate(&conn)?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS recordings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            organization_id INTEGER NOT NULL DEFAULT 1,
            title TEXT,
            status TEXT NOT NULL DEFAULT 'pending',
            transcript_text TEXT,
            duration_seconds INTEGER,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create recordings table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS process_templates (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            organization_id INTEGER NOT NULL DEFAULT 1,
            name TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 0,
            steps TEXT NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create process_templates table")?;

    // One analysis per recording; re-analysis replaces the row wholesale.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS analyses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recording_id INTEGER NOT NULL UNIQUE REFERENCES recordings(id),
            sentiment TEXT NOT NULL,
            opportunities TEXT NOT NULL,
            process_score TEXT,
            action_items TEXT NOT NULL,
            confidence REAL NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create analyses table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_templates_org_active
         ON process_templates(organization_id, is_active)",
        [],
    )
    .context("Failed to create template index")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_creates_tables() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN
                 ('recordings', 'process_templates', 'analyses')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();
    }
}
