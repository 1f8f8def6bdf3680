//! Database module: pooled SQLite access, schema lifecycle, query building

pub mod filter;
pub mod repo;
mod schema;

use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::{Error, Result};

pub use filter::{Filter, FilterValue, Op, ResolvedFilter, SortOrder, debug_sql};
pub use repo::{Record, Repository, RowValues};
pub use schema::SCHEMA_VERSION;

/// Database connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Pooled database connection
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Initialize the database at `path`
///
/// Opens (or creates) the file-backed store and runs the schema version
/// gate: a stored version that disagrees with [`SCHEMA_VERSION`] triggers a
/// destructive recreation from the packaged DDL script.
///
/// # Errors
///
/// Returns error if the database cannot be opened or initialized
pub fn init<P: AsRef<Path>>(path: P) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(path);
    let pool = Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(|e| Error::Database(e.to_string()))?;

    let conn = pool.get().map_err(|e| Error::Database(e.to_string()))?;
    schema::init(&conn)?;

    tracing::info!(version = SCHEMA_VERSION, "database initialized");
    Ok(pool)
}

/// Initialize an in-memory database (for testing)
///
/// # Errors
///
/// Returns error if the database cannot be initialized
pub fn init_memory() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory();
    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| Error::Database(e.to_string()))?;

    let conn = pool.get().map_err(|e| Error::Database(e.to_string()))?;
    schema::init(&conn)?;

    Ok(pool)
}

/// Check whether a table exists in the connected database
///
/// # Errors
///
/// Returns error if the catalog query fails
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Delete every row from a table, returning the number of rows removed
///
/// # Errors
///
/// Returns error if the delete fails
pub fn table_clear(conn: &Connection, name: &str) -> Result<usize> {
    // Table names come from skill code, never from user input
    let removed = conn.execute(&format!("DELETE FROM {name}"), [])?;
    tracing::debug!(table = name, removed, "table cleared");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_memory_creates_schema() {
        let pool = init_memory().unwrap();
        let conn = pool.get().unwrap();
        assert!(table_exists(&conn, "commodity").unwrap());
        assert!(table_exists(&conn, "skill").unwrap());
        assert!(!table_exists(&conn, "no_such_table").unwrap());
    }

    #[test]
    fn table_clear_empties_a_table() {
        let pool = init_memory().unwrap();
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO star_system (id, name, code, is_available) VALUES (1, 'Stanton', 'ST', 1)",
            [],
        )
        .unwrap();

        assert_eq!(table_clear(&conn, "star_system").unwrap(), 1);
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM star_system", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
