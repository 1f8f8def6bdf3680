//! Schema lifecycle: version gate and destructive recreation

use rusqlite::Connection;

use super::table_exists;
use crate::Result;

/// Current schema version, stamped into the `skill` table.
/// Bump whenever `init.sql` changes shape; stale stores are rebuilt.
pub const SCHEMA_VERSION: &str = "0.4.2";

/// Packaged DDL script defining all tables
const INIT_SQL: &str = include_str!("init.sql");

/// Every table owned by this skill, dropped on recreation
const TABLES: &[&str] = &[
    "skill",
    "star_system",
    "planet",
    "terminal",
    "category",
    "item",
    "commodity",
    "commodity_price",
];

/// Initialize the schema, recreating it when the stored version disagrees
/// with the running version (or the schema is entirely absent)
///
/// # Errors
///
/// Returns error if the version query or recreation fails
pub fn init(conn: &Connection) -> Result<()> {
    match stored_version(conn)? {
        Some(version) if version == SCHEMA_VERSION => {
            tracing::debug!(version = SCHEMA_VERSION, "schema up to date");
            Ok(())
        }
        stored => {
            tracing::debug!(
                stored = stored.as_deref().unwrap_or("<none>"),
                running = SCHEMA_VERSION,
                "schema version mismatch"
            );
            recreate(conn)
        }
    }
}

/// Read the stamped schema version, if any
///
/// # Errors
///
/// Returns error if the catalog or version query fails
pub fn stored_version(conn: &Connection) -> Result<Option<String>> {
    if !table_exists(conn, "skill")? {
        return Ok(None);
    }
    let version = conn
        .query_row("SELECT version FROM skill LIMIT 1", [], |row| row.get(0))
        .ok();
    Ok(version)
}

/// Drop every owned table and rebuild the schema from the packaged DDL
/// script, stamping the running version
///
/// # Errors
///
/// Returns error if any DDL statement fails
pub fn recreate(conn: &Connection) -> Result<()> {
    for table in TABLES {
        conn.execute_batch(&format!("DROP TABLE IF EXISTS {table};"))?;
    }
    conn.execute_batch(INIT_SQL)?;
    conn.execute("DELETE FROM skill", [])?;
    conn.execute("INSERT INTO skill (version) VALUES (?1)", [SCHEMA_VERSION])?;

    tracing::info!(version = SCHEMA_VERSION, "database schema recreated");
    Ok(())
}
