//! SQLite schema bootstrap for the version store.
//!
//! # Responsibility
//! - Create the `versions` schema on first open.
//! - Track the applied schema through `PRAGMA user_version`.
//!
//! # Invariants
//! - The schema is applied atomically; a failed bootstrap leaves
//!   `user_version` untouched.
//! - A database stamped by a newer binary is rejected, never migrated
//!   down.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Schema version this binary writes and expects.
const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = include_str!("0001_versions.sql");

/// Returns the schema version this binary expects.
pub fn latest_version() -> u32 {
    SCHEMA_VERSION
}

/// Brings the connection up to the current schema.
///
/// A fresh database gets the full schema in one transaction; an
/// up-to-date database passes through untouched. Rejection of
/// newer-than-supported databases happens here, at the boundary that
/// first touches the file.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let stamped = stamped_version(conn)?;
    if stamped == SCHEMA_VERSION {
        return Ok(());
    }
    if stamped > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: stamped,
            latest_supported: SCHEMA_VERSION,
        });
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    Ok(())
}

fn stamped_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}
