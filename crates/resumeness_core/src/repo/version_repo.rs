//! Version store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide append/list/get APIs over the `versions` log.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Saving appends; nothing here deletes or rewrites an entry.
//! - `list_versions` returns entries oldest-first in append order.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::version::{VersionEntry, VersionId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const VERSION_SELECT_SQL: &str = "SELECT
    uuid,
    snapshot,
    label,
    created_at
FROM versions";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for version persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(VersionId),
    InvalidData(String),
    /// The connection has not been migrated by [`crate::db::open_db`].
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "version not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted version data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through open_db"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the append-only version log.
pub trait VersionRepository {
    /// Appends a snapshot with a fresh id and storage-assigned timestamp.
    fn save_version(&self, snapshot: &str, label: &str) -> RepoResult<VersionEntry>;
    /// Returns all entries oldest-first.
    fn list_versions(&self) -> RepoResult<Vec<VersionEntry>>;
    /// Gets one entry by stable id.
    fn get_version(&self, id: VersionId) -> RepoResult<Option<VersionEntry>>;
}

/// SQLite-backed version repository.
pub struct SqliteVersionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVersionRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl VersionRepository for SqliteVersionRepository<'_> {
    fn save_version(&self, snapshot: &str, label: &str) -> RepoResult<VersionEntry> {
        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO versions (uuid, snapshot, label, created_at)
             VALUES (?1, ?2, ?3, (strftime('%s', 'now') * 1000));",
            params![id.to_string(), snapshot, label],
        )?;

        self.get_version(id)?.ok_or(RepoError::InvalidData(
            "saved version not found in read-back".to_string(),
        ))
    }

    fn list_versions(&self) -> RepoResult<Vec<VersionEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VERSION_SELECT_SQL} ORDER BY seq ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_version_row(row)?);
        }

        Ok(entries)
    }

    fn get_version(&self, id: VersionId) -> RepoResult<Option<VersionEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VERSION_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_version_row(row)?));
        }

        Ok(None)
    }
}

fn parse_version_row(row: &Row<'_>) -> RepoResult<VersionEntry> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in versions.uuid"))
    })?;

    Ok(VersionEntry {
        id,
        snapshot: row.get("snapshot")?,
        label: row.get("label")?,
        created_at: row.get("created_at")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "versions")? {
        return Err(RepoError::MissingRequiredTable("versions"));
    }

    for column in ["uuid", "snapshot", "label", "created_at"] {
        if !table_has_column(conn, "versions", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "versions",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
