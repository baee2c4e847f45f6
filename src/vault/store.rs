//! SQLite-backed record table.
//!
//! `RecordStore` is plain CRUD over the `user` table and knows nothing
//! about encryption: the secret column only ever receives a `Ciphertext`.
//! Every method is a single statement, so each one commits atomically.

use std::path::Path;

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

use crate::crypto::Ciphertext;
use crate::errors::{LockboxError, Result};

use super::record::Record;

// Table and column names match databases written by earlier versions;
// there is no schema version.
const SELECT_COLUMNS: &str = "SELECT id, site, user_name, pwd FROM user";

/// Handle to the record table.
pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Open (or create) the database file at `path`.
    ///
    /// Fails with `StorageUnavailable` if the file cannot be opened.
    /// The schema is not touched; call `ensure_schema` afterwards.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            LockboxError::StorageUnavailable(format!("cannot open {}: {e}", path.display()))
        })?;

        // The file holds ciphertext only, but keep it owner-only anyway.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(path, perms);
        }

        tracing::debug!(path = %path.display(), "opened record store");
        Ok(Self { conn })
    }

    /// Open a private in-memory database (tests, dry runs).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(storage_error)?;
        Ok(Self { conn })
    }

    /// Create the record table if it does not exist.  Idempotent.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS user (
                    id        INTEGER PRIMARY KEY,
                    user_name TEXT,
                    pwd       TEXT,
                    site      TEXT
                );",
            )
            .map_err(storage_error)
    }

    /// Insert a new record.
    ///
    /// Fails with `DuplicateId` if a record with the same id exists.
    pub fn insert(&self, record: &Record) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO user (id, user_name, pwd, site) VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.id,
                    record.username,
                    record.secret_ciphertext.as_str(),
                    record.site
                ],
            )
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(ref err, _)
                    if err.code == ErrorCode::ConstraintViolation =>
                {
                    LockboxError::DuplicateId(record.id)
                }
                other => storage_error(other),
            })?;
        Ok(())
    }

    /// Return every record.  Row order carries no meaning.
    pub fn select_all(&self) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare(SELECT_COLUMNS).map_err(storage_error)?;

        let rows = stmt.query_map([], record_from_row).map_err(storage_error)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(storage_error)?);
        }
        Ok(records)
    }

    /// Fetch a single record by id.
    pub fn select_by_id(&self, id: i64) -> Result<Option<Record>> {
        self.conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                record_from_row,
            )
            .optional()
            .map_err(storage_error)
    }

    /// Delete a record by id.
    ///
    /// Returns `true` if a row was removed.  Deleting an absent id is
    /// not an error.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM user WHERE id = ?1", params![id])
            .map_err(storage_error)?;
        Ok(affected > 0)
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM user", [], |row| row.get(0))
            .map_err(storage_error)?;
        Ok(usize::try_from(n).unwrap_or(0))
    }
}

/// Decode one row.  NULL text columns load as empty strings.
fn record_from_row(row: &Row<'_>) -> rusqlite::Result<Record> {
    let site: Option<String> = row.get(1)?;
    let username: Option<String> = row.get(2)?;
    let pwd: Option<String> = row.get(3)?;

    Ok(Record {
        id: row.get(0)?,
        site: site.unwrap_or_default(),
        username: username.unwrap_or_default(),
        secret_ciphertext: Ciphertext::from_stored(pwd.unwrap_or_default()),
    })
}

fn storage_error(e: rusqlite::Error) -> LockboxError {
    LockboxError::StorageUnavailable(e.to_string())
}
