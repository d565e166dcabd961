use super::schema::initialize_database;
use crate::domain::{DomainError, DomainResult, SearchQuery};
use rusqlite::{params_from_iter, Connection, Result as SqliteResult};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Shared handle to the catalog database.
///
/// Every gateway clones the same handle, so writes made through one gateway
/// are visible to the others, including on an in-memory database.
#[derive(Clone)]
pub struct SqliteDatabase {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDatabase {
    /// Open (or create) a file-based database and apply the schema
    pub fn open(path: impl AsRef<Path>) -> DomainResult<Self> {
        let conn = Connection::open(path).map_err(database_error)?;
        Self::from_connection(conn)
    }

    /// Fresh in-memory database (useful for testing)
    pub fn open_in_memory() -> DomainResult<Self> {
        let conn = Connection::open_in_memory().map_err(database_error)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> DomainResult<Self> {
        initialize_database(&conn).map_err(database_error)?;
        Ok(SqliteDatabase {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` with exclusive access to the connection
    pub fn with_connection<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> SqliteResult<T>,
    ) -> DomainResult<T> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| DomainError::Persistence("database lock poisoned".to_string()))?;
        f(&mut conn).map_err(database_error)
    }
}

pub(crate) fn database_error(error: rusqlite::Error) -> DomainError {
    DomainError::Persistence(format!("Database error: {}", error))
}

/// `LIKE` pattern matching the terms anywhere in a column
pub(crate) fn like_pattern(terms: &str) -> String {
    format!("%{}%", terms.trim())
}

/// Map a requested sort key onto a whitelisted column.
///
/// `columns` pairs accepted keys with column names; the first entry is the
/// fallback for unknown or empty keys.
pub(crate) fn sort_column(query: &SearchQuery, columns: &[(&str, &'static str)]) -> &'static str {
    columns
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(query.sort.trim()))
        .or_else(|| columns.first())
        .map(|(_, column)| *column)
        .unwrap_or("id")
}

/// `?, ?, ?` for an `IN` list of `count` values
pub(crate) fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Ids of `table` present among `ids`, in input order
pub(crate) fn existing_ids(
    conn: &Connection,
    table: &str,
    ids: &[&str],
) -> SqliteResult<Vec<String>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT id FROM {} WHERE id IN ({})",
        table,
        placeholders(ids.len())
    );
    let mut stmt = conn.prepare(&sql)?;
    let found: Vec<String> = stmt
        .query_map(params_from_iter(ids.iter()), |row| row.get(0))?
        .collect::<SqliteResult<Vec<_>>>()?;

    Ok(ids
        .iter()
        .filter(|id| found.iter().any(|f| f == *id))
        .map(|id| id.to_string())
        .collect())
}
