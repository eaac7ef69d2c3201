use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::Result;

use super::tables::SCHEMA;

#[derive(Debug)]
enum Location {
    File(PathBuf),
    /// A shared-cache in-memory database. The anchor connection keeps it
    /// alive between operations.
    Memory { uri: String, _anchor: Connection },
}

/// Handle to a catalog database.
///
/// The handle holds no open connection for file-backed databases. Every
/// operation opens its own connection and drops it before returning, so a
/// failed operation never leaves a connection or transaction behind.
#[derive(Debug)]
pub struct Database {
    location: Location,
}

impl Database {
    /// Open (or create) a database at the given path and create the tables.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Self {
            location: Location::File(path),
        };
        db.create_tables()?;
        Ok(db)
    }

    /// Open a private in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        static NEXT: AtomicUsize = AtomicUsize::new(0);

        let uri = format!(
            "file:shelfmark-{}-{}?mode=memory&cache=shared",
            std::process::id(),
            NEXT.fetch_add(1, Ordering::Relaxed)
        );
        let anchor = Connection::open_with_flags(&uri, OpenFlags::default())?;
        let db = Self {
            location: Location::Memory {
                uri,
                _anchor: anchor,
            },
        };
        db.create_tables()?;
        Ok(db)
    }

    /// Path of the database file, `None` for in-memory databases.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(path) => Some(path),
            Location::Memory { .. } => None,
        }
    }

    /// Open a fresh connection for one operation.
    pub(crate) fn connect(&self) -> Result<Connection> {
        let conn = match &self.location {
            Location::File(path) => Connection::open(path)?,
            Location::Memory { uri, .. } => Connection::open_with_flags(uri, OpenFlags::default())?,
        };
        Ok(conn)
    }

    fn create_tables(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        log::debug!("Catalog tables ready at {}", self.describe());
        Ok(())
    }

    fn describe(&self) -> String {
        match &self.location {
            Location::File(path) => path.display().to_string(),
            Location::Memory { uri, .. } => uri.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn table_count(db: &Database) -> i64 {
        db.connect()
            .unwrap()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('genres', 'books')",
                [],
                |row| row.get(0),
            )
            .unwrap()
    }

    #[test]
    fn test_database_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(table_count(&db), 2);
        assert!(db.path().is_none());
    }

    #[test]
    fn test_in_memory_databases_are_isolated() {
        let first = Database::open_in_memory().unwrap();
        let second = Database::open_in_memory().unwrap();

        first.add_genre("Fiction").unwrap();

        assert_eq!(first.list_genres().unwrap().len(), 1);
        assert!(second.list_genres().unwrap().is_empty());
    }

    #[test]
    fn test_open_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("library.db");

        let db = Database::open(&path).unwrap();
        db.add_genre("Poetry").unwrap();
        drop(db);

        let reopened = Database::open(&path).unwrap();
        assert_eq!(reopened.path(), Some(path.as_path()));
        assert_eq!(table_count(&reopened), 2);
        assert_eq!(reopened.list_genres().unwrap().len(), 1);
    }

    #[test]
    fn test_open_under_regular_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "plain file").unwrap();

        let err = Database::open(blocker.join("library.db")).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "unexpected error: {err:?}");
        assert!(err.to_string().starts_with("I/O error: "));
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_open_directory_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = Database::open(dir.path()).unwrap_err();
        let Error::Storage(inner) = &err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(err.to_string(), format!("storage error: {inner}"));
        assert!(!err.is_user_error());
    }
}
