//! SQLite storage and the catalog operations.

pub mod books;
pub mod db;
pub mod genres;
pub mod stats;
pub mod tables;

pub use db::Database;

/// True when SQLite rejected a statement because of a constraint such as
/// `UNIQUE` or `NOT NULL`.
pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Convert a SQLite `COUNT(*)` result.
pub(crate) fn to_count(raw: i64) -> u64 {
    u64::try_from(raw).unwrap_or(0)
}
