use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("genre '{0}' already exists")]
    DuplicateName(String),

    #[error("not found: {entity} '{key}'")]
    NotFound { entity: &'static str, key: String },

    #[error("cannot delete genre '{name}': {count} book(s) still reference it")]
    ReferentialIntegrity { name: String, count: u64 },

    /// No book matched the given key and password. Whether the key or the
    /// password was wrong is deliberately not reported.
    #[error("incorrect password or book not found")]
    AuthOrNotFound,

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Returns `true` for failures caused by the caller's input rather than
    /// by the store itself.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referential_integrity_message_reports_count() {
        let err = Error::ReferentialIntegrity {
            name: "Fiction".to_string(),
            count: 3,
        };
        assert_eq!(
            err.to_string(),
            "cannot delete genre 'Fiction': 3 book(s) still reference it"
        );
    }

    #[test]
    fn test_user_error_classification() {
        assert!(Error::AuthOrNotFound.is_user_error());
        assert!(Error::DuplicateName("x".to_string()).is_user_error());
        assert!(!Error::Storage(rusqlite::Error::InvalidQuery).is_user_error());
    }
}
