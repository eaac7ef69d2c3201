use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ids::GenreId;

/// A named category that books are grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Which books a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenreFilter {
    /// Every book, whether or not it has a genre.
    #[default]
    All,
    /// Only books referencing this genre.
    Only(GenreId),
}

impl GenreFilter {
    /// Interpret a raw genre id from a selection control, where `0` is the
    /// "All" entry.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        if raw == 0 {
            Self::All
        } else {
            Self::Only(GenreId::from_raw(raw))
        }
    }
}

impl From<Option<GenreId>> for GenreFilter {
    fn from(id: Option<GenreId>) -> Self {
        match id {
            Some(id) if id.get() != 0 => Self::Only(id),
            _ => Self::All,
        }
    }
}

impl From<GenreId> for GenreFilter {
    fn from(id: GenreId) -> Self {
        Self::from(Some(id))
    }
}
