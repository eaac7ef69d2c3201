use serde::{Deserialize, Serialize};

use crate::model::ids::{BookId, GenreId};

/// Earliest publication year the front end accepts.
pub const MIN_YEAR: i32 = 1800;
/// Latest publication year the front end accepts.
pub const MAX_YEAR: i32 = 2025;
/// Highest rating a book can be given.
pub const MAX_RATING: f64 = 5.0;

/// The editable metadata of a book.
///
/// Used both when adding a book and when updating one. The password is
/// never part of this set: it is fixed when the book is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre_id: Option<GenreId>,
    pub read_status: bool,
    pub rating: Option<f64>,
    pub read_link: Option<String>,
    pub download_link: Option<String>,
}

impl BookFields {
    #[must_use]
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre_id: None,
            read_status: false,
            rating: None,
            read_link: None,
            download_link: None,
        }
    }

    #[must_use]
    pub fn with_genre(mut self, genre_id: GenreId) -> Self {
        self.genre_id = Some(genre_id);
        self
    }

    #[must_use]
    pub fn with_read_status(mut self, read: bool) -> Self {
        self.read_status = read;
        self
    }

    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    #[must_use]
    pub fn with_read_link(mut self, link: impl Into<String>) -> Self {
        self.read_link = Some(link.into());
        self
    }

    #[must_use]
    pub fn with_download_link(mut self, link: impl Into<String>) -> Self {
        self.download_link = Some(link.into());
        self
    }

    /// Attach the password that will guard later updates and removal.
    #[must_use]
    pub fn with_password(self, password: impl Into<String>) -> NewBook {
        NewBook {
            fields: self,
            password: password.into(),
        }
    }
}

/// A book ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub fields: BookFields,
    /// Stored and compared as plain text.
    pub password: String,
}

/// A stored book joined with the name of its genre.
///
/// The password is never read back out of storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre_id: Option<GenreId>,
    pub genre_name: Option<String>,
    pub read_status: bool,
    pub rating: Option<f64>,
    pub read_link: Option<String>,
    pub download_link: Option<String>,
}

impl Book {
    /// The editable metadata of this book, e.g. to prefill an update.
    #[must_use]
    pub fn fields(&self) -> BookFields {
        BookFields {
            title: self.title.clone(),
            author: self.author.clone(),
            year: self.year,
            genre_id: self.genre_id,
            read_status: self.read_status,
            rating: self.rating,
            read_link: self.read_link.clone(),
            download_link: self.download_link.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_fields_builder() {
        let book = BookFields::new("Dune", "Frank Herbert", 1965)
            .with_genre(GenreId::from_raw(1))
            .with_read_status(true)
            .with_rating(4.5)
            .with_password("pw1");

        assert_eq!(book.fields.title, "Dune");
        assert_eq!(book.fields.genre_id, Some(GenreId::from_raw(1)));
        assert!(book.fields.read_status);
        assert_eq!(book.fields.rating, Some(4.5));
        assert!(book.fields.read_link.is_none());
        assert_eq!(book.password, "pw1");
    }

    #[test]
    fn test_fields_reflect_book() {
        let book = Book {
            id: BookId::from_raw(9),
            title: "Emma".to_string(),
            author: "Jane Austen".to_string(),
            year: 1815,
            genre_id: None,
            genre_name: None,
            read_status: false,
            rating: None,
            read_link: Some("https://example.org/emma".to_string()),
            download_link: None,
        };

        let expected =
            BookFields::new("Emma", "Jane Austen", 1815).with_read_link("https://example.org/emma");
        assert_eq!(book.fields(), expected);
    }
}
