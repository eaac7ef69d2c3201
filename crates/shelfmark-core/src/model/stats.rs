use serde::{Deserialize, Serialize};

/// Reported as the most popular genre when no book has a genre.
pub const NO_POPULAR_GENRE: &str = "No Popular Genre";

/// Aggregate values computed on demand from the current catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_books: u64,
    pub read_books: u64,
    /// Mean of all recorded ratings, `0.0` when nothing is rated.
    pub average_rating: f64,
    pub most_popular_genre: String,
}

impl Statistics {
    #[must_use]
    pub fn unread_books(&self) -> u64 {
        self.total_books.saturating_sub(self.read_books)
    }

    #[must_use]
    pub fn has_popular_genre(&self) -> bool {
        self.most_popular_genre != NO_POPULAR_GENRE
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            total_books: 0,
            read_books: 0,
            average_rating: 0.0,
            most_popular_genre: NO_POPULAR_GENRE.to_string(),
        }
    }
}

/// Number of books filed under one genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCount {
    pub name: String,
    pub books: u64,
}
