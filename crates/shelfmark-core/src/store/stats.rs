use rusqlite::OptionalExtension;

use crate::error::Result;
use crate::model::{GenreCount, Statistics, NO_POPULAR_GENRE};

use super::{to_count, Database};

// Statistics
impl Database {
    /// Compute catalog statistics from the current contents.
    ///
    /// The most popular genre is the one with the most books; ties go to the
    /// genre created first. Books without a genre are counted in the totals
    /// but never make a genre popular.
    pub fn compute_statistics(&self) -> Result<Statistics> {
        let conn = self.connect()?;

        let total: i64 = conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        let read: i64 = conn.query_row(
            "SELECT COUNT(*) FROM books WHERE read_status = 1",
            [],
            |row| row.get(0),
        )?;
        let average: Option<f64> = conn.query_row(
            "SELECT AVG(rating) FROM books WHERE rating IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        let popular: Option<String> = conn
            .query_row(
                "SELECT genres.name
                 FROM books
                 JOIN genres ON books.genre_id = genres.id
                 GROUP BY books.genre_id
                 ORDER BY COUNT(*) DESC, books.genre_id ASC
                 LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let stats = Statistics {
            total_books: to_count(total),
            read_books: to_count(read),
            average_rating: average.unwrap_or(0.0),
            most_popular_genre: popular.unwrap_or_else(|| NO_POPULAR_GENRE.to_string()),
        };
        log::debug!("Computed statistics: {:?}", stats);
        Ok(stats)
    }

    /// Book count for every genre, largest first. Genres without books are
    /// included with a count of zero.
    pub fn genre_breakdown(&self) -> Result<Vec<GenreCount>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT genres.name, COUNT(books.id)
             FROM genres
             LEFT JOIN books ON books.genre_id = genres.id
             GROUP BY genres.id
             ORDER BY COUNT(books.id) DESC, genres.id ASC",
        )?;
        let counts = stmt
            .query_map([], |row| {
                Ok(GenreCount {
                    name: row.get(0)?,
                    books: to_count(row.get(1)?),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BookFields;

    #[test]
    fn test_empty_statistics() {
        let db = Database::open_in_memory().unwrap();
        let stats = db.compute_statistics().unwrap();

        assert_eq!(stats, Statistics::default());
        assert_eq!(stats.most_popular_genre, NO_POPULAR_GENRE);
    }

    #[test]
    fn test_single_book_statistics() {
        let db = Database::open_in_memory().unwrap();
        let fiction = db.add_genre("Fiction").unwrap();
        db.add_book(
            &BookFields::new("Dune", "Herbert", 1965)
                .with_genre(fiction)
                .with_read_status(true)
                .with_rating(4.5)
                .with_read_link("")
                .with_download_link("")
                .with_password("pw1"),
        )
        .unwrap();

        let stats = db.compute_statistics().unwrap();
        assert_eq!(stats.total_books, 1);
        assert_eq!(stats.read_books, 1);
        assert!((stats.average_rating - 4.5).abs() < 1e-9);
        assert_eq!(stats.most_popular_genre, "Fiction");
    }

    #[test]
    fn test_average_ignores_unrated_books() {
        let db = Database::open_in_memory().unwrap();
        db.add_book(&BookFields::new("A", "X", 1900).with_rating(2.0).with_password("p"))
            .unwrap();
        db.add_book(&BookFields::new("B", "X", 1900).with_rating(5.0).with_password("p"))
            .unwrap();
        db.add_book(&BookFields::new("C", "X", 1900).with_password("p"))
            .unwrap();

        let stats = db.compute_statistics().unwrap();
        assert_eq!(stats.total_books, 3);
        assert_eq!(stats.read_books, 0);
        assert!((stats.average_rating - 3.5).abs() < 1e-9);
        assert_eq!(stats.most_popular_genre, NO_POPULAR_GENRE);
    }

    #[test]
    fn test_unrated_catalog_averages_zero() {
        let db = Database::open_in_memory().unwrap();
        db.add_book(&BookFields::new("A", "X", 1900).with_password("p"))
            .unwrap();

        let stats = db.compute_statistics().unwrap();
        assert!(stats.average_rating.abs() < f64::EPSILON);
    }

    #[test]
    fn test_most_popular_genre_and_breakdown() {
        let db = Database::open_in_memory().unwrap();
        let fiction = db.add_genre("Fiction").unwrap();
        let poetry = db.add_genre("Poetry").unwrap();
        db.add_genre("Travel").unwrap();
        db.add_book(&BookFields::new("A", "X", 1900).with_genre(fiction).with_password("p"))
            .unwrap();
        for title in ["B", "C"] {
            db.add_book(&BookFields::new(title, "Y", 1900).with_genre(poetry).with_password("p"))
                .unwrap();
        }

        let stats = db.compute_statistics().unwrap();
        assert_eq!(stats.most_popular_genre, "Poetry");

        let breakdown = db.genre_breakdown().unwrap();
        let pairs: Vec<(&str, u64)> = breakdown
            .iter()
            .map(|g| (g.name.as_str(), g.books))
            .collect();
        assert_eq!(pairs, vec![("Poetry", 2), ("Fiction", 1), ("Travel", 0)]);
    }

    #[test]
    fn test_popular_genre_tie_goes_to_oldest() {
        let db = Database::open_in_memory().unwrap();
        let first = db.add_genre("Essays").unwrap();
        let second = db.add_genre("Drama").unwrap();
        db.add_book(&BookFields::new("B", "Y", 1900).with_genre(second).with_password("p"))
            .unwrap();
        db.add_book(&BookFields::new("A", "X", 1900).with_genre(first).with_password("p"))
            .unwrap();

        assert_eq!(db.compute_statistics().unwrap().most_popular_genre, "Essays");
    }
}
