pub mod book;
pub mod genre;
pub mod ids;
pub mod stats;

pub use book::{Book, BookFields, NewBook, MAX_RATING, MAX_YEAR, MIN_YEAR};
pub use genre::{Genre, GenreFilter};
pub use ids::{BookId, GenreId};
pub use stats::{GenreCount, Statistics, NO_POPULAR_GENRE};
