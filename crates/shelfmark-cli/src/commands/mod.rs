pub mod book;
pub mod config;
pub mod genre;
pub mod guide;
pub mod input;
pub mod stats;

pub use book::{add_book, list_books, remove_book, update_book, BookArgs, BookTarget};
pub use genre::{add_genre, list_genres, remove_genre};
pub use guide::show_guide;
pub use stats::show_stats;
