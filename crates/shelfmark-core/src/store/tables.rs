//! Table definitions.
//!
//! Applied on every open. Each statement is idempotent; there is no
//! migration path for changes to these tables.

pub const SCHEMA: &str = r#"
-- Genres
CREATE TABLE IF NOT EXISTS genres (
    id INTEGER PRIMARY KEY,
    name TEXT UNIQUE NOT NULL
);

-- Books (genre_id is checked by the operations, not by SQLite)
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    year INTEGER NOT NULL,
    genre_id INTEGER REFERENCES genres(id),
    read_status BOOLEAN,
    rating REAL,
    read_link TEXT,
    download_link TEXT,
    password TEXT NOT NULL
);
"#;
