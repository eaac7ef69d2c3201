use rusqlite::types::{ToSql, ToSqlOutput};
use rusqlite::{params, OptionalExtension};
use std::fmt;

use crate::error::{Error, Result};
use crate::model::{Book, BookFields, BookId, GenreFilter, NewBook};

use super::genres::ensure_genre_exists;
use super::Database;

const BOOK_SELECT: &str = "SELECT books.id, books.title, books.author, books.year,
        books.genre_id, genres.name, books.read_status, books.rating,
        books.read_link, books.download_link
     FROM books
     LEFT JOIN genres ON books.genre_id = genres.id";

/// How an update or removal picks its rows.
#[derive(Debug, Clone, Copy)]
enum BookKey<'a> {
    /// Every book with this exact title.
    Title(&'a str),
    Id(BookId),
}

impl BookKey<'_> {
    const fn column(self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Id(_) => "id",
        }
    }
}

impl ToSql for BookKey<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Self::Title(title) => title.to_sql(),
            Self::Id(id) => id.to_sql(),
        }
    }
}

impl fmt::Display for BookKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title(title) => write!(f, "'{}'", title),
            Self::Id(id) => write!(f, "#{}", id),
        }
    }
}

// Book operations
impl Database {
    /// Insert a new book.
    ///
    /// Titles are not unique; adding a second book with an existing title
    /// succeeds.
    pub fn add_book(&self, book: &NewBook) -> Result<BookId> {
        let fields = &book.fields;
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        ensure_genre_exists(&tx, fields.genre_id)?;
        tx.execute(
            "INSERT INTO books (
                title, author, year, genre_id, read_status, rating,
                read_link, download_link, password
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                fields.title,
                fields.author,
                fields.year,
                fields.genre_id,
                fields.read_status,
                fields.rating,
                fields.read_link,
                fields.download_link,
                book.password,
            ],
        )?;
        let id = BookId::from_raw(tx.last_insert_rowid());
        tx.commit()?;

        log::info!("Added book '{}' by {} ({})", fields.title, fields.author, id);
        Ok(id)
    }

    /// Delete every book whose title and password both match exactly.
    ///
    /// When several books share the title and password, all of them are
    /// removed. Returns the number of books deleted.
    pub fn remove_book(&self, title: &str, password: &str) -> Result<usize> {
        self.remove_matching(BookKey::Title(title), password)
    }

    /// Delete one book by id, provided the password matches.
    pub fn remove_book_by_id(&self, id: BookId, password: &str) -> Result<()> {
        self.remove_matching(BookKey::Id(id), password).map(|_| ())
    }

    /// Overwrite the metadata of every book matching the current title and
    /// password. The password itself is never changed.
    ///
    /// Returns the number of books updated.
    pub fn update_book(
        &self,
        current_title: &str,
        password: &str,
        fields: &BookFields,
    ) -> Result<usize> {
        self.update_matching(BookKey::Title(current_title), password, fields)
    }

    /// Overwrite the metadata of one book by id, provided the password
    /// matches.
    pub fn update_book_by_id(&self, id: BookId, password: &str, fields: &BookFields) -> Result<()> {
        self.update_matching(BookKey::Id(id), password, fields)
            .map(|_| ())
    }

    /// Every book with its genre name, in insertion order.
    pub fn list_books(&self) -> Result<Vec<Book>> {
        self.list_books_by_genre(GenreFilter::All)
    }

    /// Books in one genre, or every book for [`GenreFilter::All`].
    pub fn list_books_by_genre(&self, filter: impl Into<GenreFilter>) -> Result<Vec<Book>> {
        let conn = self.connect()?;
        let books = match filter.into() {
            GenreFilter::All => {
                let mut stmt = conn.prepare(&format!("{BOOK_SELECT} ORDER BY books.id"))?;
                let books = stmt
                    .query_map([], row_to_book)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                books
            }
            GenreFilter::Only(genre_id) => {
                let mut stmt = conn.prepare(&format!(
                    "{BOOK_SELECT} WHERE books.genre_id = ?1 ORDER BY books.id"
                ))?;
                let books = stmt
                    .query_map([genre_id], row_to_book)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                books
            }
        };
        log::debug!("Listed {} books", books.len());
        Ok(books)
    }

    /// Fetch a single book by id.
    pub fn get_book(&self, id: BookId) -> Result<Option<Book>> {
        let conn = self.connect()?;
        let book = conn
            .query_row(
                &format!("{BOOK_SELECT} WHERE books.id = ?1"),
                [id],
                row_to_book,
            )
            .optional()?;
        Ok(book)
    }

    fn remove_matching(&self, key: BookKey<'_>, password: &str) -> Result<usize> {
        let conn = self.connect()?;
        let removed = conn.execute(
            &format!("DELETE FROM books WHERE {} = ?1 AND password = ?2", key.column()),
            params![key, password],
        )?;

        if removed == 0 {
            log::warn!("No book matched {} with the given password", key);
            return Err(Error::AuthOrNotFound);
        }
        log::info!("Removed {} book(s) matching {}", removed, key);
        Ok(removed)
    }

    fn update_matching(
        &self,
        key: BookKey<'_>,
        password: &str,
        fields: &BookFields,
    ) -> Result<usize> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        ensure_genre_exists(&tx, fields.genre_id)?;
        let updated = tx.execute(
            &format!(
                "UPDATE books SET
                    title = ?1, author = ?2, year = ?3, genre_id = ?4,
                    read_status = ?5, rating = ?6, read_link = ?7, download_link = ?8
                 WHERE {} = ?9 AND password = ?10",
                key.column()
            ),
            params![
                fields.title,
                fields.author,
                fields.year,
                fields.genre_id,
                fields.read_status,
                fields.rating,
                fields.read_link,
                fields.download_link,
                key,
                password,
            ],
        )?;

        if updated == 0 {
            log::warn!("No book matched {} with the given password", key);
            return Err(Error::AuthOrNotFound);
        }
        tx.commit()?;
        log::info!("Updated {} book(s) matching {}", updated, key);
        Ok(updated)
    }
}

fn row_to_book(row: &rusqlite::Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        year: row.get(3)?,
        genre_id: row.get(4)?,
        genre_name: row.get(5)?,
        read_status: row.get::<_, Option<bool>>(6)?.unwrap_or(false),
        rating: row.get(7)?,
        read_link: row.get(8)?,
        download_link: row.get(9)?,
    })
}
