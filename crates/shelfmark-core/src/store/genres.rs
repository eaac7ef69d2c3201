use rusqlite::{Connection, OptionalExtension};
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::{Genre, GenreId};

use super::{is_constraint_violation, to_count, Database};

// Genre operations
impl Database {
    /// Insert a new genre.
    ///
    /// Fails with [`Error::DuplicateName`] when a genre with the same name
    /// already exists.
    pub fn add_genre(&self, name: &str) -> Result<GenreId> {
        let conn = self.connect()?;
        match conn.execute("INSERT INTO genres (name) VALUES (?1)", [name]) {
            Ok(_) => {
                let id = GenreId::from_raw(conn.last_insert_rowid());
                log::info!("Added genre '{}' ({})", name, id);
                Ok(id)
            }
            Err(e) if is_constraint_violation(&e) => {
                log::warn!("Genre '{}' already exists", name);
                Err(Error::DuplicateName(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the genre with the given name.
    ///
    /// Nothing is deleted while any book still references the genre; the
    /// error reports how many do.
    pub fn remove_genre(&self, name: &str) -> Result<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        let Some(id) = genre_id_by_name(&tx, name)? else {
            log::warn!("Genre '{}' not found", name);
            return Err(Error::not_found("genre", name));
        };

        let count = count_books_in(&tx, id)?;
        if count > 0 {
            log::warn!(
                "Refusing to delete genre '{}': {} book(s) reference it",
                name,
                count
            );
            return Err(Error::ReferentialIntegrity {
                name: name.to_string(),
                count,
            });
        }

        tx.execute("DELETE FROM genres WHERE id = ?1", [id])?;
        tx.commit()?;
        log::info!("Removed genre '{}' ({})", name, id);
        Ok(())
    }

    /// Map every genre id to its name.
    pub fn list_genres(&self) -> Result<BTreeMap<GenreId, String>> {
        let genres = self
            .genres()?
            .into_iter()
            .map(|genre| (genre.id, genre.name))
            .collect();
        Ok(genres)
    }

    /// All genres in id order.
    pub fn genres(&self) -> Result<Vec<Genre>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, name FROM genres ORDER BY id")?;
        let genres = stmt
            .query_map([], |row| {
                Ok(Genre {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        log::debug!("Listed {} genres", genres.len());
        Ok(genres)
    }

    /// Look up a genre by its exact name.
    pub fn find_genre(&self, name: &str) -> Result<Option<Genre>> {
        let conn = self.connect()?;
        let genre = genre_id_by_name(&conn, name)?.map(|id| Genre {
            id,
            name: name.to_string(),
        });
        Ok(genre)
    }

    /// Number of books that reference the genre.
    pub fn genre_book_count(&self, id: GenreId) -> Result<u64> {
        let conn = self.connect()?;
        count_books_in(&conn, id)
    }
}

fn genre_id_by_name(conn: &Connection, name: &str) -> Result<Option<GenreId>> {
    let id = conn
        .query_row("SELECT id FROM genres WHERE name = ?1", [name], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(id)
}

fn count_books_in(conn: &Connection, id: GenreId) -> Result<u64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM books WHERE genre_id = ?1",
        [id],
        |row| row.get(0),
    )?;
    Ok(to_count(count))
}

/// Fail with [`Error::NotFound`] unless the referenced genre exists.
pub(crate) fn ensure_genre_exists(conn: &Connection, id: Option<GenreId>) -> Result<()> {
    let Some(id) = id else {
        return Ok(());
    };

    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM genres WHERE id = ?1)",
        [id],
        |row| row.get(0),
    )?;
    if exists {
        Ok(())
    } else {
        Err(Error::not_found("genre", id))
    }
}
