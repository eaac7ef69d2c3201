use anyhow::{Context, Result};
use std::path::Path;

use shelfmark_core::model::GenreId;
use shelfmark_core::Database;

/// Entry shown in genre selectors to mean "no filter".
pub const ALL_GENRES: &str = "All";

pub fn add_genre(db_path: &Path, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Genre name must not be empty");
    }

    let db = Database::open(db_path).context("Failed to open database")?;
    db.add_genre(name)?;
    println!("✓ Genre '{}' added", name);
    Ok(())
}

pub fn remove_genre(db_path: &Path, name: &str) -> Result<()> {
    let name = name.trim();
    let db = Database::open(db_path).context("Failed to open database")?;
    db.remove_genre(name)?;
    println!("✓ Genre '{}' removed", name);
    Ok(())
}

pub fn list_genres(db_path: &Path, json: bool) -> Result<()> {
    let db = Database::open(db_path).context("Failed to open database")?;
    let genres = db.genres()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&genres)?);
        return Ok(());
    }

    if genres.is_empty() {
        println!("No genres yet. Add one with `shelfmark genre add <NAME>`.");
        return Ok(());
    }

    println!("{:>4}  {:<30} Books", "ID", "Genre");
    for genre in &genres {
        let count = db.genre_book_count(genre.id)?;
        println!("{:>4}  {:<30} {}", genre.id, genre.name, count);
    }
    Ok(())
}

/// Resolve a genre's display name to its id through `list_genres()`.
///
/// `None` (or the "All" entry) means no genre.
pub fn resolve_genre(db: &Database, name: Option<&str>) -> Result<Option<GenreId>> {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty() && *n != ALL_GENRES) else {
        return Ok(None);
    };

    db.list_genres()?
        .into_iter()
        .find_map(|(id, genre)| (genre == name).then_some(id))
        .map(Some)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown genre '{}'. Run `shelfmark genre list` to see available genres.",
                name
            )
        })
}
