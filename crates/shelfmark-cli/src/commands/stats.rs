use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use shelfmark_core::model::{GenreCount, Statistics};
use shelfmark_core::Database;

const BAR_WIDTH: u64 = 30;

#[derive(Debug, Serialize)]
struct StatsReport {
    #[serde(flatten)]
    statistics: Statistics,
    genres: Vec<GenreCount>,
}

pub fn show_stats(db_path: &Path, json: bool) -> Result<()> {
    let db = Database::open(db_path).context("Failed to open database")?;
    let statistics = db.compute_statistics()?;
    let genres = db.genre_breakdown()?;

    if json {
        let report = StatsReport { statistics, genres };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n📊 Book Statistics\n");
    println!("  Total Books:         {}", statistics.total_books);
    println!("  Read Books:          {}", statistics.read_books);
    println!("  Average Rating:      {:.2}", statistics.average_rating);
    println!("  Most Popular Genre:  {}", popular_genre(&statistics, &genres));

    if !genres.is_empty() {
        println!("\n  Books per genre\n");
        for line in bar_lines(&genres) {
            println!("  {}", line);
        }
    }
    Ok(())
}

/// The most popular genre with its book count, or the bare "none" marker.
fn popular_genre(statistics: &Statistics, genres: &[GenreCount]) -> String {
    if !statistics.has_popular_genre() {
        return statistics.most_popular_genre.clone();
    }
    match genres
        .iter()
        .find(|g| g.name == statistics.most_popular_genre)
    {
        Some(genre) => format!("{} ({} books)", genre.name, genre.books),
        None => statistics.most_popular_genre.clone(),
    }
}

/// Render one horizontal bar per genre, scaled to the largest genre.
fn bar_lines(genres: &[GenreCount]) -> Vec<String> {
    let max = genres.iter().map(|g| g.books).max().unwrap_or(0).max(1);
    let label_width = genres.iter().map(|g| g.name.chars().count()).max().unwrap_or(0);

    genres
        .iter()
        .map(|genre| {
            let len = usize::try_from(genre.books * BAR_WIDTH / max).unwrap_or(0);
            format!(
                "{:<width$}  {} {}",
                genre.name,
                "█".repeat(len),
                genre.books,
                width = label_width
            )
        })
        .collect()
}
