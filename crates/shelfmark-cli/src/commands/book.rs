use anyhow::{Context, Result};
use std::path::Path;

use shelfmark_core::model::{Book, BookFields, BookId};
use shelfmark_core::Database;

use super::genre::resolve_genre;
use super::input::{optional_link, parse_rating, parse_year};

/// Book metadata shared by `book add` and `book update`.
#[derive(Debug, clap::Args)]
pub struct BookArgs {
    /// Author name
    #[arg(long)]
    pub author: String,

    /// Publication year (1800-2025)
    #[arg(long, value_parser = parse_year)]
    pub year: i32,

    /// Genre name, as shown by `shelfmark genre list`
    #[arg(long)]
    pub genre: Option<String>,

    /// Mark the book as read
    #[arg(long)]
    pub read: bool,

    /// Rating from 0.0 to 5.0
    #[arg(long, value_parser = parse_rating)]
    pub rating: Option<f64>,

    /// Link to read the book online
    #[arg(long)]
    pub read_link: Option<String>,

    /// Link to download the book
    #[arg(long)]
    pub download_link: Option<String>,
}

impl BookArgs {
    fn into_fields(self, db: &Database, title: String) -> Result<BookFields> {
        let genre_id = resolve_genre(db, self.genre.as_deref())?;
        Ok(BookFields {
            title,
            author: self.author,
            year: self.year,
            genre_id,
            read_status: self.read,
            rating: self.rating,
            read_link: optional_link(self.read_link),
            download_link: optional_link(self.download_link),
        })
    }
}

/// Which book(s) an update or removal targets.
#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
pub struct BookTarget {
    /// Title of the book. Every book with this title and password is affected.
    pub title: Option<String>,

    /// Id of the book, as shown by `shelfmark book list`
    #[arg(long)]
    pub id: Option<i64>,
}

fn check_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        anyhow::bail!("Title must not be empty");
    }
    Ok(())
}

pub fn add_book(db_path: &Path, title: String, args: BookArgs, password: &str) -> Result<()> {
    check_title(&title)?;
    if password.is_empty() {
        anyhow::bail!("A password is required to protect the book");
    }

    let db = Database::open(db_path).context("Failed to open database")?;
    let fields = args.into_fields(&db, title)?;
    let id = db.add_book(&fields.clone().with_password(password))?;

    println!(
        "✓ '{}' by {} added (id {})",
        fields.title, fields.author, id
    );
    Ok(())
}

pub fn remove_book(db_path: &Path, target: BookTarget, password: &str) -> Result<()> {
    let db = Database::open(db_path).context("Failed to open database")?;

    match (target.id, target.title) {
        (Some(id), _) => {
            db.remove_book_by_id(BookId::from_raw(id), password)?;
            println!("✓ Book {} removed", id);
        }
        (None, Some(title)) => {
            let removed = db.remove_book(&title, password)?;
            if removed > 1 {
                println!("✓ {} books titled '{}' removed", removed, title);
            } else {
                println!("✓ '{}' removed", title);
            }
        }
        (None, None) => anyhow::bail!("Give a title or --id"),
    }
    Ok(())
}

pub fn update_book(
    db_path: &Path,
    target: BookTarget,
    password: &str,
    new_title: Option<String>,
    args: BookArgs,
) -> Result<()> {
    if let Some(title) = &new_title {
        check_title(title)?;
    }
    let db = Database::open(db_path).context("Failed to open database")?;

    match (target.id, target.title) {
        (Some(id), _) => {
            let id = BookId::from_raw(id);
            let current = db
                .get_book(id)?
                .map(|book| book.title)
                .ok_or(shelfmark_core::Error::AuthOrNotFound)?;
            let fields = args.into_fields(&db, new_title.unwrap_or(current))?;
            db.update_book_by_id(id, password, &fields)?;
            println!("✓ Book {} updated", id);
        }
        (None, Some(title)) => {
            let fields = args.into_fields(&db, new_title.unwrap_or_else(|| title.clone()))?;
            let updated = db.update_book(&title, password, &fields)?;
            println!("✓ '{}' updated ({} book(s))", fields.title, updated);
        }
        (None, None) => anyhow::bail!("Give a title or --id"),
    }
    Ok(())
}

pub fn list_books(db_path: &Path, genre: Option<&str>, json: bool) -> Result<()> {
    let db = Database::open(db_path).context("Failed to open database")?;
    let filter = resolve_genre(&db, genre)?;
    let books = db.list_books_by_genre(filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&books)?);
        return Ok(());
    }

    if books.is_empty() {
        println!("No books available.");
        return Ok(());
    }

    for book in &books {
        print_book(book);
    }
    Ok(())
}

fn print_book(book: &Book) {
    println!("\n📕 {} by {}  [id {}]", book.title, book.author, book.id);
    println!("  Year:   {}", book.year);
    println!(
        "  Genre:  {}",
        book.genre_name.as_deref().unwrap_or("(none)")
    );
    println!(
        "  Status: {}",
        if book.read_status { "Read" } else { "Not read" }
    );
    match book.rating {
        Some(rating) => println!("  Rating: {:.1}/5", rating),
        None => println!("  Rating: -"),
    }
    if let Some(link) = &book.read_link {
        println!("  Read online: {}", link);
    }
    if let Some(link) = &book.download_link {
        println!("  Download:    {}", link);
    }
}
