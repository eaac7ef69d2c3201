//! Integration tests for the catalog operations against an on-disk database.

use shelfmark_core::model::{BookFields, GenreFilter, NO_POPULAR_GENRE};
use shelfmark_core::{Database, Error};
use tempfile::TempDir;

fn open_temp() -> (TempDir, Database) {
    let temp_dir = TempDir::new().unwrap();
    let db = Database::open(temp_dir.path().join("library.db")).expect("Failed to open database");
    (temp_dir, db)
}

/// Resolve a displayed genre name to its id the way a front end does.
fn genre_id(db: &Database, name: &str) -> shelfmark_core::model::GenreId {
    db.list_genres()
        .unwrap()
        .into_iter()
        .find(|(_, n)| n == name)
        .map(|(id, _)| id)
        .expect("genre should exist")
}

#[test]
fn test_fresh_database_is_empty() {
    let (_dir, db) = open_temp();

    assert!(db.list_genres().unwrap().is_empty());
    assert!(db.list_books().unwrap().is_empty());

    let stats = db.compute_statistics().unwrap();
    assert_eq!(stats.total_books, 0);
    assert_eq!(stats.read_books, 0);
    assert!(stats.average_rating.abs() < f64::EPSILON);
    assert_eq!(stats.most_popular_genre, NO_POPULAR_GENRE);
}

#[test]
fn test_dune_scenario() {
    let (_dir, db) = open_temp();

    db.add_genre("Fiction").unwrap();
    let fiction = genre_id(&db, "Fiction");
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

    let err = db.remove_book("Dune", "wrongpw").unwrap_err();
    assert!(matches!(err, Error::AuthOrNotFound));
    assert!(db.list_books().unwrap().iter().any(|b| b.title == "Dune"));

    db.remove_book("Dune", "pw1").unwrap();
    assert!(db.list_books().unwrap().is_empty());
}

#[test]
fn test_genre_lifecycle() {
    let (_dir, db) = open_temp();

    db.add_genre("Poetry").unwrap();
    assert!(matches!(
        db.add_genre("Poetry"),
        Err(Error::DuplicateName(_))
    ));
    let poetry = genre_id(&db, "Poetry");

    db.add_book(
        &BookFields::new("Leaves of Grass", "Walt Whitman", 1855)
            .with_genre(poetry)
            .with_password("grass"),
    )
    .unwrap();

    let err = db.remove_genre("Poetry").unwrap_err();
    assert!(matches!(err, Error::ReferentialIntegrity { count: 1, .. }));
    assert!(db.list_genres().unwrap().contains_key(&poetry));

    // Moving the book out of the genre unblocks the delete
    let moved = BookFields::new("Leaves of Grass", "Walt Whitman", 1855);
    db.update_book("Leaves of Grass", "grass", &moved).unwrap();
    db.remove_genre("Poetry").unwrap();
    assert!(db.list_genres().unwrap().is_empty());
}

#[test]
fn test_update_keeps_row_count() {
    let (_dir, db) = open_temp();
    db.add_genre("Fiction").unwrap();
    let fiction = genre_id(&db, "Fiction");
    for (title, pw) in [("Emma", "e"), ("Persuasion", "p")] {
        db.add_book(
            &BookFields::new(title, "Jane Austen", 1815)
                .with_genre(fiction)
                .with_password(pw),
        )
        .unwrap();
    }

    let update = BookFields::new("Emma (annotated)", "Jane Austen", 1815)
        .with_genre(fiction)
        .with_read_status(true)
        .with_rating(4.0)
        .with_read_link("https://example.org/emma");
    db.update_book("Emma", "e", &update).unwrap();

    let books = db.list_books().unwrap();
    assert_eq!(books.len(), 2);
    let emma = books.iter().find(|b| b.title == "Emma (annotated)").unwrap();
    assert_eq!(emma.fields(), update);
    assert!(books.iter().any(|b| b.title == "Persuasion" && !b.read_status));

    let wrong = BookFields::new("Hacked", "Nobody", 2000);
    assert!(matches!(
        db.update_book("Persuasion", "e", &wrong),
        Err(Error::AuthOrNotFound)
    ));
    assert_eq!(db.list_books().unwrap(), books);
}

#[test]
fn test_filter_by_genre_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("library.db");

    {
        let db = Database::open(&path).unwrap();
        let history = db.add_genre("History").unwrap();
        db.add_genre("Fiction").unwrap();
        db.add_book(
            &BookFields::new("SPQR", "Mary Beard", 2015)
                .with_genre(history)
                .with_password("rome"),
        )
        .unwrap();
    }

    let db = Database::open(&path).unwrap();
    let history = genre_id(&db, "History");
    let fiction = genre_id(&db, "Fiction");

    assert_eq!(db.list_books_by_genre(history).unwrap().len(), 1);
    assert!(db.list_books_by_genre(fiction).unwrap().is_empty());
    assert_eq!(db.list_books_by_genre(GenreFilter::All).unwrap().len(), 1);
}
