use anyhow::Result;

const GUIDELINES: &str = "\
📜 Guidelines

  genre add      Enter a unique genre name. Duplicate genres are not allowed.
  genre remove   A genre can only be deleted once no books are filed under it.
  book add       Give the title, author, year and optionally genre, read status,
                 rating and read/download links. Set a password: it is needed
                 later to update or remove the book.
  book remove    Give the title (or --id) and the book's password.
  book update    Give the current title (or --id) and the password, then the new
                 details. Every book sharing that title and password is updated.
  book list      Browse all books, or only one genre with --genre.
  stats          Total and read books, average rating, most popular genre.
  dashboard      Interactive view of books, genres and statistics.

Passwords are stored as plain text. Do not reuse a real password.
";

pub fn show_guide() -> Result<()> {
    print!("{}", GUIDELINES);
    Ok(())
}
