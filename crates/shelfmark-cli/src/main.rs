use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;
mod tui;

use commands::{BookArgs, BookTarget};
use config::Config;

#[derive(Debug, Parser)]
#[command(name = "shelfmark", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the database (default: ~/.local/share/shelfmark/library.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Add, remove and list genres
    Genre {
        #[command(subcommand)]
        command: GenreCommand,
    },
    /// Add, update, remove and list books
    ///
    /// Every book is protected by the password given when it was added.
    /// Updating or removing a book requires that password. When addressed by
    /// title, every book sharing that title and password is affected; use
    /// --id to target a single book.
    Book {
        #[command(subcommand)]
        command: BookCommand,
    },
    /// Show catalog statistics
    Stats {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Open the interactive dashboard
    Dashboard,
    /// Show usage guidelines
    Guide,
    /// Inspect and initialize the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, clap::Subcommand)]
enum GenreCommand {
    /// Add a genre (names must be unique)
    Add {
        /// Genre name
        name: String,
    },
    /// Remove a genre that no book is filed under
    Remove {
        /// Genre name
        name: String,
    },
    /// List genres with their book counts
    List {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, clap::Subcommand)]
enum BookCommand {
    /// Add a book
    Add {
        /// Book title
        #[arg(long)]
        title: String,

        #[command(flatten)]
        details: BookArgs,

        /// Password required later to update or remove the book
        #[arg(long)]
        password: String,
    },
    /// Remove a book
    Remove {
        #[command(flatten)]
        target: BookTarget,

        /// The book's password
        #[arg(long)]
        password: String,
    },
    /// Replace a book's details
    Update {
        #[command(flatten)]
        target: BookTarget,

        /// The book's password
        #[arg(long)]
        password: String,

        /// New title (default: keep the current title)
        #[arg(long)]
        new_title: Option<String>,

        #[command(flatten)]
        details: BookArgs,
    },
    /// List books
    List {
        /// Only show books in this genre ("All" for every book)
        #[arg(long)]
        genre: Option<String>,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Create the config file with defaults
    Init,
    /// Print an example config file
    Example,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_with_db_path(cli.db)?;
    config::init_logging(&config)?;
    log::debug!("Using database {}", config.database_path.display());

    let db_path = config.database_path.as_path();

    match cli.command {
        Commands::Genre { command } => match command {
            GenreCommand::Add { name } => commands::add_genre(db_path, &name)?,
            GenreCommand::Remove { name } => commands::remove_genre(db_path, &name)?,
            GenreCommand::List { json } => commands::list_genres(db_path, json)?,
        },
        Commands::Book { command } => match command {
            BookCommand::Add {
                title,
                details,
                password,
            } => commands::add_book(db_path, title, details, &password)?,
            BookCommand::Remove { target, password } => {
                commands::remove_book(db_path, target, &password)?;
            }
            BookCommand::Update {
                target,
                password,
                new_title,
                details,
            } => commands::update_book(db_path, target, &password, new_title, details)?,
            BookCommand::List { genre, json } => {
                commands::list_books(db_path, genre.as_deref(), json)?;
            }
        },
        Commands::Stats { json } => commands::show_stats(db_path, json)?,
        Commands::Dashboard => tui::run_tui(db_path)?,
        Commands::Guide => commands::show_guide()?,
        Commands::Config { command } => match command {
            ConfigCommand::Show => commands::config::show_config(&config)?,
            ConfigCommand::Path => commands::config::show_path()?,
            ConfigCommand::Init => commands::config::init_config()?,
            ConfigCommand::Example => commands::config::show_example()?,
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_book_add() {
        let cli = Cli::try_parse_from([
            "shelfmark", "book", "add", "--title", "Dune", "--author", "Herbert", "--year",
            "1965", "--genre", "Fiction", "--read", "--rating", "4.5", "--password", "pw1",
        ])
        .unwrap();

        let Commands::Book {
            command:
                BookCommand::Add {
                    title,
                    details,
                    password,
                },
        } = cli.command
        else {
            panic!("expected book add");
        };
        assert_eq!(title, "Dune");
        assert_eq!(details.year, 1965);
        assert_eq!(details.genre.as_deref(), Some("Fiction"));
        assert!(details.read);
        assert_eq!(details.rating, Some(4.5));
        assert_eq!(password, "pw1");
    }

    #[test]
    fn test_year_out_of_range_rejected() {
        let result = Cli::try_parse_from([
            "shelfmark", "book", "add", "--title", "X", "--author", "Y", "--year", "1700",
            "--password", "p",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_remove_needs_exactly_one_target() {
        assert!(Cli::try_parse_from(["shelfmark", "book", "remove", "--password", "p"]).is_err());
        assert!(Cli::try_parse_from([
            "shelfmark", "book", "remove", "Dune", "--id", "3", "--password", "p"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["shelfmark", "book", "remove", "Dune", "--password", "p"])
            .is_ok());
        assert!(Cli::try_parse_from(["shelfmark", "book", "remove", "--id", "3", "--password", "p"])
            .is_ok());
    }

    #[test]
    fn test_global_db_flag() {
        let cli = Cli::try_parse_from(["shelfmark", "stats", "--db", "/tmp/x.db"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
    }
}
