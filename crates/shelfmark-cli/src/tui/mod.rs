use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use shelfmark_core::model::{Book, Genre, GenreCount, GenreId, Statistics};
use shelfmark_core::{Database, Error};

pub mod books;
pub mod genres;
pub mod stats;

/// Which view the dashboard is currently displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Books,
    Genres,
    Stats,
}

impl View {
    const ALL: [Self; 3] = [Self::Books, Self::Genres, Self::Stats];

    const fn title(self) -> &'static str {
        match self {
            Self::Books => "Books",
            Self::Genres => "Genres",
            Self::Stats => "Statistics",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Books => 0,
            Self::Genres => 1,
            Self::Stats => 2,
        }
    }

    const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Severity of a status line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    /// The request was refused because of what was asked for.
    Warning,
    /// Storage or I/O failed.
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }

    pub fn from_error(err: &Error) -> Self {
        let kind = if err.is_user_error() {
            StatusKind::Warning
        } else {
            StatusKind::Failure
        };
        Self {
            kind,
            message: format!("Error: {}", err),
        }
    }

    fn style(&self) -> Style {
        let colour = match self.kind {
            StatusKind::Info => Color::Green,
            StatusKind::Warning => Color::Yellow,
            StatusKind::Failure => Color::Red,
        };
        Style::default().fg(colour)
    }
}

/// Application state for the dashboard.
///
/// Everything shown is reloaded from the database after every key press;
/// nothing is cached between renders.
#[derive(Debug)]
pub struct App {
    db: Database,
    pub view: View,
    pub genres: Vec<Genre>,
    pub genre_counts: Vec<GenreCount>,
    pub books: Vec<Book>,
    pub stats: Statistics,
    /// Genre the book list is limited to, `None` for all books.
    pub filter: Option<GenreId>,
    pub selected_book: usize,
    pub selected_genre: usize,
    pub status: Option<Status>,
    pub should_quit: bool,
}

impl App {
    pub fn new(db: Database) -> Self {
        let mut app = Self {
            db,
            view: View::Books,
            genres: Vec::new(),
            genre_counts: Vec::new(),
            books: Vec::new(),
            stats: Statistics::default(),
            filter: None,
            selected_book: 0,
            selected_genre: 0,
            status: None,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Reload every view from storage, reporting failures in the status line.
    pub fn refresh(&mut self) {
        if let Err(e) = self.load() {
            log::warn!("Dashboard refresh failed: {}", e);
            self.status = Some(Status::from_error(&e));
        }
    }

    fn load(&mut self) -> shelfmark_core::Result<()> {
        self.genres = self.db.genres()?;
        if let Some(id) = self.filter {
            if !self.genres.iter().any(|g| g.id == id) {
                self.filter = None;
            }
        }

        self.books = self.db.list_books_by_genre(self.filter)?;
        self.genre_counts = self.db.genre_breakdown()?;
        self.stats = self.db.compute_statistics()?;

        self.selected_book = self.selected_book.min(self.books.len().saturating_sub(1));
        self.selected_genre = self
            .selected_genre
            .min(self.genres.len().saturating_sub(1));
        Ok(())
    }

    /// Name of the active genre filter.
    pub fn filter_label(&self) -> &str {
        self.filter
            .and_then(|id| self.genres.iter().find(|g| g.id == id))
            .map_or("All", |g| g.name.as_str())
    }

    /// Advance the book filter: All, then each genre in turn, then All again.
    fn cycle_filter(&mut self) {
        let position = self
            .filter
            .and_then(|id| self.genres.iter().position(|g| g.id == id));
        let next = match position {
            None => 0,
            Some(i) => i + 1,
        };
        self.filter = self.genres.get(next).map(|g| g.id);
        self.selected_book = 0;
    }

    fn handle_key(&mut self, key: KeyCode) {
        self.status = None;
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.view = self.view.next(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.view = self.view.prev(),
            KeyCode::Char('g') if self.view == View::Books => self.cycle_filter(),
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('r') => self.status = Some(Status::info("Refreshed")),
            _ => {}
        }
        self.refresh();
    }

    fn move_selection(&mut self, delta: isize) {
        let (selected, len) = match self.view {
            View::Books => (&mut self.selected_book, self.books.len()),
            View::Genres => (&mut self.selected_genre, self.genres.len()),
            View::Stats => return,
        };
        let target = selected.saturating_add_signed(delta);
        if target < len {
            *selected = target;
        }
    }
}

/// First row to draw so that `selected` stays inside a viewport of `height`.
pub(crate) fn scroll_offset(selected: usize, height: usize) -> usize {
    if height == 0 {
        0
    } else {
        selected.saturating_sub(height - 1)
    }
}

/// Run the dashboard.
///
/// Sets up the terminal, runs the main event loop, and restores the terminal
/// on exit (including on error).
pub fn run_tui(db_path: &Path) -> Result<()> {
    let db = Database::open(db_path).context("Failed to open database")?;
    let app = App::new(db);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the event loop, capturing any error so we can restore the terminal
    let result = run_event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(5),    // Active view
            Constraint::Length(3), // Status / help
        ])
        .split(frame.area());

    let tabs = Tabs::new(View::ALL.iter().map(|v| v.title()).collect::<Vec<_>>())
        .select(app.view.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("📚 Shelfmark"),
        );
    frame.render_widget(tabs, chunks[0]);

    match app.view {
        View::Books => books::render(frame, app, chunks[1]),
        View::Genres => genres::render(frame, app, chunks[1]),
        View::Stats => stats::render(frame, app, chunks[1]),
    }

    render_status(frame, app, chunks[2]);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match &app.status {
        Some(status) => (status.message.clone(), status.style()),
        None => (
            "  Tab/\u{2190}\u{2192} Switch view  \u{2191}/k \u{2193}/j Move  g Genre filter  r Refresh  q Quit"
                .to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };
    let status = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}
