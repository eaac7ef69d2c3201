use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use super::{scroll_offset, App};

/// Render the book list, limited to the active genre filter.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        Cell::from("#").style(Style::default().fg(Color::DarkGray)),
        Cell::from("Title").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Author"),
        Cell::from("Year"),
        Cell::from("Genre"),
        Cell::from("Read"),
        Cell::from("Rating"),
    ])
    .height(1);

    // area.height - 2 for borders - 1 for header
    let viewport_height = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(app.selected_book, viewport_height);

    let rows: Vec<Row> = app
        .books
        .iter()
        .enumerate()
        .skip(offset)
        .take(viewport_height)
        .map(|(i, book)| {
            let style = if i == app.selected_book {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(book.id.to_string()),
                Cell::from(book.title.clone()),
                Cell::from(book.author.clone()),
                Cell::from(book.year.to_string()),
                Cell::from(book.genre_name.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(if book.read_status { "\u{2713}" } else { "" }),
                Cell::from(
                    book.rating
                        .map(|r| format!("{:.1}", r))
                        .unwrap_or_else(|| "-".to_string()),
                ),
            ])
            .style(style)
        })
        .collect();

    let title = format!(
        "Books [{}] {} shown    g: genre filter",
        app.filter_label(),
        app.books.len()
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
            Constraint::Length(6),
            Constraint::Percentage(15),
            Constraint::Length(5),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}
