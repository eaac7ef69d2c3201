use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use super::{scroll_offset, App};

/// Render every genre with the number of books filed under it.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        Cell::from("#").style(Style::default().fg(Color::DarkGray)),
        Cell::from("Genre").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Books"),
    ])
    .height(1);

    let viewport_height = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(app.selected_genre, viewport_height);

    let rows: Vec<Row> = app
        .genres
        .iter()
        .enumerate()
        .skip(offset)
        .take(viewport_height)
        .map(|(i, genre)| {
            let count = app
                .genre_counts
                .iter()
                .find(|c| c.name == genre.name)
                .map_or(0, |c| c.books);
            let style = if i == app.selected_genre {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(genre.id.to_string()),
                Cell::from(genre.name.clone()),
                Cell::from(count.to_string()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Percentage(60),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Genres ({})", app.genres.len())),
    );

    frame.render_widget(table, area);
}
