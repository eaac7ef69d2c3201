use ratatui::prelude::*;
use ratatui::widgets::{BarChart, Block, Borders, Paragraph};

use super::App;

/// Render the statistics summary above a books-per-genre bar chart.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Summary
            Constraint::Min(5),    // Chart
        ])
        .split(area);

    render_summary(frame, app, chunks[0]);
    render_chart(frame, app, chunks[1]);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let stats = &app.stats;
    let lines = vec![
        Line::from(format!("Total Books:         {}", stats.total_books)),
        Line::from(format!(
            "Read Books:          {} ({} unread)",
            stats.read_books,
            stats.unread_books()
        )),
        Line::from(format!("Average Rating:      {:.2}", stats.average_rating)),
        Line::from(format!("Most Popular Genre:  {}", stats.most_popular_genre)),
    ];
    let summary = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("📊 Book Statistics"),
    );
    frame.render_widget(summary, area);
}

fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Books per genre");

    if app.genre_counts.is_empty() {
        let empty = Paragraph::new("No genres yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let data: Vec<(&str, u64)> = app
        .genre_counts
        .iter()
        .map(|g| (g.name.as_str(), g.books))
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(data.as_slice())
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(chart, area);
}
