//! Results screen
//!
//! Tabular listing of recorded attempts. The entered column is green for a
//! match and red for a mismatch.

use pinpad_app::{Outcome, ResultsView, view::NO_RESULTS_PLACEHOLDER};
use pinpad_core::Environment;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::App;

const CODE_COLUMN_WIDTH: u16 = 8;

/// Render the results screen.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Results ");

    let rows = match app.results() {
        ResultsView::Empty => {
            let placeholder = Paragraph::new(NO_RESULTS_PLACEHOLDER)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(placeholder, area);
            return;
        },
        ResultsView::Table(rows) => rows,
    };

    let items: Vec<Row> = rows
        .iter()
        .map(|row| {
            let entered_style = match row.outcome {
                Outcome::Match => Style::default().fg(Color::Green),
                Outcome::Mismatch => Style::default().fg(Color::Red),
            };
            Row::new(vec![
                Cell::from(row.participant.clone()),
                Cell::from(row.expected.to_string()),
                Cell::from(row.entered.to_string()).style(entered_style),
            ])
        })
        .collect();

    let header = Row::new(vec!["Participant", "Expected", "Entered"])
        .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::DarkGray));

    let table = Table::new(items, [
        Constraint::Min(12),
        Constraint::Length(CODE_COLUMN_WIDTH),
        Constraint::Length(CODE_COLUMN_WIDTH),
    ])
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}
