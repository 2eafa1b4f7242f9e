//! Name entry screen
//!
//! Single-line name field with cursor and the start button.

use pinpad_core::Environment;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::App;

const PROMPT: &str = "> ";
const FIELD_HEIGHT: u16 = 3;
const BUTTON_HEIGHT: u16 = 1;

/// Render the name entry screen.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Min(0),
        ])
        .split(area);

    let [field_area, button_area, _] = chunks.as_ref() else {
        return;
    };

    let input = app.name_input();
    let block = Block::default().borders(Borders::ALL).title(" Your name ");
    let field = Paragraph::new(format!("{PROMPT}{}", input.text())).block(block);
    frame.render_widget(field, *field_area);

    let prompt_width = PROMPT.len() as u16 + 1;
    let cursor_offset = (input.cursor() as u16).min(field_area.width.saturating_sub(prompt_width + 1));
    frame.set_cursor_position((
        field_area.x.saturating_add(prompt_width).saturating_add(cursor_offset),
        field_area.y.saturating_add(1),
    ));

    let button_style = if app.start_enabled() {
        Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let button = Line::from(vec![Span::raw(" "), Span::styled("[ Start ]", button_style)]);
    frame.render_widget(Paragraph::new(button), *button_area);
}
