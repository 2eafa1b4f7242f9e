//! Status bar
//!
//! Shows key hints for the active screen, or the last storage error.

use pinpad_app::Screen;
use pinpad_core::Environment;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

/// Render the status bar.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let line = match app.status_message() {
        Some(message) => Line::from(vec![
            Span::raw(" "),
            Span::styled(message.to_string(), Style::default().fg(Color::Yellow)),
        ]),
        None => Line::from(format!(" {}", hints(app.screen()))),
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(paragraph, area);
}

fn hints(screen: Screen) -> &'static str {
    match screen {
        Screen::NameEntry => "Enter: start | Tab: results | Esc: quit",
        Screen::PinEntry => "0-9: press | Backspace: delete | Enter: submit | Esc: back",
        Screen::Results => "Esc: back",
    }
}
