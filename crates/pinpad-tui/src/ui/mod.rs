//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod name;
mod pinpad;
mod results;
mod status;

use pinpad_app::Screen;
use pinpad_core::Environment;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use crate::App;

/// Render the entire UI.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>) {
    const TITLE_HEIGHT: u16 = 1;
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [title_area, main_area, status_area] = chunks.as_ref() else {
        return;
    };

    let title = Paragraph::new(Line::from(" PIN Pad"))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(title, *title_area);

    match app.screen() {
        Screen::NameEntry => name::render(frame, app, *main_area),
        Screen::PinEntry => pinpad::render(frame, app, *main_area),
        Screen::Results => results::render(frame, app, *main_area),
    }
    status::render(frame, app, *status_area);
}
