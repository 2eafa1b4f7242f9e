//! Pin entry screen
//!
//! Shows the target code, the entry dots, and the keypad. The dots turn red
//! while the shake cue is active.

use pinpad_app::escape_control;
use pinpad_core::{Environment, GridPosition, PIN_LENGTH};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::App;

const FILLED_DOT: &str = "●";
const EMPTY_DOT: &str = "○";
const KEYPAD_COLUMNS: usize = 3;
const INCOMPLETE_HINT: &str = "Enter all 4 digits";

/// Render the pin entry screen.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let Some(session) = app.session() else {
        return;
    };

    let code: Vec<String> = session.code().digits().iter().map(ToString::to_string).collect();
    let filled = session.pin().len();
    let dot_style =
        if app.is_shaking() { Style::default().fg(Color::Red) } else { Style::default().fg(Color::Cyan) };
    let dots: Vec<Span> = (0..PIN_LENGTH)
        .map(|i| Span::styled(format!("{} ", if i < filled { FILLED_DOT } else { EMPTY_DOT }), dot_style))
        .collect();

    let mut lines = vec![
        Line::from(format!("Hello, {}", escape_control(session.name()))),
        Line::from(vec![
            Span::raw("Code: "),
            Span::styled(code.join(" "), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(dots),
    ];
    if app.is_shaking() {
        lines.push(Line::styled(INCOMPLETE_HINT, Style::default().fg(Color::Red)));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));
    lines.extend(keypad_lines());

    let block = Block::default().borders(Borders::ALL).title(" Enter the code ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Keypad rows, phone layout, with the last button centered.
fn keypad_lines() -> Vec<Line<'static>> {
    let buttons: Vec<String> = GridPosition::all().map(|p| format!("[{}]", p.digit())).collect();
    let mut lines: Vec<Line> =
        buttons.chunks(KEYPAD_COLUMNS).map(|row| Line::from(format!(" {}", row.join(" ")))).collect();

    // A lone last button sits under the middle column.
    if let Some(last) = lines.last_mut()
        && buttons.len() % KEYPAD_COLUMNS == 1
    {
        *last = Line::from(format!(" {} {}", " ".repeat(3), buttons.last().map_or("", String::as_str)));
    }
    lines
}
