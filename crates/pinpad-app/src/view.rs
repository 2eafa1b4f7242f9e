//! Results viewer.
//!
//! Turns a snapshot of the result log into display rows. Participant names
//! are escaped here, once, so every renderer (terminal table, HTML export,
//! plain text) only ever sees safe text.

use std::fmt::Write as _;

use pinpad_core::{Attempt, PinCode};

/// Text shown instead of a table when the log is empty.
pub const NO_RESULTS_PLACEHOLDER: &str = "No results yet.";

/// Whether the entered code equals the generated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Exact digit-for-digit match.
    Match,
    /// Any difference.
    Mismatch,
}

impl Outcome {
    /// CSS class used by the HTML export.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Mismatch => "mismatch",
        }
    }
}

/// One rendered attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// Participant name, already passed through [`escape_markup`].
    pub participant: String,
    /// Code the participant was shown.
    pub expected: PinCode,
    /// Code the participant typed.
    pub entered: PinCode,
    /// Match outcome.
    pub outcome: Outcome,
}

impl ResultRow {
    /// Build a row from a recorded attempt.
    pub fn from_attempt(attempt: &Attempt) -> Self {
        let outcome = if attempt.is_match() { Outcome::Match } else { Outcome::Mismatch };
        Self {
            participant: escape_markup(&attempt.participant_name),
            expected: attempt.generated_code,
            entered: attempt.entered_code,
            outcome,
        }
    }
}

/// Display representation of the result log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultsView {
    /// No attempts recorded. Rendered as [`NO_RESULTS_PLACEHOLDER`].
    #[default]
    Empty,
    /// Rows in log order. Never empty.
    Table(Vec<ResultRow>),
}

impl ResultsView {
    /// Build the view for a log snapshot.
    pub fn from_attempts(attempts: &[Attempt]) -> Self {
        if attempts.is_empty() {
            return Self::Empty;
        }
        Self::Table(attempts.iter().map(ResultRow::from_attempt).collect())
    }

    /// Rows, empty for [`ResultsView::Empty`].
    pub fn rows(&self) -> &[ResultRow] {
        match self {
            Self::Empty => &[],
            Self::Table(rows) => rows,
        }
    }

    /// HTML fragment: a results table, or the placeholder paragraph.
    pub fn to_html(&self) -> String {
        let rows = match self {
            Self::Empty => return format!("<p class=\"no-results\">{NO_RESULTS_PLACEHOLDER}</p>"),
            Self::Table(rows) => rows,
        };

        let mut out = String::from("<table class=\"results\">\n");
        out.push_str("<thead><tr><th>Participant</th><th>Expected</th><th>Entered</th></tr></thead>\n");
        out.push_str("<tbody>\n");
        for row in rows {
            let _ = writeln!(
                out,
                "<tr><td>{}</td><td>{}</td><td class=\"{}\">{}</td></tr>",
                row.participant,
                row.expected,
                row.outcome.css_class(),
                row.entered
            );
        }
        out.push_str("</tbody>\n</table>");
        out
    }

    /// Plain-text table for terminals without the kiosk UI.
    pub fn to_text(&self) -> String {
        let rows = match self {
            Self::Empty => return NO_RESULTS_PLACEHOLDER.to_string(),
            Self::Table(rows) => rows,
        };

        let width = rows
            .iter()
            .map(|r| r.participant.chars().count())
            .chain(std::iter::once("Participant".len()))
            .max()
            .unwrap_or(0);

        let mut out = format!("{:<width$}  Expected  Entered  Result", "Participant");
        for row in rows {
            let result = match row.outcome {
                Outcome::Match => "match",
                Outcome::Mismatch => "MISMATCH",
            };
            let _ = write!(
                out,
                "\n{:<width$}  {:<8}  {:<7}  {result}",
                row.participant,
                row.expected.to_string(),
                row.entered.to_string()
            );
        }
        out
    }
}

/// Escape text for inclusion in markup or a terminal cell.
///
/// HTML metacharacters become entities; control characters (including ESC)
/// become `\u{..}` so no terminal sequence survives.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c if c.is_control() => push_control(&mut out, c),
            c => out.push(c),
        }
    }
    out
}

/// Neutralise control characters for direct terminal output.
///
/// Unlike [`escape_markup`] this leaves markup characters alone, so a name
/// like `Ann & Bo` prints as typed.
pub fn escape_control(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            push_control(&mut out, c);
        } else {
            out.push(c);
        }
    }
    out
}

fn push_control(out: &mut String, c: char) {
    let _ = write!(out, "\\u{{{:x}}}", u32::from(c));
}
