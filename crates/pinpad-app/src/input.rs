//! Terminal-agnostic input.

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) enabling deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Delete key (delete character at cursor).
    Delete,
    /// Tab key (view results from the name screen).
    Tab,
    /// Escape key (back / quit).
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Home key (cursor to start).
    Home,
    /// End key (cursor to end).
    End,
    /// Function key `F1`..`F12`.
    F(u8),
}

/// Keypad events: a button press or one of the two control actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadInput {
    /// Button at a grid position. Positions outside the grid are ignored.
    Position(u8),
    /// Remove the last entered digit.
    Backspace,
    /// Submit the entered code.
    Enter,
}
