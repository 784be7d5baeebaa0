//! Keyboard handling.

use crossterm::event::KeyCode;
use tactoe_core::Position;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor to a new square.
    Cursor(Position),
    /// Click a square.
    Click(Position),
    /// Start a new game.
    Reset,
    /// Leave the game.
    Quit,
    /// Key has no meaning.
    None,
}

/// Maps a key press to an action given the current cursor.
///
/// Arrows move the cursor and stop at the edges. Enter or space clicks the
/// cursor square; digits 1-9 click directly, numbered like the board.
pub fn action_for(key: KeyCode, cursor: Position) -> Action {
    let (row, col) = (cursor.row(), cursor.col());
    let step = |row: Option<usize>, col: Option<usize>| {
        row.zip(col)
            .and_then(|(r, c)| Position::from_row_col(r, c))
            .map_or(Action::None, Action::Cursor)
    };

    match key {
        KeyCode::Up => step(row.checked_sub(1), Some(col)),
        KeyCode::Down => step(Some(row + 1), Some(col)),
        KeyCode::Left => step(Some(row), col.checked_sub(1)),
        KeyCode::Right => step(Some(row), Some(col + 1)),
        KeyCode::Enter | KeyCode::Char(' ') => Action::Click(cursor),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .and_then(|d| Position::from_index(d as usize - 1))
            .map_or(Action::None, Action::Click),
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Reset,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}
