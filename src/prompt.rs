use std::{error::Error, fmt};

use minesweeper_engine::{Board, BoardError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Quit,
    Move { x: i64, y: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceError {
    Format,
    Negative,
    OutOfBounds,
}

impl fmt::Display for ChoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceError::Format => write!(f, "Invalid choice, use the form \"X, Y\""),
            ChoiceError::Negative => write!(f, "Invalid choice, use positive indexes"),
            ChoiceError::OutOfBounds => write!(f, "Invalid choice, out of bounds"),
        }
    }
}

impl Error for ChoiceError {}

impl From<BoardError> for ChoiceError {
    fn from(value: BoardError) -> Self {
        match value {
            BoardError::OutOfRange { .. } => ChoiceError::OutOfBounds,
        }
    }
}

/// Parses one line of player input against `board`.
pub fn parse_choice(line: &str, board: &Board) -> Result<Choice, ChoiceError> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        return Ok(Choice::Quit);
    }

    let parts: Vec<&str> = line.split(',').collect();
    let [x, y] = parts.as_slice() else {
        return Err(ChoiceError::Format);
    };
    let x: i64 = x.trim().parse().map_err(|_| ChoiceError::Format)?;
    let y: i64 = y.trim().parse().map_err(|_| ChoiceError::Format)?;

    if x < 0 || y < 0 {
        return Err(ChoiceError::Negative);
    }
    if !board.in_bounds(x, y) {
        return Err(ChoiceError::OutOfBounds);
    }

    Ok(Choice::Move { x, y })
}
