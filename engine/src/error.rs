use std::{error::Error, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// The coordinate pair does not address a cell on this board.
    OutOfRange { x: i64, y: i64 },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfRange { x, y } => write!(f, "({x}, {y}) is outside the board"),
        }
    }
}

impl Error for BoardError {}
