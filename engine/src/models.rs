use serde::{Deserialize, Serialize};

/// A grid coordinate, always in `[row][col]` order.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameParams {
    pub width: usize,
    pub depth: usize,
    pub bombs: usize,
    /// Treat incoming coordinates as `(col, row)` instead of `(row, col)`.
    pub inverse_input: bool,
    /// Fixed seed for mine placement. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            width: 5,
            depth: 5,
            bombs: 5,
            inverse_input: false,
            seed: None,
        }
    }
}

/// Session state of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Running,
    Won,
    Lost,
    /// The player left before the game was decided.
    Quit,
}

impl Status {
    pub fn is_running(self) -> bool {
        self == Status::Running
    }

    pub fn is_exploded(self) -> bool {
        self == Status::Lost
    }
}
