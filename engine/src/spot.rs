/// Glyph shown for a cell the player has not uncovered yet.
pub const HIDDEN: char = '?';
pub const MINE: char = '#';
pub const BLANK: char = ' ';

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Spot {
    pub(crate) revealed: bool,
    pub(crate) is_mine: bool,
    pub(crate) adjacent: u8,
}

impl Spot {
    pub fn reset(&mut self) {
        self.revealed = false;
        self.is_mine = false;
        self.adjacent = 0;
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_mine(&self) -> bool {
        self.is_mine
    }

    /// Number of orthogonal neighbours holding a mine.
    pub fn adjacent(&self) -> u8 {
        self.adjacent
    }

    /// The character this cell shows once uncovered, whether or not it has been.
    pub fn glyph(&self) -> char {
        if self.is_mine {
            MINE
        } else if self.adjacent > 0 {
            char::from_digit(u32::from(self.adjacent), 10).unwrap_or(HIDDEN)
        } else {
            BLANK
        }
    }

    pub fn display(&self, reveal_all: bool) -> char {
        if self.revealed || reveal_all {
            self.glyph()
        } else {
            HIDDEN
        }
    }
}
