//! Minesweeper Board Engine
//!
//! Owns a rectangular grid of [`Spot`]s, places mines, annotates each cell with
//! the number of orthogonally adjacent mines, and applies moves with a
//! flood-fill reveal until the game is won or lost.
//!
//! ```rust
//! use minesweeper_engine::{Board, GameParams, Status};
//!
//! let mut board = Board::new(GameParams {
//!     width: 1,
//!     depth: 1,
//!     bombs: 0,
//!     ..GameParams::default()
//! });
//!
//! assert!(board.in_bounds(0, 0));
//! assert_eq!(board.update(0, 0), Ok(Status::Won));
//! assert!(!board.running());
//! ```
//!
//! Coordinates handed to [`Board::in_bounds`] and [`Board::update`] are the
//! player's `(x, y)` pair. They address `[row][col]` directly, or `[col][row]`
//! when the board was created with `inverse_input`.

mod board;
mod error;
mod models;
mod spot;

pub use board::Board;
pub use error::BoardError;
pub use models::{GameParams, Pos, Status};
pub use spot::{BLANK, HIDDEN, MINE, Spot};
