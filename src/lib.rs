//! Terminal front end for the minesweeper board engine: flag parsing, the
//! prompt loop and board text layout.

pub mod config;
pub mod input;
pub mod prompt;
pub mod render;
pub mod session;

pub use input::InterruptibleStdin;
pub use session::Session;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
