use std::io::{BufRead, Write};

use minesweeper_engine::{Board, Status};
use tracing::{debug, info, instrument};

use crate::{
    Result,
    prompt::{Choice, ChoiceError, parse_choice},
    render::board_text,
};

pub const WELCOME: &str = "Welcome! (q to quit)";
pub const PROMPT: &str = "Enter coordinates: ";
pub const LOST: &str = "Better luck next time!";
pub const FINISHED: &str = "Thanks for playing!";

/// One interactive game: reads moves from `input`, writes boards to `output`.
pub struct Session<R, W> {
    board: Board,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(board: Board, input: R, output: W) -> Self {
        Self {
            board,
            input,
            output,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Plays until the board is decided or the player quits, then prints the
    /// fully revealed board.
    #[instrument(level = "trace", skip(self))]
    pub fn run(&mut self) -> Result<Status> {
        info!(
            "Session started: {}x{} with {} bombs",
            self.board.width(),
            self.board.depth(),
            self.board.bombs()
        );
        writeln!(self.output, "{WELCOME}")?;

        while self.board.running() {
            self.display(false)?;

            let choice = match self.read_choice()? {
                Ok(choice) => choice,
                Err(err) => {
                    writeln!(self.output, "ERROR: {err}\n")?;
                    continue;
                }
            };

            match choice {
                Choice::Quit => {
                    writeln!(self.output)?;
                    self.board.finish();
                }
                Choice::Move { x, y } => {
                    if let Err(err) = self.board.update(x, y) {
                        writeln!(self.output, "ERROR: {}\n", ChoiceError::from(err))?;
                    }
                }
            }
        }

        self.display(true)?;
        info!("Session ended: {:?}", self.board.status());
        Ok(self.board.status())
    }

    /// Prompts for and parses one line. End of input, including Ctrl-C,
    /// counts as quitting.
    fn read_choice(&mut self) -> Result<std::result::Result<Choice, ChoiceError>> {
        write!(self.output, "{PROMPT}")?;
        self.output.flush()?;

        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            debug!("Input closed");
            return Ok(Ok(Choice::Quit));
        }
        let Ok(line) = String::from_utf8(bytes) else {
            debug!("Rejected choice that is not valid UTF-8");
            return Ok(Err(ChoiceError::Format));
        };

        let choice = parse_choice(&line, &self.board);
        if let Err(err) = &choice {
            debug!("Rejected choice {:?}: {}", line.trim(), err);
        }
        Ok(choice)
    }

    fn display(&mut self, reveal_all: bool) -> Result<()> {
        let rows = if reveal_all {
            self.board.render_final()
        } else {
            self.board.render_rows()
        };
        write!(self.output, "{}", board_text(&rows, self.board.width()))?;

        if !reveal_all {
            writeln!(self.output)?;
        } else if self.board.exploded() {
            writeln!(self.output, "{LOST}")?;
        } else {
            writeln!(self.output, "{FINISHED}")?;
        }
        Ok(())
    }
}
