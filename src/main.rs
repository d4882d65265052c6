use std::{env, io, process::ExitCode};

use minesweeper_engine::Board;
use minesweeper_terminal::{
    InterruptibleStdin, Session,
    config::{self, Command, HELP, USAGE},
};
use tracing::error;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(config::log_level_from_env())
        .init();

    let mut params = match config::parse_args(env::args().skip(1)) {
        Ok(Command::Play(params)) => params,
        Ok(Command::Help) => {
            println!("{USAGE}\n\n{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{USAGE}");
            eprintln!("minesweeper: error: {err}");
            return ExitCode::from(2);
        }
    };
    params.seed = params.seed.or_else(config::seed_from_env);

    let input = match InterruptibleStdin::spawn() {
        Ok(input) => input,
        Err(err) => {
            error!("Unable to read input: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut session = Session::new(Board::new(params), input, io::stdout().lock());
    match session.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Session failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
