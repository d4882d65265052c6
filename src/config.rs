use std::{env, error::Error, fmt};

use minesweeper_engine::GameParams;
use tracing::{Level, warn};

pub const USAGE: &str = "usage: minesweeper [-h] [-w WIDTH] [-d DEPTH] [--inverse-input] \
                         [-n NUMBER_OF_BOMBS] [-s SEED]";

pub const HELP: &str = "\
options:
  -h, --help            show this help message and exit
  -w, --width WIDTH     The width of the board (0-10, default 5)
  -d, --depth DEPTH     The depth of the board (0-10, default 5)
  --inverse-input       Give input in x, -y coords instead of row, column
  -n, --number-of-bombs NUMBER_OF_BOMBS
                        The number of bombs on the board (0-100, default 5)
  -s, --seed SEED       Seed for mine placement (also MINESWEEPER_SEED)

environment:
  MINESWEEPER_SEED      Seed used when --seed is not given
  MINESWEEPER_LOG       Log level written to stderr (error..trace, default warn)";

const WIDTH: &str = "-w/--width";
const DEPTH: &str = "-d/--depth";
const BOMBS: &str = "-n/--number-of-bombs";
const SEED: &str = "-s/--seed";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Play(GameParams),
    Help,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    MissingValue(&'static str),
    NotAnInteger {
        flag: &'static str,
        value: String,
    },
    OutOfRange {
        flag: &'static str,
        value: String,
        min: usize,
        max: usize,
    },
    UnknownArgument(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingValue(flag) => write!(f, "argument {flag}: expected one argument"),
            ConfigError::NotAnInteger { flag, value } => {
                write!(f, "argument {flag}: '{value}' is not an integer")
            }
            ConfigError::OutOfRange {
                flag,
                value,
                min,
                max,
            } => write!(
                f,
                "argument {flag}: '{value}' is not an integer between {min}-{max}"
            ),
            ConfigError::UnknownArgument(arg) => write!(f, "unrecognized arguments: {arg}"),
        }
    }
}

impl Error for ConfigError {}

fn next_value(
    flag: &'static str,
    inline: Option<String>,
    rest: &mut impl Iterator<Item = String>,
) -> Result<String, ConfigError> {
    inline
        .or_else(|| rest.next())
        .ok_or(ConfigError::MissingValue(flag))
}

fn int_in_range(
    flag: &'static str,
    value: String,
    min: usize,
    max: usize,
) -> Result<usize, ConfigError> {
    let parsed: i64 = match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(_) => return Err(ConfigError::NotAnInteger { flag, value }),
    };

    match usize::try_from(parsed) {
        Ok(parsed) if (min..=max).contains(&parsed) => Ok(parsed),
        _ => Err(ConfigError::OutOfRange {
            flag,
            value,
            min,
            max,
        }),
    }
}

/// Parses command-line arguments, excluding the program name.
pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, ConfigError> {
    let mut params = GameParams::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => {
                (flag.to_string(), Some(value.to_string()))
            }
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--inverse-input" if inline.is_none() => params.inverse_input = true,
            "-w" | "--width" => {
                let value = next_value(WIDTH, inline, &mut args)?;
                params.width = int_in_range(WIDTH, value, 0, 10)?;
            }
            "-d" | "--depth" => {
                let value = next_value(DEPTH, inline, &mut args)?;
                params.depth = int_in_range(DEPTH, value, 0, 10)?;
            }
            "-n" | "--number-of-bombs" => {
                let value = next_value(BOMBS, inline, &mut args)?;
                params.bombs = int_in_range(BOMBS, value, 0, 100)?;
            }
            "-s" | "--seed" => {
                let value = next_value(SEED, inline, &mut args)?;
                match value.trim().parse() {
                    Ok(seed) => params.seed = Some(seed),
                    Err(_) => return Err(ConfigError::NotAnInteger { flag: SEED, value }),
                }
            }
            _ => return Err(ConfigError::UnknownArgument(arg)),
        }
    }

    Ok(Command::Play(params))
}

pub fn seed_from_env() -> Option<u64> {
    env::var("MINESWEEPER_SEED").ok().and_then(|value| env_seed(&value))
}

fn env_seed(value: &str) -> Option<u64> {
    match value.trim().parse() {
        Ok(seed) => Some(seed),
        Err(_) => {
            warn!(
                "Ignoring MINESWEEPER_SEED={:?}: not an unsigned integer",
                value
            );
            None
        }
    }
}

pub fn log_level_from_env() -> Level {
    env::var("MINESWEEPER_LOG")
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(Level::WARN)
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use super::*;

    fn parse(args: &[&str]) -> Result<Command, ConfigError> {
        parse_args(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn defaults_without_arguments() {
        assert_eq!(parse(&[]), Ok(Command::Play(GameParams::default())));
    }

    #[test]
    fn short_long_and_inline_flags() {
        let command = parse(&[
            "-w",
            "3",
            "--depth=7",
            "--number-of-bombs",
            "12",
            "--inverse-input",
            "-s",
            "99",
        ]);
        assert_eq!(
            command,
            Ok(Command::Play(GameParams {
                width: 3,
                depth: 7,
                bombs: 12,
                inverse_input: true,
                seed: Some(99),
            }))
        );
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(parse(&["-w", "0", "-d", "10", "-n", "100"]).is_ok());
        assert_eq!(
            parse(&["-w", "11"]),
            Err(ConfigError::OutOfRange {
                flag: WIDTH,
                value: "11".to_string(),
                min: 0,
                max: 10,
            })
        );
        assert!(matches!(
            parse(&["-n", "-1"]),
            Err(ConfigError::OutOfRange { flag: BOMBS, .. })
        ));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse(&["-d", "five"]),
            Err(ConfigError::NotAnInteger {
                flag: DEPTH,
                value: "five".to_string(),
            })
        );
        assert_eq!(parse(&["--width"]), Err(ConfigError::MissingValue(WIDTH)));
        assert_eq!(
            parse(&["--colour"]),
            Err(ConfigError::UnknownArgument("--colour".to_string()))
        );
        assert_eq!(
            parse(&["--inverse-input=yes"]),
            Err(ConfigError::UnknownArgument("--inverse-input=yes".to_string()))
        );
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(parse(&["-w", "3", "--help", "--bogus"]), Ok(Command::Help));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn env_seed_warns_when_unparsable() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let (good, bad) = tracing::subscriber::with_default(subscriber, || {
            (env_seed(" 42 "), env_seed("forty-two"))
        });
        assert_eq!(good, Some(42));
        assert_eq!(bad, None);

        let logs = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert_eq!(logs.lines().count(), 1);
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Ignoring MINESWEEPER_SEED=\"forty-two\""));
    }

    #[test]
    fn error_messages() {
        let err = parse(&["-w", "12"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "argument -w/--width: '12' is not an integer between 0-10"
        );
    }
}
