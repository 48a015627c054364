use std::str::FromStr;

use quintet_core::{CellIndex, CodeColor, GameError, PlayerInput, SequenceToken};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help` for the list")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("positions are counted from 1")]
    ZeroPosition,
    #[error(transparent)]
    Game(#[from] GameError),
}

/// One line typed by the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Play(PlayerInput),
    /// Empty line, just lets time pass and redraws.
    Refresh,
    Restart,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  pad <blue|green|orange|pink>   press a pad of the color sequence
  num <1-9>                      click a number
  cell <1-16>                    click a memory cell
  slot <1-6>                     pick a number to swap
  add <color>                    append a color to the code guess
  del                            remove the last color of the guess
  submit                         check the code guess
  restart                        start over from the first puzzle
  quit                           leave
  <enter>                        redraw";

fn argument<'a>(command: &'static str, arg: Option<&'a str>) -> Result<&'a str, CommandError> {
    arg.ok_or(CommandError::MissingArgument(command))
}

fn number(raw: &str) -> Result<u8, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::NotANumber(raw.to_string()))
}

/// Converts a position shown to the player into a zero-based index.
fn position(raw: &str) -> Result<u8, CommandError> {
    number(raw)?.checked_sub(1).ok_or(CommandError::ZeroPosition)
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Self::Refresh);
        };
        let arg = words.next();

        let input = match verb.to_ascii_lowercase().as_str() {
            "pad" | "p" => {
                PlayerInput::Token(SequenceToken::from_str(argument("pad", arg)?)?)
            }
            "num" | "n" => PlayerInput::Number(number(argument("num", arg)?)?),
            "cell" | "c" => {
                let index: CellIndex = position(argument("cell", arg)?)?;
                PlayerInput::Cell(index)
            }
            "slot" | "s" => PlayerInput::Slot(position(argument("slot", arg)?)?),
            "add" | "a" => PlayerInput::AddColor(CodeColor::from_str(argument("add", arg)?)?),
            "del" | "d" | "back" => PlayerInput::RemoveColor,
            "submit" | "go" => PlayerInput::Submit,
            "restart" => return Ok(Self::Restart),
            "help" | "?" => return Ok(Self::Help),
            "quit" | "exit" | "q" => return Ok(Self::Quit),
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Self::Play(input))
    }
}
