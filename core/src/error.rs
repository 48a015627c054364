use thiserror::Error;

use crate::PuzzleKind;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("You must select 4 colors")]
    IncompleteGuess,
    #[error("Game already completed, no new moves are accepted")]
    GameCompleted,
}

/// Player input that was rejected before touching any puzzle state.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("unknown sequence color")]
    UnknownToken,
    #[error("unknown code color")]
    UnknownColor,
    #[error("cell {0} is outside the grid")]
    CellOutOfRange(u8),
    #[error("number {0} is not on the board")]
    NumberOutOfRange(u8),
    #[error("slot {0} is outside the row")]
    SlotOutOfRange(u8),
    #[error("{input} does not apply to the {puzzle} puzzle")]
    WrongPuzzle {
        input: &'static str,
        puzzle: PuzzleKind,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
