use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Milliseconds on the game's logical timeline.
pub type Millis = u64;

/// Row-major index of a cell on the memory grid.
pub type CellIndex = u8;

/// One of the four pads of the color sequence puzzle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SequenceToken {
    Blue,
    Green,
    Orange,
    Pink,
}

impl SequenceToken {
    pub const ALL: [Self; 4] = [Self::Blue, Self::Green, Self::Orange, Self::Pink];

    pub const fn name(self) -> &'static str {
        use SequenceToken::*;
        match self {
            Blue => "Blue",
            Green => "Green",
            Orange => "Orange",
            Pink => "Pink",
        }
    }
}

impl fmt::Display for SequenceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for SequenceToken {
    type Error = GameError;

    fn try_from(index: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(InvalidInput::UnknownToken.into())
    }
}

impl FromStr for SequenceToken {
    type Err = GameError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|token| token.name().eq_ignore_ascii_case(name.trim()))
            .ok_or(InvalidInput::UnknownToken.into())
    }
}

/// Palette of the color code puzzle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CodeColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl CodeColor {
    pub const ALL: [Self; 6] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Purple,
        Self::Orange,
    ];

    pub const fn name(self) -> &'static str {
        use CodeColor::*;
        match self {
            Red => "Red",
            Blue => "Blue",
            Green => "Green",
            Yellow => "Yellow",
            Purple => "Purple",
            Orange => "Orange",
        }
    }
}

impl fmt::Display for CodeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for CodeColor {
    type Error = GameError;

    fn try_from(index: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(InvalidInput::UnknownColor.into())
    }
}

impl FromStr for CodeColor {
    type Err = GameError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(name.trim()))
            .ok_or(InvalidInput::UnknownColor.into())
    }
}

/// Checks that `index` addresses a cell of the memory grid.
pub fn validate_cell(index: CellIndex) -> Result<CellIndex> {
    if index < RECALL_GRID_CELLS {
        Ok(index)
    } else {
        Err(InvalidInput::CellOutOfRange(index).into())
    }
}

/// Row-major `(row, column)` of a memory grid cell.
pub const fn cell_position(index: CellIndex) -> [usize; 2] {
    [
        (index / RECALL_GRID_SIDE) as usize,
        (index % RECALL_GRID_SIDE) as usize,
    ]
}
