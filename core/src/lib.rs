#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use error::*;
pub use event::*;
pub use game::*;
pub use generator::*;
pub use puzzles::*;
pub use session::*;
pub use timeline::*;
pub use types::*;

mod error;
mod event;
mod game;
mod generator;
mod puzzles;
mod session;
mod timeline;
mod types;

/// Number of puzzles in a full game.
pub const PUZZLE_COUNT: u8 = 5;

/// Length of the target sequence in the color sequence puzzle.
pub const SEQUENCE_LEN: usize = 4;

/// Width and height of the memory grid.
pub const RECALL_GRID_SIDE: u8 = 4;

/// Total number of cells on the memory grid.
pub const RECALL_GRID_CELLS: u8 = RECALL_GRID_SIDE * RECALL_GRID_SIDE;

/// How many cells are lit during the reveal window.
pub const RECALL_TARGETS: usize = 5;

/// Slots in a secret code and in every guess.
pub const CODE_LEN: usize = 4;

/// Highest number on the number pattern board, numbers go from 1 to this.
pub const NUMBER_COUNT: u8 = 9;

/// Amount of numbers to put in ascending order in the sorting puzzle.
pub const SORT_LEN: usize = 6;

/// Every delay used by the puzzles, all in milliseconds of game time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Pause between generating a sequence and the start of its playback.
    pub sequence_lead_in: Millis,
    /// Dark pause before each token is lit during playback.
    pub sequence_gap: Millis,
    /// How long each token stays lit during playback.
    pub sequence_highlight: Millis,
    /// Feedback flash of a token the player clicked.
    pub click_flash: Millis,
    /// Pause between generating recall targets and showing them.
    pub recall_lead_in: Millis,
    /// How long recall targets stay visible.
    pub recall_reveal: Millis,
    /// Wait after a wrong attempt before a new round starts.
    pub retry_delay: Millis,
    /// Wait after a solved puzzle before the game moves on.
    pub completion_delay: Millis,
}

impl Timings {
    pub const fn standard() -> Self {
        Self {
            sequence_lead_in: 500,
            sequence_gap: 600,
            sequence_highlight: 400,
            click_flash: 200,
            recall_lead_in: 500,
            recall_reveal: 2500,
            retry_delay: 1000,
            completion_delay: 1000,
        }
    }

    /// Every delay set to zero, timers still fire in the same order.
    pub const fn instant() -> Self {
        Self {
            sequence_lead_in: 0,
            sequence_gap: 0,
            sequence_highlight: 0,
            click_flash: 0,
            recall_lead_in: 0,
            recall_reveal: 0,
            retry_delay: 0,
            completion_delay: 0,
        }
    }

    /// Full duration of a sequence playback, from round start until input opens.
    pub const fn sequence_playback(&self) -> Millis {
        self.sequence_lead_in
            + (self.sequence_gap + self.sequence_highlight) * SEQUENCE_LEN as Millis
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_timings_fill_in_defaults() {
        let timings: Timings = serde_json::from_str(r#"{"recall_reveal": 4000}"#).unwrap();

        assert_eq!(timings.recall_reveal, 4000);
        assert_eq!(timings.sequence_gap, Timings::standard().sequence_gap);
        assert_eq!(timings.completion_delay, 1000);
    }

    #[test]
    fn standard_playback_lasts_four_and_a_half_seconds() {
        assert_eq!(Timings::standard().sequence_playback(), 4500);
        assert_eq!(Timings::instant().sequence_playback(), 0);
    }
}
