use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a completed puzzle led to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionStep {
    /// Moved on to the puzzle with this ordinal.
    Next(u8),
    /// The last puzzle was completed, with the frozen elapsed seconds.
    Finished(u32),
    /// Session was already over, nothing changed.
    AlreadyFinished,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleProgress {
    Done,
    Current,
    Pending,
}

/// Which puzzle is being played and since when.
///
/// Valid transitions:
/// - ordinal n -> ordinal n + 1, for n < PUZZLE_COUNT
/// - ordinal PUZZLE_COUNT -> finished
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    ordinal: u8,
    started_at: Millis,
    elapsed_secs: Option<u32>,
}

impl GameSession {
    pub fn new(started_at: Millis) -> Self {
        Self {
            ordinal: 1,
            started_at,
            elapsed_secs: None,
        }
    }

    /// 1-based ordinal of the current puzzle, stays on the last one after finishing.
    pub fn ordinal(&self) -> u8 {
        self.ordinal
    }

    pub fn started_at(&self) -> Millis {
        self.started_at
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed_secs.is_some()
    }

    /// Whole seconds the game took, only known once it is complete.
    pub fn elapsed_secs(&self) -> Option<u32> {
        self.elapsed_secs
    }

    pub fn complete_puzzle(&mut self, now: Millis) -> SessionStep {
        if self.is_complete() {
            return SessionStep::AlreadyFinished;
        }

        if self.ordinal >= PUZZLE_COUNT {
            let elapsed = elapsed_secs(self.started_at, now);
            log::debug!("session finished after {}s", elapsed);
            self.elapsed_secs = Some(elapsed);
            SessionStep::Finished(elapsed)
        } else {
            self.ordinal += 1;
            SessionStep::Next(self.ordinal)
        }
    }

    pub fn progress_of(&self, ordinal: u8) -> PuzzleProgress {
        if ordinal < self.ordinal || self.is_complete() {
            PuzzleProgress::Done
        } else if ordinal == self.ordinal {
            PuzzleProgress::Current
        } else {
            PuzzleProgress::Pending
        }
    }
}

/// Whole seconds between two instants, rounded down.
pub fn elapsed_secs(from: Millis, to: Millis) -> u32 {
    (to.saturating_sub(from) / 1000)
        .try_into()
        .unwrap_or(u32::MAX)
}

/// Renders a duration like `1m 5s`, or just `42s` under a minute.
pub fn format_elapsed(secs: u32) -> String {
    let mins = secs / 60;
    let secs = secs % 60;
    if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}
