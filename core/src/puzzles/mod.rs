use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;
pub use code::*;
pub use number::*;
pub use recall::*;
pub use sequence::*;
pub use sort::*;

mod code;
mod number;
mod recall;
mod sequence;
mod sort;

/// Where a puzzle is within a round.
///
/// Valid transitions:
/// - Idle -> Revealing -> AwaitingInput (timed puzzles only)
/// - AwaitingInput -> Resolving
/// - Resolving -> Idle (wrong attempt, new round)
/// - Resolving -> Solved
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Round generated, waiting for the reveal to begin
    Idle,
    /// Target being shown to the player
    Revealing,
    /// Player moves are accepted
    AwaitingInput,
    /// Attempt resolved, a restart or completion is pending
    Resolving,
    /// Completion was reported, nothing else will happen
    Solved,
}

impl Phase {
    pub const fn accepts_input(self) -> bool {
        matches!(self, Self::AwaitingInput)
    }
}

/// Result of a single click on a pad, cell or number.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Dropped because of the current phase or because it was already clicked.
    Ignored,
    Accepted,
    /// Wrong click, the puzzle will react to it.
    Incorrect,
    /// Click completed the puzzle, completion follows after a delay.
    RoundComplete,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Behavior shared by every puzzle engine.
pub trait Puzzle {
    fn kind(&self) -> PuzzleKind;

    fn phase(&self) -> Phase;

    /// Fires every timer due up to `now`. Returns the instant the puzzle got solved, this happens only once per
    /// instance.
    fn advance_to<R: RandomSource>(
        &mut self,
        now: Millis,
        rng: &mut R,
        events: &mut Vec<Event>,
    ) -> Option<Millis>;

    /// Earliest pending timer, if any.
    fn next_deadline(&self) -> Option<Millis>;

    fn accepts_input(&self) -> bool {
        self.phase().accepts_input()
    }

    fn is_solved(&self) -> bool {
        matches!(self.phase(), Phase::Solved)
    }
}

/// The only timer of puzzles that have no reveal phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionTimer;

/// Fires a pending completion, shared by the untimed puzzles.
fn fire_completion(
    timeline: &mut Timeline<CompletionTimer>,
    phase: &mut Phase,
    now: Millis,
) -> Option<Millis> {
    if let Some((at, CompletionTimer)) = timeline.pop_due(now) {
        log::debug!("completion fired at {}", at);
        *phase = Phase::Solved;
        return Some(at);
    }
    timeline.settle(now);
    None
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PuzzleKind {
    Sequence,
    NumberOrder,
    Recall,
    SwapSort,
    CodeBreaking,
}

impl PuzzleKind {
    pub const fn label(self) -> &'static str {
        use PuzzleKind::*;
        match self {
            Sequence => "Color Sequence",
            NumberOrder => "Number Pattern",
            Recall => "Memory Clicks",
            SwapSort => "Sorting",
            CodeBreaking => "Color Code",
        }
    }

    /// Builds a fresh engine of this kind, its clock starting at `now`.
    pub fn spawn<R: RandomSource>(
        self,
        rng: &mut R,
        timings: Timings,
        now: Millis,
        events: &mut Vec<Event>,
    ) -> ActivePuzzle {
        use PuzzleKind::*;
        match self {
            Sequence => ActivePuzzle::Sequence(SequencePuzzle::new(rng, timings, now, events)),
            NumberOrder => {
                ActivePuzzle::NumberOrder(NumberOrderPuzzle::new(rng, timings, now, events))
            }
            Recall => ActivePuzzle::Recall(RecallPuzzle::new(rng, timings, now, events)),
            SwapSort => ActivePuzzle::SwapSort(SwapSortPuzzle::new(rng, timings, now, events)),
            CodeBreaking => {
                ActivePuzzle::CodeBreaking(CodeBreakingPuzzle::new(rng, timings, now, events))
            }
        }
    }
}

impl fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Engine of whichever puzzle is being played.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ActivePuzzle {
    Sequence(SequencePuzzle),
    NumberOrder(NumberOrderPuzzle),
    Recall(RecallPuzzle),
    SwapSort(SwapSortPuzzle),
    CodeBreaking(CodeBreakingPuzzle),
}

impl Puzzle for ActivePuzzle {
    fn kind(&self) -> PuzzleKind {
        match self {
            Self::Sequence(puzzle) => puzzle.kind(),
            Self::NumberOrder(puzzle) => puzzle.kind(),
            Self::Recall(puzzle) => puzzle.kind(),
            Self::SwapSort(puzzle) => puzzle.kind(),
            Self::CodeBreaking(puzzle) => puzzle.kind(),
        }
    }

    fn phase(&self) -> Phase {
        match self {
            Self::Sequence(puzzle) => puzzle.phase(),
            Self::NumberOrder(puzzle) => puzzle.phase(),
            Self::Recall(puzzle) => puzzle.phase(),
            Self::SwapSort(puzzle) => puzzle.phase(),
            Self::CodeBreaking(puzzle) => puzzle.phase(),
        }
    }

    fn advance_to<R: RandomSource>(
        &mut self,
        now: Millis,
        rng: &mut R,
        events: &mut Vec<Event>,
    ) -> Option<Millis> {
        match self {
            Self::Sequence(puzzle) => puzzle.advance_to(now, rng, events),
            Self::NumberOrder(puzzle) => puzzle.advance_to(now, rng, events),
            Self::Recall(puzzle) => puzzle.advance_to(now, rng, events),
            Self::SwapSort(puzzle) => puzzle.advance_to(now, rng, events),
            Self::CodeBreaking(puzzle) => puzzle.advance_to(now, rng, events),
        }
    }

    fn next_deadline(&self) -> Option<Millis> {
        match self {
            Self::Sequence(puzzle) => puzzle.next_deadline(),
            Self::NumberOrder(puzzle) => puzzle.next_deadline(),
            Self::Recall(puzzle) => puzzle.next_deadline(),
            Self::SwapSort(puzzle) => puzzle.next_deadline(),
            Self::CodeBreaking(puzzle) => puzzle.next_deadline(),
        }
    }
}
