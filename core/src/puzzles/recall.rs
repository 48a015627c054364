use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum RecallTimer {
    Reveal,
    Conceal,
    Restart,
    Complete,
}

/// What a renderer should draw for a memory grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecallCell {
    #[default]
    Blank,
    /// Target shown during the reveal window
    Lit,
    /// Selected and part of the targets
    Found,
    /// Selected but not a target
    Missed,
}

/// Spatial memory: a few cells light up, the player clicks them from memory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecallPuzzle {
    timings: Timings,
    targets: BTreeSet<CellIndex>,
    selected: BTreeSet<CellIndex>,
    phase: Phase,
    rounds: u32,
    timeline: Timeline<RecallTimer>,
}

impl RecallPuzzle {
    pub fn new<R: RandomSource>(
        rng: &mut R,
        timings: Timings,
        now: Millis,
        events: &mut Vec<Event>,
    ) -> Self {
        let mut puzzle = Self {
            timings,
            targets: BTreeSet::new(),
            selected: BTreeSet::new(),
            phase: Phase::Idle,
            rounds: 0,
            timeline: Timeline::starting_at(now),
        };
        puzzle.new_round(rng, events);
        puzzle
    }

    pub fn targets(&self) -> &BTreeSet<CellIndex> {
        &self.targets
    }

    pub fn selected(&self) -> &BTreeSet<CellIndex> {
        &self.selected
    }

    /// Indicates targets are visible right now
    pub fn is_revealed(&self) -> bool {
        matches!(self.phase, Phase::Revealing)
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Targets found so far in this round.
    pub fn found_count(&self) -> usize {
        self.selected.intersection(&self.targets).count()
    }

    pub fn new_round<R: RandomSource>(&mut self, rng: &mut R, events: &mut Vec<Event>) {
        self.targets = recall_targets(rng);
        self.selected.clear();
        self.phase = Phase::Idle;
        self.rounds += 1;
        log::debug!("recall round {}, targets: {:?}", self.rounds, self.targets);
        events.push(Event::RoundStarted);
        self.timeline
            .schedule(self.timings.recall_lead_in, RecallTimer::Reveal);
    }

    pub fn register_cell_click(
        &mut self,
        index: CellIndex,
        events: &mut Vec<Event>,
    ) -> Result<ClickOutcome> {
        use RecallTimer::*;

        let index = validate_cell(index)?;

        if !self.phase.accepts_input() || self.selected.contains(&index) {
            log::trace!("click on cell {} dropped during {:?}", index, self.phase);
            return Ok(ClickOutcome::Ignored);
        }

        self.selected.insert(index);

        if !self.targets.contains(&index) {
            log::debug!("cell {} is not a target", index);
            self.phase = Phase::Resolving;
            events.push(Notice::error("That wasn't one! Try again").into());
            self.timeline.schedule(self.timings.retry_delay, Restart);
            return Ok(ClickOutcome::Incorrect);
        }

        if self.selected.len() == self.targets.len() {
            self.phase = Phase::Resolving;
            events.push(Notice::success("Excellent memory!").into());
            self.timeline.schedule(self.timings.completion_delay, Complete);
            return Ok(ClickOutcome::RoundComplete);
        }

        Ok(ClickOutcome::Accepted)
    }

    /// Grid as it should be drawn right now, indexed by `[row, column]`.
    pub fn board(&self) -> Array2<RecallCell> {
        let side = usize::from(RECALL_GRID_SIDE);
        let mut board = Array2::default((side, side));
        if self.is_revealed() {
            for &index in &self.targets {
                board[cell_position(index)] = RecallCell::Lit;
            }
        }
        for &index in &self.selected {
            board[cell_position(index)] = if self.targets.contains(&index) {
                RecallCell::Found
            } else {
                RecallCell::Missed
            };
        }
        board
    }

    fn fire<R: RandomSource>(
        &mut self,
        timer: RecallTimer,
        at: Millis,
        rng: &mut R,
        events: &mut Vec<Event>,
    ) -> Option<Millis> {
        use RecallTimer::*;

        match timer {
            Reveal => {
                self.phase = Phase::Revealing;
                events.push(Event::Reveal(true));
                self.timeline.schedule(self.timings.recall_reveal, Conceal);
            }
            Conceal => {
                self.phase = Phase::AwaitingInput;
                events.push(Event::Reveal(false));
                events.push(Event::InputOpened);
            }
            Restart => self.new_round(rng, events),
            Complete => {
                log::debug!("recall solved at {}", at);
                self.phase = Phase::Solved;
                return Some(at);
            }
        }
        None
    }
}

impl Puzzle for RecallPuzzle {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::Recall
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn advance_to<R: RandomSource>(
        &mut self,
        now: Millis,
        rng: &mut R,
        events: &mut Vec<Event>,
    ) -> Option<Millis> {
        while let Some((at, timer)) = self.timeline.pop_due(now) {
            log::trace!("recall timer {:?} at {}", timer, at);
            if let Some(solved_at) = self.fire(timer, at, rng, events) {
                return Some(solved_at);
            }
        }
        self.timeline.settle(now);
        None
    }

    fn next_deadline(&self) -> Option<Millis> {
        self.timeline.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // targets 0, 5, 10, 15 and 3
    const DIAGONAL: [usize; 5] = [0, 5, 10, 15, 3];

    fn revealed_puzzle(script: &[usize]) -> (RecallPuzzle, ScriptedRandom) {
        let mut rng = ScriptedRandom::new(script.iter().copied());
        let mut events = Vec::new();
        let puzzle = RecallPuzzle::new(&mut rng, Timings::standard(), 0, &mut events);
        (puzzle, rng)
    }

    fn ready_puzzle(script: &[usize]) -> (RecallPuzzle, ScriptedRandom) {
        let (mut puzzle, mut rng) = revealed_puzzle(script);
        let mut events = Vec::new();
        puzzle.advance_to(3000, &mut rng, &mut events);
        assert_eq!(events, [Event::Reveal(true), Event::Reveal(false), Event::InputOpened]);
        (puzzle, rng)
    }

    #[test]
    fn targets_are_visible_only_during_the_reveal_window() {
        let (mut puzzle, mut rng) = revealed_puzzle(&DIAGONAL);
        let mut events = Vec::new();
        assert!(!puzzle.is_revealed());

        puzzle.advance_to(500, &mut rng, &mut events);
        assert!(puzzle.is_revealed());
        assert_eq!(puzzle.board()[[1, 1]], RecallCell::Lit);
        assert_eq!(puzzle.board()[[1, 2]], RecallCell::Blank);

        puzzle.advance_to(2999, &mut rng, &mut events);
        assert!(puzzle.is_revealed());
        assert_eq!(
            puzzle.register_cell_click(5, &mut events),
            Ok(ClickOutcome::Ignored)
        );

        puzzle.advance_to(3000, &mut rng, &mut events);
        assert!(!puzzle.is_revealed());
        assert!(puzzle.accepts_input());
        assert_eq!(puzzle.board()[[1, 1]], RecallCell::Blank);
    }

    #[test]
    fn clicking_every_target_completes_the_round() {
        let (mut puzzle, _) = ready_puzzle(&DIAGONAL);
        let mut events = Vec::new();

        for cell in [15, 0, 10, 3] {
            assert_eq!(
                puzzle.register_cell_click(cell, &mut events),
                Ok(ClickOutcome::Accepted)
            );
        }
        assert_eq!(
            puzzle.register_cell_click(5, &mut events),
            Ok(ClickOutcome::RoundComplete)
        );
        assert_eq!(puzzle.found_count(), RECALL_TARGETS);
        assert_eq!(
            events.last().and_then(Event::notice).map(|n| n.message.as_str()),
            Some("Excellent memory!")
        );
    }

    #[test]
    fn clicking_a_selected_cell_again_is_a_no_op() {
        let (mut puzzle, _) = ready_puzzle(&DIAGONAL);
        let mut events = Vec::new();

        puzzle.register_cell_click(10, &mut events).unwrap();
        let outcome = puzzle.register_cell_click(10, &mut events).unwrap();

        assert_eq!(outcome, ClickOutcome::Ignored);
        assert_eq!(puzzle.selected().len(), 1);
    }

    #[test]
    fn wrong_cell_restarts_with_new_targets() {
        let (mut puzzle, mut rng) = ready_puzzle(&DIAGONAL);
        rng.extend([1, 2, 4, 8, 9]);
        let mut events = Vec::new();

        puzzle.register_cell_click(0, &mut events).unwrap();
        let outcome = puzzle.register_cell_click(6, &mut events).unwrap();

        assert_eq!(outcome, ClickOutcome::Incorrect);
        assert_eq!(puzzle.board()[[1, 2]], RecallCell::Missed);
        assert_eq!(puzzle.board()[[0, 0]], RecallCell::Found);
        assert_eq!(
            puzzle.register_cell_click(5, &mut events),
            Ok(ClickOutcome::Ignored)
        );

        puzzle.advance_to(4000, &mut rng, &mut events);

        assert_eq!(puzzle.rounds(), 2);
        assert!(puzzle.selected().is_empty());
        assert_eq!(
            puzzle.targets().iter().copied().collect::<Vec<_>>(),
            [1, 2, 4, 8, 9]
        );
        assert_eq!(puzzle.phase(), Phase::Idle);
    }

    #[test]
    fn cells_outside_the_grid_are_rejected_before_any_change() {
        let (mut puzzle, _) = ready_puzzle(&DIAGONAL);
        let mut events = Vec::new();

        assert_eq!(
            puzzle.register_cell_click(16, &mut events),
            Err(GameError::InvalidInput(InvalidInput::CellOutOfRange(16)))
        );
        assert!(puzzle.selected().is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn completion_fires_after_the_delay() {
        let (mut puzzle, mut rng) = ready_puzzle(&DIAGONAL);
        let mut events = Vec::new();
        for cell in DIAGONAL {
            puzzle.register_cell_click(cell as CellIndex, &mut events).unwrap();
        }

        assert_eq!(puzzle.advance_to(3999, &mut rng, &mut events), None);
        assert_eq!(puzzle.advance_to(4000, &mut rng, &mut events), Some(4000));
        assert!(puzzle.is_solved());
    }
}
