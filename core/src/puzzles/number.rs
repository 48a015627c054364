use alloc::format;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use super::fire_completion;
use crate::*;

/// Click the numbers from 1 upwards, scattered over a shuffled board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumberOrderPuzzle {
    timings: Timings,
    layout: [u8; NUMBER_COUNT as usize],
    next: u8,
    phase: Phase,
    timeline: Timeline<CompletionTimer>,
}

impl NumberOrderPuzzle {
    pub fn new<R: RandomSource>(
        rng: &mut R,
        timings: Timings,
        now: Millis,
        events: &mut Vec<Event>,
    ) -> Self {
        let layout = number_layout(rng);
        log::debug!("number layout: {:?}", layout);
        events.push(Event::RoundStarted);
        events.push(Event::InputOpened);
        Self {
            timings,
            layout,
            next: 1,
            phase: Phase::AwaitingInput,
            timeline: Timeline::starting_at(now),
        }
    }

    /// Numbers in board order.
    pub fn layout(&self) -> &[u8] {
        &self.layout
    }

    /// Number the player has to find next.
    pub fn next_number(&self) -> u8 {
        self.next
    }

    pub fn is_clicked(&self, number: u8) -> bool {
        number < self.next
    }

    pub fn register_number(&mut self, number: u8, events: &mut Vec<Event>) -> Result<ClickOutcome> {
        if !(1..=NUMBER_COUNT).contains(&number) {
            return Err(InvalidInput::NumberOutOfRange(number).into());
        }

        if !self.phase.accepts_input() || self.is_clicked(number) {
            return Ok(ClickOutcome::Ignored);
        }

        if number != self.next {
            events.push(Notice::error(format!("No! You must click {}", self.next)).into());
            return Ok(ClickOutcome::Incorrect);
        }

        self.next += 1;
        if number == NUMBER_COUNT {
            self.phase = Phase::Resolving;
            events.push(Notice::success("Perfect! All numbers in order").into());
            self.timeline
                .schedule(self.timings.completion_delay, CompletionTimer);
            return Ok(ClickOutcome::RoundComplete);
        }

        events.push(
            Notice::success(format!("Correct! Now find {}", self.next))
                .lasting(NUMBER_HINT_DURATION)
                .into(),
        );
        Ok(ClickOutcome::Accepted)
    }
}

impl Puzzle for NumberOrderPuzzle {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::NumberOrder
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn advance_to<R: RandomSource>(
        &mut self,
        now: Millis,
        _rng: &mut R,
        _events: &mut Vec<Event>,
    ) -> Option<Millis> {
        fire_completion(&mut self.timeline, &mut self.phase, now)
    }

    fn next_deadline(&self) -> Option<Millis> {
        self.timeline.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puzzle() -> NumberOrderPuzzle {
        NumberOrderPuzzle::new(
            &mut ScriptedRandom::default(),
            Timings::standard(),
            0,
            &mut Vec::new(),
        )
    }

    #[test]
    fn wrong_number_names_the_expected_one() {
        let mut puzzle = puzzle();
        let mut events = Vec::new();

        assert_eq!(puzzle.register_number(3, &mut events), Ok(ClickOutcome::Incorrect));
        assert_eq!(
            events,
            [Event::Notice(Notice::error("No! You must click 1"))]
        );
        assert_eq!(puzzle.next_number(), 1);
    }

    #[test]
    fn right_number_hints_the_following_one() {
        let mut puzzle = puzzle();
        let mut events = Vec::new();

        assert_eq!(puzzle.register_number(1, &mut events), Ok(ClickOutcome::Accepted));
        assert_eq!(
            events,
            [Event::Notice(
                Notice::success("Correct! Now find 2").lasting(NUMBER_HINT_DURATION)
            )]
        );
        assert!(puzzle.is_clicked(1));
        assert_eq!(puzzle.register_number(1, &mut events), Ok(ClickOutcome::Ignored));
    }

    #[test]
    fn all_numbers_in_order_complete_the_puzzle() {
        let mut puzzle = puzzle();
        let mut events = Vec::new();
        for number in 1..NUMBER_COUNT {
            puzzle.register_number(number, &mut events).unwrap();
        }

        assert_eq!(
            puzzle.register_number(NUMBER_COUNT, &mut events),
            Ok(ClickOutcome::RoundComplete)
        );
        let mut rng = ScriptedRandom::default();
        assert_eq!(puzzle.advance_to(1000, &mut rng, &mut events), Some(1000));
        assert!(puzzle.is_solved());
    }

    #[test]
    fn numbers_off_the_board_are_invalid() {
        let mut puzzle = puzzle();

        assert_eq!(
            puzzle.register_number(0, &mut Vec::new()),
            Err(GameError::InvalidInput(InvalidInput::NumberOutOfRange(0)))
        );
        assert_eq!(
            puzzle.register_number(10, &mut Vec::new()),
            Err(GameError::InvalidInput(InvalidInput::NumberOutOfRange(10)))
        );
    }
}
