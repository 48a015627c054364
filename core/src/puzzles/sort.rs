use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use super::fire_completion;
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SwapOutcome {
    Ignored,
    /// First slot picked, waiting for the second one.
    Selected,
    /// Same slot picked twice.
    Cancelled,
    Swapped,
    /// Swap left the row in ascending order.
    Sorted,
}

impl SwapOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Put a shuffled row in ascending order by swapping pairs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwapSortPuzzle {
    timings: Timings,
    order: [u8; SORT_LEN],
    selected: Option<u8>,
    phase: Phase,
    timeline: Timeline<CompletionTimer>,
}

impl SwapSortPuzzle {
    pub fn new<R: RandomSource>(
        rng: &mut R,
        timings: Timings,
        now: Millis,
        events: &mut Vec<Event>,
    ) -> Self {
        let order = sort_order(rng);
        log::debug!("sort order: {:?}", order);
        events.push(Event::RoundStarted);
        events.push(Event::InputOpened);
        Self {
            timings,
            order,
            selected: None,
            phase: Phase::AwaitingInput,
            timeline: Timeline::starting_at(now),
        }
    }

    pub fn order(&self) -> &[u8] {
        &self.order
    }

    pub fn selected(&self) -> Option<u8> {
        self.selected
    }

    pub fn is_sorted(&self) -> bool {
        self.order
            .iter()
            .enumerate()
            .all(|(i, &number)| usize::from(number) == i + 1)
    }

    pub fn select_slot(&mut self, slot: u8, events: &mut Vec<Event>) -> Result<SwapOutcome> {
        if usize::from(slot) >= SORT_LEN {
            return Err(InvalidInput::SlotOutOfRange(slot).into());
        }

        if !self.phase.accepts_input() {
            return Ok(SwapOutcome::Ignored);
        }

        match self.selected.take() {
            None => {
                self.selected = Some(slot);
                events.push(
                    Notice::info("Now select another number to swap")
                        .lasting(SWAP_PROMPT_DURATION)
                        .into(),
                );
                Ok(SwapOutcome::Selected)
            }
            Some(first) if first == slot => {
                events.push(Notice::info("Selection cancelled").into());
                Ok(SwapOutcome::Cancelled)
            }
            Some(first) => {
                self.order.swap(first.into(), slot.into());
                log::trace!("swapped slots {} and {}: {:?}", first, slot, self.order);
                if !self.is_sorted() {
                    return Ok(SwapOutcome::Swapped);
                }
                self.phase = Phase::Resolving;
                events.push(Notice::success("Perfect! Sorting complete").into());
                self.timeline
                    .schedule(self.timings.completion_delay, CompletionTimer);
                Ok(SwapOutcome::Sorted)
            }
        }
    }
}

impl Puzzle for SwapSortPuzzle {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::SwapSort
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
