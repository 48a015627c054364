use alloc::vec::Vec;
use core::mem;
use serde::{Deserialize, Serialize};

use crate::*;

/// Static description of one puzzle slot of the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PuzzleDescriptor {
    /// 1-based position in the game
    pub ordinal: u8,
    pub label: &'static str,
    /// Factory of the engine for this slot
    pub kind: PuzzleKind,
}

impl PuzzleDescriptor {
    const fn new(ordinal: u8, kind: PuzzleKind) -> Self {
        Self {
            ordinal,
            label: kind.label(),
            kind,
        }
    }

    /// Descriptor for a 1-based ordinal, clamped to the valid range.
    pub fn by_ordinal(ordinal: u8) -> &'static Self {
        let index = usize::from(ordinal.clamp(1, PUZZLE_COUNT) - 1);
        &PUZZLES[index]
    }
}

/// The puzzles of a game, in the order they are played.
pub const PUZZLES: [PuzzleDescriptor; PUZZLE_COUNT as usize] = [
    PuzzleDescriptor::new(1, PuzzleKind::Sequence),
    PuzzleDescriptor::new(2, PuzzleKind::NumberOrder),
    PuzzleDescriptor::new(3, PuzzleKind::Recall),
    PuzzleDescriptor::new(4, PuzzleKind::SwapSort),
    PuzzleDescriptor::new(5, PuzzleKind::CodeBreaking),
];

/// A single player action, addressed to whichever puzzle is active.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerInput {
    Token(SequenceToken),
    Cell(CellIndex),
    Number(u8),
    Slot(u8),
    AddColor(CodeColor),
    RemoveColor,
    Submit,
}

impl PlayerInput {
    pub const fn name(self) -> &'static str {
        use PlayerInput::*;
        match self {
            Token(_) => "color pad",
            Cell(_) => "grid cell",
            Number(_) => "number",
            Slot(_) => "slot",
            AddColor(_) => "code color",
            RemoveColor => "remove color",
            Submit => "submit",
        }
    }
}

/// Runs the five puzzles in order and keeps time.
///
/// Time is the logical clock in milliseconds: front ends call [`Game::advance_to`] with real time, tests jump straight
/// to the instants they care about. Everything that happens is queued as [`Event`]s, see [`Game::take_events`].
#[derive(Clone, Debug)]
pub struct Game<R> {
    rng: R,
    timings: Timings,
    session: GameSession,
    active: Option<ActivePuzzle>,
    now: Millis,
    events: Vec<Event>,
}

impl<R: RandomSource> Game<R> {
    pub fn new(rng: R, timings: Timings) -> Self {
        Self::starting_at(rng, timings, 0)
    }

    pub fn starting_at(rng: R, timings: Timings, now: Millis) -> Self {
        let mut game = Self {
            rng,
            timings,
            session: GameSession::new(now),
            active: None,
            now,
            events: Vec::new(),
        };
        game.start();
        game
    }

    /// Throws the whole game away and starts a new one from the current instant.
    ///
    /// Undrained events are kept, the random source carries on where it was.
    pub fn restart(&mut self) {
        log::debug!("restarting game at {}", self.now);
        self.start();
    }

    fn start(&mut self) {
        let descriptor = PuzzleDescriptor::by_ordinal(1);
        self.session = GameSession::new(self.now);
        self.events.push(Event::PuzzleStarted {
            ordinal: descriptor.ordinal,
        });
        self.active = Some(descriptor.kind.spawn(
            &mut self.rng,
            self.timings,
            self.now,
            &mut self.events,
        ));
        log::debug!("game started at {}", self.now);
        // zero delays fire right away
        self.advance_to(self.now);
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn current_puzzle(&self) -> &'static PuzzleDescriptor {
        PuzzleDescriptor::by_ordinal(self.session.ordinal())
    }

    /// Engine of the current puzzle, `None` once the game is complete.
    pub fn active_puzzle(&self) -> Option<&ActivePuzzle> {
        self.active.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    /// Frozen total time in whole seconds, only available once complete.
    pub fn elapsed_secs(&self) -> Option<u32> {
        self.session.elapsed_secs()
    }

    pub fn progress(&self) -> [PuzzleProgress; PUZZLE_COUNT as usize] {
        PUZZLES.map(|descriptor| self.session.progress_of(descriptor.ordinal))
    }

    pub fn accepts_input(&self) -> bool {
        self.active.as_ref().is_some_and(Puzzle::accepts_input)
    }

    /// Earliest instant at which something is scheduled to happen.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.active.as_ref().and_then(Puzzle::next_deadline)
    }

    /// Drains every event produced since the last call.
    pub fn take_events(&mut self) -> Vec<Event> {
        mem::take(&mut self.events)
    }

    /// Moves the clock forward to `now`, firing due timers and crossing into following puzzles as they complete.
    pub fn advance_to(&mut self, now: Millis) {
        let now = now.max(self.now);
        while let Some(puzzle) = self.active.as_mut() {
            match puzzle.advance_to(now, &mut self.rng, &mut self.events) {
                Some(solved_at) => {
                    self.now = solved_at;
                    self.on_puzzle_complete();
                }
                None => break,
            }
        }
        self.now = now;
    }

    pub fn advance_by(&mut self, elapsed: Millis) {
        self.advance_to(self.now.saturating_add(elapsed));
    }

    /// Credits the active puzzle as completed and moves on.
    ///
    /// Only honored when the active puzzle actually reached its solved state, so repeated or stray calls leave the
    /// game untouched.
    pub fn on_puzzle_complete(&mut self) {
        match &self.active {
            Some(puzzle) if puzzle.is_solved() => {}
            Some(puzzle) => {
                log::warn!("ignoring completion of unsolved {} puzzle", puzzle.kind());
                return;
            }
            None => {
                log::debug!("ignoring completion after the game ended");
                return;
            }
        }

        let ordinal = self.session.ordinal();
        self.events.push(Event::PuzzleSolved { ordinal });
        match self.session.complete_puzzle(self.now) {
            SessionStep::Next(next) => {
                let descriptor = PuzzleDescriptor::by_ordinal(next);
                log::debug!("puzzle {} solved, starting {}", ordinal, descriptor.label);
                self.events.push(Event::PuzzleStarted { ordinal: next });
                self.active = Some(descriptor.kind.spawn(
                    &mut self.rng,
                    self.timings,
                    self.now,
                    &mut self.events,
                ));
            }
            SessionStep::Finished(elapsed_secs) => {
                log::debug!("game completed in {}s", elapsed_secs);
                self.active = None;
                self.events.push(Event::GameCompleted { elapsed_secs });
            }
            SessionStep::AlreadyFinished => {
                self.active = None;
            }
        }
    }

    /// Routes player input to the active puzzle.
    ///
    /// Returns whether the puzzle changed. Input dropped by the puzzle's phase, such as a click during playback, is
    /// not an error and reports no change.
    pub fn input(&mut self, input: PlayerInput) -> Result<bool> {
        use PlayerInput::*;

        let Some(puzzle) = self.active.as_mut() else {
            return Err(GameError::GameCompleted);
        };
        let events = &mut self.events;

        let changed = match (puzzle, input) {
            (ActivePuzzle::Sequence(puzzle), Token(token)) => {
                puzzle.register_click(token, events).has_update()
            }
            (ActivePuzzle::NumberOrder(puzzle), Number(number)) => {
                puzzle.register_number(number, events)?.has_update()
            }
            (ActivePuzzle::Recall(puzzle), Cell(index)) => {
                puzzle.register_cell_click(index, events)?.has_update()
            }
            (ActivePuzzle::SwapSort(puzzle), Slot(slot)) => {
                puzzle.select_slot(slot, events)?.has_update()
            }
            (ActivePuzzle::CodeBreaking(puzzle), AddColor(color)) => {
                puzzle.append_guess_color(color).has_update()
            }
            (ActivePuzzle::CodeBreaking(puzzle), RemoveColor) => {
                puzzle.remove_last_guess_color().has_update()
            }
            (ActivePuzzle::CodeBreaking(puzzle), Submit) => {
                puzzle.submit_guess(events)?.has_update()
            }
            (puzzle, input) => {
                return Err(InvalidInput::WrongPuzzle {
                    input: input.name(),
                    puzzle: puzzle.kind(),
                }
                .into());
            }
        };
        if !changed {
            log::trace!("{:?} changed nothing", input);
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_game() -> Game<ScriptedRandom> {
        Game::new(ScriptedRandom::default(), Timings::instant())
    }

    #[test]
    fn descriptors_are_numbered_in_play_order() {
        for (i, descriptor) in PUZZLES.iter().enumerate() {
            assert_eq!(usize::from(descriptor.ordinal), i + 1);
        }
        assert_eq!(PuzzleDescriptor::by_ordinal(3).kind, PuzzleKind::Recall);
        assert_eq!(PuzzleDescriptor::by_ordinal(5).label, "Color Code");
    }

    #[test]
    fn game_starts_on_the_sequence_puzzle() {
        let mut game = Game::new(ScriptedRandom::default(), Timings::standard());

        assert_eq!(game.current_puzzle().ordinal, 1);
        assert_eq!(game.current_puzzle().kind, PuzzleKind::Sequence);
        assert!(!game.is_complete());
        assert_eq!(game.elapsed_secs(), None);
        assert!(!game.accepts_input());
        assert_eq!(game.next_deadline(), Some(500));
        assert_eq!(
            game.take_events(),
            [Event::PuzzleStarted { ordinal: 1 }, Event::RoundStarted]
        );
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn input_for_another_puzzle_is_rejected() {
        let mut game = instant_game();

        assert_eq!(
            game.input(PlayerInput::Cell(3)),
            Err(GameError::InvalidInput(InvalidInput::WrongPuzzle {
                input: "grid cell",
                puzzle: PuzzleKind::Sequence,
            }))
        );
    }

    #[test]
    fn stray_completion_is_ignored() {
        let mut game = instant_game();
        assert!(game.accepts_input());

        game.on_puzzle_complete();
        game.on_puzzle_complete();

        assert_eq!(game.current_puzzle().ordinal, 1);
        assert_eq!(game.progress()[0], PuzzleProgress::Current);
    }

    #[test]
    fn solving_the_sequence_moves_on_to_the_number_puzzle() {
        let mut game = instant_game();
        game.take_events();

        for token in SequenceToken::ALL.into_iter().take(SEQUENCE_LEN) {
            // scripted draws count up from zero, so the first target is in pad order
            game.input(PlayerInput::Token(token)).unwrap();
        }
        game.advance_by(0);

        assert_eq!(game.current_puzzle().kind, PuzzleKind::NumberOrder);
        assert_eq!(
            game.progress(),
            [
                PuzzleProgress::Done,
                PuzzleProgress::Current,
                PuzzleProgress::Pending,
                PuzzleProgress::Pending,
                PuzzleProgress::Pending,
            ]
        );
        let events = game.take_events();
        assert!(events.contains(&Event::PuzzleSolved { ordinal: 1 }));
        assert!(events.contains(&Event::PuzzleStarted { ordinal: 2 }));
    }

    #[test]
    fn restart_recreates_the_game_at_the_current_instant() {
        let mut game = Game::new(ScriptedRandom::default(), Timings::instant());
        for token in SequenceToken::ALL {
            game.input(PlayerInput::Token(token)).unwrap();
        }
        game.advance_to(7_000);
        assert_eq!(game.current_puzzle().ordinal, 2);
        game.take_events();

        game.restart();

        assert_eq!(game.now(), 7_000);
        assert_eq!(game.session().started_at(), 7_000);
        assert_eq!(game.current_puzzle().ordinal, 1);
        assert_eq!(game.progress()[0], PuzzleProgress::Current);
        assert_eq!(
            game.take_events()[..2],
            [Event::PuzzleStarted { ordinal: 1 }, Event::RoundStarted]
        );
        assert!(game.accepts_input());
    }

    #[test]
    fn input_reports_whether_the_puzzle_changed() {
        let mut game = Game::new(ScriptedRandom::default(), Timings::standard());

        // still in the lead-in
        assert_eq!(game.input(PlayerInput::Token(SequenceToken::Blue)), Ok(false));
        game.advance_to(4_500);
        assert_eq!(game.input(PlayerInput::Token(SequenceToken::Blue)), Ok(true));
        let Some(ActivePuzzle::Sequence(puzzle)) = game.active_puzzle() else {
            panic!("expected the sequence puzzle");
        };
        assert_eq!(puzzle.progress(), [SequenceToken::Blue]);
    }

    #[test]
    fn input_after_completion_is_an_error() {
        let mut game = instant_game();
        game.active = None;

        assert_eq!(game.input(PlayerInput::Submit), Err(GameError::GameCompleted));
    }
}
