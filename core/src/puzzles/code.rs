use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::fire_completion;
use crate::*;

pub type Code = [CodeColor; CODE_LEN];

/// Feedback for one guess.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Right color in the right slot
    pub exact: u8,
    /// Right color in another slot
    pub color: u8,
}

impl Score {
    pub const fn is_solved(self) -> bool {
        self.exact as usize == CODE_LEN
    }

    /// Player facing summary, e.g. `1 exact, 2 colors correct`.
    pub fn feedback(self) -> String {
        format!(
            "{} exact{}, {} color{} correct",
            self.exact,
            plural(self.exact),
            self.color,
            plural(self.color)
        )
    }
}

const fn plural(count: u8) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// Scores `guess` against `secret` in two passes.
///
/// Exact matches are taken first and consume both slots. Every other guess slot then consumes the first unconsumed
/// secret slot of the same color, so a secret slot is never credited twice.
pub fn score(secret: &Code, guess: &Code) -> Score {
    let mut secret_used = [false; CODE_LEN];
    let mut guess_used = [false; CODE_LEN];
    let mut score = Score::default();

    for (i, (guessed, hidden)) in guess.iter().zip(secret).enumerate() {
        if guessed == hidden {
            score.exact += 1;
            secret_used[i] = true;
            guess_used[i] = true;
        }
    }

    for (guessed, _) in guess.iter().zip(guess_used).filter(|&(_, used)| !used) {
        let found = secret
            .iter()
            .zip(secret_used.iter_mut())
            .find(|(hidden, used)| !**used && *hidden == guessed);
        if let Some((_, used)) = found {
            *used = true;
            score.color += 1;
        }
    }

    score
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub guess: Code,
    pub score: Score,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    NoChange,
    Changed,
}

impl EditOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Puzzle is not taking guesses anymore.
    Ignored,
    /// Wrong guess, the score was reported and the next guess can start.
    Scored(Score),
    Solved,
}

impl SubmitOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Mastermind: find a hidden code of four distinct colors.
///
/// Unlike the timed puzzles a wrong guess keeps the secret, only the guess being entered is reset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CodeBreakingPuzzle {
    timings: Timings,
    secret: Code,
    history: Vec<GuessRecord>,
    current: SmallVec<[CodeColor; CODE_LEN]>,
    phase: Phase,
    timeline: Timeline<CompletionTimer>,
}

impl CodeBreakingPuzzle {
    pub fn new<R: RandomSource>(
        rng: &mut R,
        timings: Timings,
        now: Millis,
        events: &mut Vec<Event>,
    ) -> Self {
        let mut puzzle = Self {
            timings,
            secret: [CodeColor::Red; CODE_LEN],
            history: Vec::new(),
            current: SmallVec::new(),
            phase: Phase::AwaitingInput,
            timeline: Timeline::starting_at(now),
        };
        puzzle.new_game(rng, events);
        puzzle
    }

    pub fn secret(&self) -> &Code {
        &self.secret
    }

    /// Every submitted guess, oldest first.
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    /// Guess being entered.
    pub fn current_guess(&self) -> &[CodeColor] {
        &self.current
    }

    pub fn new_game<R: RandomSource>(&mut self, rng: &mut R, events: &mut Vec<Event>) {
        self.secret = code_secret(rng);
        self.history.clear();
        self.current.clear();
        self.phase = Phase::AwaitingInput;
        log::debug!("code secret: {:?}", self.secret);
        events.push(Event::RoundStarted);
        events.push(Event::InputOpened);
    }

    pub fn append_guess_color(&mut self, color: CodeColor) -> EditOutcome {
        if !self.phase.accepts_input() || self.current.len() >= CODE_LEN {
            return EditOutcome::NoChange;
        }
        self.current.push(color);
        EditOutcome::Changed
    }

    pub fn remove_last_guess_color(&mut self) -> EditOutcome {
        if !self.phase.accepts_input() {
            return EditOutcome::NoChange;
        }
        match self.current.pop() {
            Some(_) => EditOutcome::Changed,
            None => EditOutcome::NoChange,
        }
    }

    pub fn submit_guess(&mut self, events: &mut Vec<Event>) -> Result<SubmitOutcome> {
        if !self.phase.accepts_input() {
            return Ok(SubmitOutcome::Ignored);
        }

        let guess: Code = self
            .current
            .as_slice()
            .try_into()
            .map_err(|_| GameError::IncompleteGuess)?;
        let score = score(&self.secret, &guess);
        log::debug!("guess {:?} scored {:?}", guess, score);

        self.history.push(GuessRecord { guess, score });
        self.current.clear();

        if score.is_solved() {
            self.phase = Phase::Resolving;
            events.push(Notice::success("Code cracked!").into());
            self.timeline
                .schedule(self.timings.completion_delay, CompletionTimer);
            return Ok(SubmitOutcome::Solved);
        }

        events.push(
            Notice::info(score.feedback())
                .lasting(FEEDBACK_NOTICE_DURATION)
                .into(),
        );
        Ok(SubmitOutcome::Scored(score))
    }
}

impl Puzzle for CodeBreakingPuzzle {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::CodeBreaking
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
