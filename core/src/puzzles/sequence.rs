use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum SequenceTimer {
    BeginPlayback,
    Light(u8),
    Unlight(u8),
    EndFlash,
    Restart,
    Complete,
}

/// Simon-says: a sequence of pads is played back, the player repeats it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequencePuzzle {
    timings: Timings,
    target: SequenceTarget,
    progress: SequenceTarget,
    phase: Phase,
    lit: Option<SequenceToken>,
    rounds: u32,
    timeline: Timeline<SequenceTimer>,
}

impl SequencePuzzle {
    pub fn new<R: RandomSource>(
        rng: &mut R,
        timings: Timings,
        now: Millis,
        events: &mut Vec<Event>,
    ) -> Self {
        let mut puzzle = Self {
            timings,
            target: SequenceTarget::new(),
            progress: SequenceTarget::new(),
            phase: Phase::Idle,
            lit: None,
            rounds: 0,
            timeline: Timeline::starting_at(now),
        };
        puzzle.new_round(rng, events);
        puzzle
    }

    pub fn target(&self) -> &[SequenceToken] {
        &self.target
    }

    /// Tokens entered by the player in the current round.
    pub fn progress(&self) -> &[SequenceToken] {
        &self.progress
    }

    /// Token currently lit, either by playback or by a click flash.
    pub fn lit(&self) -> Option<SequenceToken> {
        self.lit
    }

    /// Indicates the target is still being played back and clicks are dropped
    pub fn is_playing_back(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Revealing)
    }

    /// How many targets were generated so far, including the current one.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Draws a new target and schedules its playback, progress is discarded.
    pub fn new_round<R: RandomSource>(&mut self, rng: &mut R, events: &mut Vec<Event>) {
        self.target = sequence_target(rng);
        self.progress.clear();
        self.lit = None;
        self.phase = Phase::Idle;
        self.rounds += 1;
        log::debug!("sequence round {}, target: {:?}", self.rounds, self.target);
        events.push(Event::RoundStarted);
        self.timeline
            .schedule(self.timings.sequence_lead_in, SequenceTimer::BeginPlayback);
    }

    pub fn register_click(&mut self, token: SequenceToken, events: &mut Vec<Event>) -> ClickOutcome {
        use SequenceTimer::*;

        if !self.phase.accepts_input() {
            log::trace!("click on {} dropped during {:?}", token, self.phase);
            return ClickOutcome::Ignored;
        }

        let position = self.progress.len();
        self.progress.push(token);
        self.lit = Some(token);
        events.push(Event::Flash(Some(token)));
        self.timeline.schedule(self.timings.click_flash, EndFlash);

        if self.target[position] != token {
            log::debug!(
                "sequence mismatch at {}, expected {} but got {}",
                position,
                self.target[position],
                token
            );
            self.phase = Phase::Resolving;
            events.push(Notice::error("Incorrect! Try again").into());
            self.timeline.schedule(self.timings.retry_delay, Restart);
            return ClickOutcome::Incorrect;
        }

        if self.progress.len() == self.target.len() {
            self.phase = Phase::Resolving;
            events.push(Notice::success("Perfect! Sequence complete").into());
            self.timeline.schedule(self.timings.completion_delay, Complete);
            return ClickOutcome::RoundComplete;
        }

        ClickOutcome::Accepted
    }

    fn fire<R: RandomSource>(
        &mut self,
        timer: SequenceTimer,
        at: Millis,
        rng: &mut R,
        events: &mut Vec<Event>,
    ) -> Option<Millis> {
        use SequenceTimer::*;

        match timer {
            BeginPlayback => {
                self.phase = Phase::Revealing;
                self.timeline.schedule(self.timings.sequence_gap, Light(0));
            }
            Light(step) => {
                let token = self.target[usize::from(step)];
                self.lit = Some(token);
                events.push(Event::Playback(Some(token)));
                self.timeline
                    .schedule(self.timings.sequence_highlight, Unlight(step));
            }
            Unlight(step) => {
                self.lit = None;
                events.push(Event::Playback(None));
                if usize::from(step) + 1 < self.target.len() {
                    self.timeline
                        .schedule(self.timings.sequence_gap, Light(step + 1));
                } else {
                    self.phase = Phase::AwaitingInput;
                    events.push(Event::InputOpened);
                }
            }
            EndFlash => {
                // a late flash must not turn off a pad lit by playback
                if !self.is_playing_back() && self.lit.take().is_some() {
                    events.push(Event::Flash(None));
                }
            }
            Restart => self.new_round(rng, events),
            Complete => {
                log::debug!("sequence solved at {}", at);
                self.phase = Phase::Solved;
                return Some(at);
            }
        }
        None
    }
}

impl Puzzle for SequencePuzzle {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::Sequence
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
            log::trace!("sequence timer {:?} at {}", timer, at);
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
