use std::io::{self, BufRead, Write};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use quintet_core::{Game, Millis, RandomSource};
use web_time::Instant;

use crate::command::{Command, HELP};
use crate::render;

/// A line typed by the player with the instant it arrived.
pub type Line = (Millis, String);

/// Where the game time comes from.
pub trait Clock {
    /// Milliseconds since the clock was created.
    fn now(&self) -> Millis;
}

/// Real time, used when a person is playing.
#[derive(Copy, Clone, Debug)]
pub struct WallClock {
    start: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now(&self) -> Millis {
        self.start.elapsed().as_millis().try_into().unwrap_or(Millis::MAX)
    }
}

/// Stamps every line of `input` with its arrival and sends it on.
///
/// Meant to run on its own thread so lines are timed when typed, not when the game gets to them. Returns once the
/// input ends or the driver hangs up.
pub fn read_lines(input: impl BufRead, clock: impl Clock, lines: Sender<Line>) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if lines.send((clock.now(), line)).is_err() {
            break;
        }
    }
    Ok(())
}

/// Plays timestamped command lines against a [`Game`].
///
/// The game is moved to each line's arrival before the line is applied, so whatever the player typed while the
/// puzzle was locked (playback, reveal, pending restart or completion) is dropped by the puzzle instead of piling up
/// for the next round. Between lines the driver waits for the next deadline and prints what happens.
pub struct Driver<R, C> {
    game: Game<R>,
    clock: C,
}

impl<R: RandomSource, C: Clock> Driver<R, C> {
    pub fn new(game: Game<R>, clock: C) -> Self {
        Self { game, clock }
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn run(&mut self, lines: &Receiver<Line>, mut out: impl Write) -> io::Result<()> {
        writeln!(out, "type `help` for the list of commands")?;
        self.flush_events(&mut out)?;
        self.draw(&mut out)?;

        loop {
            let received = match self.game.next_deadline() {
                Some(deadline) => {
                    let wait = deadline.saturating_sub(self.clock.now());
                    match lines.recv_timeout(Duration::from_millis(wait)) {
                        Ok(line) => Some(line),
                        Err(RecvTimeoutError::Timeout) => {
                            self.game.advance_to(deadline);
                            if self.flush_events(&mut out)? {
                                self.draw(&mut out)?;
                            }
                            continue;
                        }
                        Err(RecvTimeoutError::Disconnected) => None,
                    }
                }
                None => lines.recv().ok(),
            };
            let Some((arrival, line)) = received else {
                break;
            };

            self.game.advance_to(arrival);
            let mut changed = self.flush_events(&mut out)?;

            match line.parse::<Command>() {
                Ok(Command::Play(input)) => match self.game.input(input) {
                    Ok(true) => changed = true,
                    Ok(false) => log::debug!("{:?} dropped at {}", input, arrival),
                    Err(err) => {
                        log::debug!("rejected {:?}: {}", input, err);
                        writeln!(out, "[!!] {}", err)?;
                    }
                },
                Ok(Command::Refresh) => changed = true,
                Ok(Command::Restart) => {
                    self.game.restart();
                    changed = true;
                }
                Ok(Command::Help) => writeln!(out, "{}", HELP)?,
                Ok(Command::Quit) => break,
                Err(err) => writeln!(out, "[!!] {}", err)?,
            }

            changed |= self.flush_events(&mut out)?;
            if changed {
                self.draw(&mut out)?;
            }
        }
        out.flush()
    }

    /// Prints pending events, returns whether there were any.
    fn flush_events(&mut self, out: &mut impl Write) -> io::Result<bool> {
        let events = self.game.take_events();
        for event in &events {
            log::trace!("event {:?}", event);
            if let Some(line) = render::event_line(event) {
                writeln!(out, "{}", line)?;
            }
        }
        out.flush()?;
        Ok(!events.is_empty())
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", render::progress_line(&self.game.progress()))?;
        match self.game.active_puzzle() {
            Some(puzzle) => {
                writeln!(out, "{}", render::puzzle_view(puzzle))?;
                if self.game.accepts_input() {
                    write!(out, "> ")?;
                }
            }
            None => writeln!(out, "game over, `restart` or `quit`")?,
        }
        out.flush()
    }
}
