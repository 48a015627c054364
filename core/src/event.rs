use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

/// How long the wrong-guess feedback of the color code puzzle stays on screen.
pub const FEEDBACK_NOTICE_DURATION: Millis = 3000;

/// How long the swap prompt of the sorting puzzle stays on screen.
pub const SWAP_PROMPT_DURATION: Millis = 2000;

/// How long the "now find N" hint of the number puzzle stays on screen.
pub const NUMBER_HINT_DURATION: Millis = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// Short-lived message for the player, how it is shown is up to the front end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Requested display time, `None` leaves it to the front end.
    pub duration: Option<Millis>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn lasting(mut self, duration: Millis) -> Self {
        self.duration = Some(duration);
        self
    }

    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            duration: None,
        }
    }
}

/// Everything observable that happened while handling input or moving time forward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Notice(Notice),
    /// Puzzle with this ordinal became the active one.
    PuzzleStarted { ordinal: u8 },
    /// Puzzle with this ordinal was credited as solved.
    PuzzleSolved { ordinal: u8 },
    /// Last puzzle solved, final time is frozen.
    GameCompleted { elapsed_secs: u32 },
    /// Fresh target generated for the active puzzle.
    RoundStarted,
    /// Token lit (or unlit with `None`) while a sequence is played back.
    Playback(Option<SequenceToken>),
    /// Short feedback flash of a clicked token, `None` when it fades.
    Flash(Option<SequenceToken>),
    /// Memory targets shown (`true`) or hidden (`false`).
    Reveal(bool),
    /// Active puzzle started accepting player input.
    InputOpened,
}

impl Event {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Self::Notice(notice) => Some(notice),
            _ => None,
        }
    }
}

impl From<Notice> for Event {
    fn from(notice: Notice) -> Self {
        Self::Notice(notice)
    }
}
