use alloc::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::*;

/// Queue of single-shot deferred events on the logical game clock.
///
/// Nothing fires on its own: the owner moves time forward and pops whatever became due, in deadline order. Events
/// sharing a deadline come out in the order they were scheduled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timeline<E> {
    now: Millis,
    scheduled: u64,
    pending: BTreeMap<(Millis, u64), E>,
}

impl<E> Timeline<E> {
    pub fn starting_at(now: Millis) -> Self {
        Self {
            now,
            scheduled: 0,
            pending: BTreeMap::new(),
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Schedules `event` to fire `delay` after the current time and returns its deadline.
    pub fn schedule(&mut self, delay: Millis, event: E) -> Millis {
        let deadline = self.now.saturating_add(delay);
        self.pending.insert((deadline, self.scheduled), event);
        self.scheduled += 1;
        deadline
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.keys().next().map(|&(deadline, _)| deadline)
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pops the earliest event due at or before `until`, moving the clock to its deadline.
    pub fn pop_due(&mut self, until: Millis) -> Option<(Millis, E)> {
        let entry = self.pending.first_entry()?;
        let (deadline, _) = *entry.key();
        if deadline > until {
            return None;
        }
        let event = entry.remove();
        self.now = self.now.max(deadline);
        Some((deadline, event))
    }

    /// Moves the clock to `until` once nothing else is due, time never goes backwards.
    pub fn settle(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }
}
