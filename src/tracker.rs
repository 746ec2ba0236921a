//! Next-event tracking over an externally driven clock.
//!
//! The tracker holds no timers and spawns nothing: the caller samples "now"
//! at whatever cadence it likes and feeds it in through [`NextEventTracker::tick`].
//! Stopping the ticks is the only cancellation there is. The tracker is
//! deliberately not thread-safe; it expects exactly one driver.

use crate::error::{Error, Result};
use crate::types::{DailySchedule, NextEventState};
use chrono::{DateTime, FixedOffset};

/// What the tracker currently knows about the upcoming event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackerState {
    /// No tick has been processed yet.
    Idle,
    /// An upcoming instant is resolved.
    Resolved(NextEventState),
    /// Today's schedule is spent and no next-day schedule was supplied.
    Exhausted,
}

#[derive(Debug, Default)]
pub struct NextEventTracker {
    state: Option<NextEventState>,
    exhausted: bool,
}

impl NextEventTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-resolve the upcoming instant for `now`.
    ///
    /// Scans today's instants in order for the first one strictly after
    /// `now`; when today is spent it rolls into `next_day` if the caller
    /// supplied it. Looking further ahead is the caller's job: it must hand
    /// over the following day's schedule before rollover, or the tick fails
    /// with [`Error::NoUpcomingInstant`].
    ///
    /// `remaining` is recomputed from scratch on every tick, so a late or
    /// missed tick can never surface a negative countdown.
    pub fn tick(
        &mut self,
        now: DateTime<FixedOffset>,
        today: &DailySchedule,
        next_day: Option<&DailySchedule>,
    ) -> Result<NextEventState> {
        let upcoming = today
            .first_after(now)
            .or_else(|| next_day.and_then(|schedule| schedule.first_after(now)));

        match upcoming {
            Some(instant) => {
                let state = NextEventState {
                    as_of: now,
                    upcoming: instant,
                    remaining: instant.timestamp - now,
                };
                self.state = Some(state);
                self.exhausted = false;
                Ok(state)
            }
            None => {
                self.state = None;
                self.exhausted = true;
                Err(Error::NoUpcomingInstant)
            }
        }
    }

    pub fn state(&self) -> TrackerState {
        match (self.state, self.exhausted) {
            (Some(state), _) => TrackerState::Resolved(state),
            (None, true) => TrackerState::Exhausted,
            (None, false) => TrackerState::Idle,
        }
    }
}
