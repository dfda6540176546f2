//! A repeating timer that can be restarted at a new period without letting
//! firings scheduled under the old period leak through
use std::time::{Duration, Instant};

/// A single firing of a [`Ticker`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Tick {
    generation: u64,
    at: Instant,
}

impl Tick {
    /// The instant at which the tick fired
    pub(crate) fn at(self) -> Instant {
        self.at
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Ticker {
    period: Duration,

    /// Incremented whenever the schedule is started or stopped.  Ticks
    /// carrying an older generation are stale.
    generation: u64,

    /// When the next tick is due; `None` while stopped
    next: Option<Instant>,
}

impl Ticker {
    /// (Re)start the ticker so that it fires every `period`, starting one
    /// period after `now`.  Any previously-issued ticks become stale.
    pub(crate) fn start(&mut self, period: Duration, now: Instant) {
        self.generation += 1;
        self.period = period;
        self.next = Some(now + period);
    }

    /// Stop the ticker.  Any previously-issued ticks become stale.
    pub(crate) fn stop(&mut self) {
        self.generation += 1;
        self.next = None;
    }

    pub(crate) fn running(&self) -> bool {
        self.next.is_some()
    }

    /// The period of the most recent schedule
    pub(crate) fn period(&self) -> Duration {
        self.period
    }

    /// Return how long from `now` until the next tick is due, or `None` if
    /// the ticker is stopped
    pub(crate) fn wait(&self, now: Instant) -> Option<Duration> {
        self.next.map(|when| when.saturating_duration_since(now))
    }

    /// If a tick is due at `now`, return it and schedule the following one
    pub(crate) fn fire(&mut self, now: Instant) -> Option<Tick> {
        let when = self.next?;
        if now < when {
            return None;
        }
        self.next = Some(now + self.period);
        Some(Tick {
            generation: self.generation,
            at: now,
        })
    }

    /// Was `tick` issued by the current schedule?
    pub(crate) fn is_current(&self, tick: Tick) -> bool {
        self.running() && tick.generation == self.generation
    }
}
