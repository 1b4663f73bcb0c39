use std::time::{Duration, Instant};

/// A periodic driver for game ticks.
///
/// At most one schedule is active at a time: starting a ticker that is
/// already running replaces the old schedule.
pub(crate) trait Ticker {
    /// Begin firing every `period`, cancelling any schedule already active
    fn start(&mut self, period: Duration);

    /// Stop firing until the next call to `start()`
    fn stop(&mut self);

    /// How long until the next tick is due, or `None` if stopped
    fn until_next(&self) -> Option<Duration>;

    /// If a tick is due, consume it and schedule the following one.  Returns
    /// `true` if a tick was consumed.
    fn take_due(&mut self) -> bool;
}

/// A [`Ticker`] that fires on wall-clock deadlines
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct IntervalTicker {
    /// `Some((period, deadline))` while running
    schedule: Option<(Duration, Instant)>,
}

impl IntervalTicker {
    pub(crate) fn new() -> IntervalTicker {
        IntervalTicker::default()
    }

    fn start_at(&mut self, period: Duration, now: Instant) {
        self.schedule = Some((period, now + period));
    }

    fn until_next_at(&self, now: Instant) -> Option<Duration> {
        self.schedule
            .map(|(_, when)| when.saturating_duration_since(now))
    }

    fn take_due_at(&mut self, now: Instant) -> bool {
        let Some((period, when)) = self.schedule else {
            return false;
        };
        if now < when {
            return false;
        }
        // Schedule relative to now so that a stall doesn't produce a burst
        // of back-to-back ticks.
        self.schedule = Some((period, now + period));
        true
    }
}

impl Ticker for IntervalTicker {
    fn start(&mut self, period: Duration) {
        self.start_at(period, Instant::now());
    }

    fn stop(&mut self) {
        self.schedule = None;
    }

    fn until_next(&self) -> Option<Duration> {
        self.until_next_at(Instant::now())
    }

    fn take_due(&mut self) -> bool {
        self.take_due_at(Instant::now())
    }
}

/// A [`Ticker`] that only fires when told to
#[cfg(test)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct ManualTicker {
    period: Option<Duration>,
    due: bool,
    pub(crate) starts: usize,
}

#[cfg(test)]
impl ManualTicker {
    pub(crate) fn new() -> ManualTicker {
        ManualTicker::default()
    }

    /// Make a tick due if the ticker is running.  Returns `false` if it isn't.
    pub(crate) fn fire(&mut self) -> bool {
        self.due = self.period.is_some();
        self.due
    }

    pub(crate) fn running(&self) -> bool {
        self.period.is_some()
    }

    pub(crate) fn period(&self) -> Option<Duration> {
        self.period
    }
}

#[cfg(test)]
impl Ticker for ManualTicker {
    fn start(&mut self, period: Duration) {
        self.period = Some(period);
        self.due = false;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.period = None;
        self.due = false;
    }

    fn until_next(&self) -> Option<Duration> {
        self.period
            .map(|p| if self.due { Duration::ZERO } else { p })
    }

    fn take_due(&mut self) -> bool {
        std::mem::replace(&mut self.due, false)
    }
}
