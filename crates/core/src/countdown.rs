//! Session countdown driven by an external one-second tick.
//!
//! Threshold events fire when a tick (or a batch of ticks) moves the
//! remaining time from above a threshold to at or below it, so a late or
//! coalesced tick still reports every threshold it passed.

/// Remaining seconds at which the countdown enters the warning phase.
pub const WARNING_THRESHOLD_SECS: u32 = 300;
/// Remaining seconds at which the countdown enters the danger phase.
pub const DANGER_THRESHOLD_SECS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Normal,
    Warning,
    Danger,
    Expired,
    Cancelled,
}

impl TimerPhase {
    #[must_use]
    pub fn is_running(self) -> bool {
        matches!(self, TimerPhase::Normal | TimerPhase::Warning | TimerPhase::Danger)
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            TimerPhase::Normal => "timer",
            TimerPhase::Warning => "timer timer--warning",
            TimerPhase::Danger => "timer timer--danger",
            TimerPhase::Expired | TimerPhase::Cancelled => "timer timer--stopped",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Warning,
    Danger,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    phase: TimerPhase,
    warning_at: u32,
    danger_at: u32,
}

impl Countdown {
    #[must_use]
    pub fn new(total_secs: u32) -> Self {
        Self::with_thresholds(total_secs, WARNING_THRESHOLD_SECS, DANGER_THRESHOLD_SECS)
    }

    /// A countdown that starts at or below a threshold starts in that phase
    /// without emitting its event.
    #[must_use]
    pub fn with_thresholds(total_secs: u32, warning_at: u32, danger_at: u32) -> Self {
        let phase = if total_secs <= danger_at {
            TimerPhase::Danger
        } else if total_secs <= warning_at {
            TimerPhase::Warning
        } else {
            TimerPhase::Normal
        };
        Self {
            remaining: total_secs,
            phase,
            warning_at,
            danger_at,
        }
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn tick(&mut self) -> Vec<TimerEvent> {
        self.advance(1)
    }

    /// Apply `secs` elapsed seconds at once.
    ///
    /// `Expired` is reported exactly once; a stopped countdown ignores ticks.
    pub fn advance(&mut self, secs: u32) -> Vec<TimerEvent> {
        if !self.is_running() {
            return Vec::new();
        }

        let previous = self.remaining;
        let current = previous.saturating_sub(secs);
        self.remaining = current;

        let mut events = Vec::new();
        if previous > self.warning_at && current <= self.warning_at {
            self.phase = TimerPhase::Warning;
            events.push(TimerEvent::Warning);
        }
        if previous > self.danger_at && current <= self.danger_at {
            self.phase = TimerPhase::Danger;
            events.push(TimerEvent::Danger);
        }
        if current == 0 {
            self.phase = TimerPhase::Expired;
            events.push(TimerEvent::Expired);
        }
        events
    }

    /// Stop before natural expiry. Returns false when already stopped.
    pub fn cancel(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.phase = TimerPhase::Cancelled;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until_stopped(countdown: &mut Countdown) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        while countdown.is_running() {
            events.extend(countdown.tick());
        }
        events
    }

    #[test]
    fn crossing_warning_fires_once() {
        let mut countdown = Countdown::new(301);
        assert_eq!(countdown.phase(), TimerPhase::Normal);
        assert_eq!(countdown.tick(), vec![TimerEvent::Warning]);
        assert_eq!(countdown.remaining_secs(), 300);
        assert_eq!(countdown.phase(), TimerPhase::Warning);
        assert!(countdown.tick().is_empty());
    }

    #[test]
    fn full_run_emits_each_event_once_in_order() {
        let mut countdown = Countdown::new(301);
        let events = run_until_stopped(&mut countdown);
        assert_eq!(
            events,
            vec![TimerEvent::Warning, TimerEvent::Danger, TimerEvent::Expired]
        );
        assert_eq!(countdown.remaining_secs(), 0);
        assert_eq!(countdown.phase(), TimerPhase::Expired);
    }

    #[test]
    fn danger_replaces_warning() {
        let mut countdown = Countdown::new(61);
        assert_eq!(countdown.phase(), TimerPhase::Warning);
        assert_eq!(countdown.tick(), vec![TimerEvent::Danger]);
        assert_eq!(countdown.phase(), TimerPhase::Danger);
    }

    #[test]
    fn no_ticks_below_zero_after_expiry() {
        let mut countdown = Countdown::new(2);
        countdown.tick();
        assert_eq!(countdown.tick(), vec![TimerEvent::Expired]);
        assert!(countdown.tick().is_empty());
        assert!(countdown.advance(10).is_empty());
        assert_eq!(countdown.remaining_secs(), 0);
    }

    #[test]
    fn batched_ticks_do_not_skip_thresholds() {
        let mut countdown = Countdown::new(310);
        assert_eq!(countdown.advance(20), vec![TimerEvent::Warning]);
        assert_eq!(countdown.remaining_secs(), 290);

        let mut countdown = Countdown::new(400);
        assert_eq!(
            countdown.advance(500),
            vec![TimerEvent::Warning, TimerEvent::Danger, TimerEvent::Expired]
        );
    }

    #[test]
    fn starting_inside_a_phase_emits_nothing_for_it() {
        let mut countdown = Countdown::new(300);
        assert_eq!(countdown.phase(), TimerPhase::Warning);
        assert!(countdown.tick().is_empty());
    }

    #[test]
    fn cancel_stops_ticks_and_is_noop_after_expiry() {
        let mut countdown = Countdown::new(120);
        assert!(countdown.cancel());
        assert_eq!(countdown.phase(), TimerPhase::Cancelled);
        assert!(countdown.tick().is_empty());
        assert_eq!(countdown.remaining_secs(), 120);

        let mut expired = Countdown::new(1);
        expired.tick();
        assert!(!expired.cancel());
        assert_eq!(expired.phase(), TimerPhase::Expired);
    }

    #[test]
    fn zero_budget_expires_on_first_tick() {
        let mut countdown = Countdown::new(0);
        assert_eq!(countdown.tick(), vec![TimerEvent::Expired]);
    }
}
