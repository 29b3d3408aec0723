//! Debounce scheduling
//!
//! Bursts of edits coalesce into a single highlighting pass fired after a
//! quiet interval. The scheduler is an explicit state machine driven by a
//! caller-supplied clock: the host's event loop calls [`Scheduler::poll`]
//! whenever it gets a chance, and the engine runs a pass when poll reports
//! the deadline has passed. No threads, no timers.

use std::time::{Duration, Instant};

use tracing::debug;

/// Quiet interval before a pass fires, matching the editor's keystroke
/// cadence
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Armed(Instant),
    Firing,
}

/// Debounce state machine: idle → armed → firing → idle
#[derive(Debug)]
pub struct Scheduler {
    state: State,
    interval: Duration,
}

impl Scheduler {
    /// Create a scheduler with the default quiet interval
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_DEBOUNCE)
    }

    /// Create a scheduler with a custom quiet interval
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            state: State::Idle,
            interval,
        }
    }

    /// An edit arrived: arm the deadline, or push it back if already armed
    pub fn notify_change(&mut self, now: Instant) {
        self.state = State::Armed(now + self.interval);
    }

    /// The viewport scrolled: arm only if nothing is pending, so scrolling
    /// never delays a pass an edit already scheduled
    pub fn notify_scroll(&mut self, now: Instant) {
        if self.state == State::Idle {
            self.state = State::Armed(now + self.interval);
            debug!("scroll armed highlight pass");
        }
    }

    /// Check the deadline; returns true exactly once per armed cycle, at
    /// which point the caller runs the pass and then calls [`finish`]
    ///
    /// [`finish`]: Scheduler::finish
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            State::Armed(deadline) if now >= deadline => {
                self.state = State::Firing;
                true
            }
            _ => false,
        }
    }

    /// The pass completed; return to idle
    pub fn finish(&mut self) {
        if self.state == State::Firing {
            self.state = State::Idle;
        }
    }

    /// Discard any armed deadline (document closed or replaced)
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }

    /// Whether a deadline is armed
    pub fn is_armed(&self) -> bool {
        matches!(self.state, State::Armed(_))
    }

    /// Whether the scheduler is idle
    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_after_quiet_interval() {
        let mut sched = Scheduler::with_interval(ms(100));
        let t0 = Instant::now();
        sched.notify_change(t0);
        assert!(!sched.poll(t0 + ms(50)));
        assert!(sched.poll(t0 + ms(100)));
        sched.finish();
        assert!(sched.is_idle());
    }

    #[test]
    fn test_repeated_changes_reset_deadline() {
        let mut sched = Scheduler::with_interval(ms(100));
        let t0 = Instant::now();
        sched.notify_change(t0);
        sched.notify_change(t0 + ms(80));
        // the original deadline has passed, but the re-arm pushed it back
        assert!(!sched.poll(t0 + ms(120)));
        assert!(sched.poll(t0 + ms(180)));
    }

    #[test]
    fn test_fires_once_per_cycle() {
        let mut sched = Scheduler::with_interval(ms(100));
        let t0 = Instant::now();
        sched.notify_change(t0);
        assert!(sched.poll(t0 + ms(100)));
        // still firing: no second trigger until finish + re-arm
        assert!(!sched.poll(t0 + ms(200)));
        sched.finish();
        assert!(!sched.poll(t0 + ms(300)));
    }

    #[test]
    fn test_scroll_arms_only_when_idle() {
        let mut sched = Scheduler::with_interval(ms(100));
        let t0 = Instant::now();
        sched.notify_change(t0);
        // a scroll must not delay the already-armed deadline
        sched.notify_scroll(t0 + ms(90));
        assert!(sched.poll(t0 + ms(100)));
        sched.finish();

        sched.notify_scroll(t0 + ms(200));
        assert!(sched.is_armed());
        assert!(sched.poll(t0 + ms(300)));
    }

    #[test]
    fn test_cancel_discards_deadline() {
        let mut sched = Scheduler::with_interval(ms(100));
        let t0 = Instant::now();
        sched.notify_change(t0);
        sched.cancel();
        // a stray poll after cancellation is a safe no-op
        assert!(!sched.poll(t0 + ms(500)));
        assert!(sched.is_idle());
    }
}
