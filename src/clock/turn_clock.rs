//! Two-sided countdown state machine
//!
//! Time is charged by the delta between monotonic samples, never by counting
//! ticks, so a tick source firing at irregular intervals still produces exact
//! accounting. Actions that make no sense for the current state (switching
//! after a flag fell, starting twice, pressing the idle side) are ignored.

use std::time::Instant;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::{MonotonicClock, Side, SystemClock};

/// Something the caller may want to react to (cues, notifications)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClockEvent {
    /// A side's time started running
    TurnStarted { side: Side },
    /// A side ran out of time
    Expired { side: Side },
    /// Both sides were set back to a fresh total
    Reset { total_seconds: f64 },
}

/// Result of advancing a running clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Side that was charged
    pub side: Side,
    /// Its remaining seconds after the charge
    pub remaining: f64,
    /// Set when this tick made a flag fall
    pub expired: Option<ClockEvent>,
}

/// Point-in-time copy of the whole clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub white_total: f64,
    pub black_total: f64,
    pub white_remaining: f64,
    pub black_remaining: f64,
    pub active_side: Side,
    pub running: bool,
    pub expired: bool,
}

impl ClockSnapshot {
    pub fn remaining(&self, side: Side) -> f64 {
        match side {
            Side::White => self.white_remaining,
            Side::Black => self.black_remaining,
        }
    }

    pub fn total(&self, side: Side) -> f64 {
        match side {
            Side::White => self.white_total,
            Side::Black => self.black_total,
        }
    }

    /// Side whose time is currently decreasing, if any
    pub fn ticking_side(&self) -> Option<Side> {
        self.running.then_some(self.active_side)
    }
}

/// The chess clock itself
#[derive(Debug)]
pub struct TurnClock<C = SystemClock> {
    clock: C,
    white_total: f64,
    black_total: f64,
    white_remaining: f64,
    black_remaining: f64,
    active_side: Side,
    running: bool,
    last_tick: Option<Instant>,
}

impl TurnClock<SystemClock> {
    /// Create a stopped clock with `total_seconds` on each side
    pub fn new(total_seconds: f64) -> Self {
        Self::with_clock(SystemClock, total_seconds)
    }
}

impl<C: MonotonicClock> TurnClock<C> {
    /// Create a stopped clock reading time from `clock`
    pub fn with_clock(clock: C, total_seconds: f64) -> Self {
        Self {
            clock,
            white_total: total_seconds,
            black_total: total_seconds,
            white_remaining: total_seconds,
            black_remaining: total_seconds,
            active_side: Side::STARTING,
            running: false,
            last_tick: None,
        }
    }

    /// Stop ticking and put both sides back to `total_seconds`
    pub fn reset(&mut self, total_seconds: f64) -> ClockEvent {
        self.stop();
        self.white_total = total_seconds;
        self.black_total = total_seconds;
        self.white_remaining = total_seconds;
        self.black_remaining = total_seconds;
        self.active_side = Side::STARTING;
        info!("Clock reset to {}s per side", total_seconds);
        ClockEvent::Reset { total_seconds }
    }

    /// Start the active side's time. Ignored when running or expired.
    pub fn start(&mut self) -> Option<ClockEvent> {
        if self.running || self.is_expired() {
            debug!("Ignoring start: running={}, expired={}", self.running, self.is_expired());
            return None;
        }

        self.last_tick = Some(self.clock.now());
        self.running = true;
        debug!("Started {} clock", self.active_side);
        Some(ClockEvent::TurnStarted { side: self.active_side })
    }

    /// Stop ticking. Returns whether the clock was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        self.last_tick = None;
        if was_running {
            debug!("Stopped {} clock", self.active_side);
        }
        was_running
    }

    /// Hand the move to the other side and restart the elapsed-time baseline
    pub fn switch_turn(&mut self) -> Option<ClockEvent> {
        if self.is_expired() {
            debug!("Ignoring switch: clock expired");
            return None;
        }

        self.active_side = self.active_side.opponent();
        self.stop();
        self.start()
    }

    /// `side` presses its own button. Only the side holding the move can
    /// pass it on; anything else is stale input.
    pub fn press(&mut self, side: Side) -> Option<ClockEvent> {
        if self.is_expired() || side != self.active_side {
            debug!("Ignoring press from {} (active={})", side, self.active_side);
            return None;
        }
        self.switch_turn()
    }

    /// Charge the active side for the time since the last sample
    pub fn tick(&mut self, now: Instant) -> Option<TickReport> {
        if !self.running {
            return None;
        }
        let last = self.last_tick?;

        // A sample older than the baseline charges nothing and leaves the
        // baseline alone
        let elapsed = now.saturating_duration_since(last).as_secs_f64();
        if now > last {
            self.last_tick = Some(now);
        }

        let side = self.active_side;
        let remaining = match side {
            Side::White => {
                self.white_remaining -= elapsed;
                self.white_remaining
            }
            Side::Black => {
                self.black_remaining -= elapsed;
                self.black_remaining
            }
        };
        trace!("Charged {} {:.4}s, {:.3}s left", side, elapsed, remaining);

        let expired = self.flagged_side().map(|flagged| {
            self.stop();
            info!("{} flag fell", flagged);
            ClockEvent::Expired { side: flagged }
        });

        Some(TickReport { side, remaining, expired })
    }

    /// True once either side has no time left
    pub fn is_expired(&self) -> bool {
        self.flagged_side().is_some()
    }

    fn flagged_side(&self) -> Option<Side> {
        if self.white_remaining <= 0.0 {
            Some(Side::White)
        } else if self.black_remaining <= 0.0 {
            Some(Side::Black)
        } else {
            None
        }
    }

    pub fn remaining(&self, side: Side) -> f64 {
        match side {
            Side::White => self.white_remaining,
            Side::Black => self.black_remaining,
        }
    }

    pub fn total(&self, side: Side) -> f64 {
        match side {
            Side::White => self.white_total,
            Side::Black => self.black_total,
        }
    }

    pub fn active_side(&self) -> Side {
        self.active_side
    }

    /// Side whose time is currently decreasing, if any
    pub fn ticking_side(&self) -> Option<Side> {
        self.running.then_some(self.active_side)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Read "now" from this clock's time source
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            white_total: self.white_total,
            black_total: self.black_total,
            white_remaining: self.white_remaining,
            black_remaining: self.black_remaining,
            active_side: self.active_side,
            running: self.running,
            expired: self.is_expired(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::clock::ManualClock;

    fn manual(total: f64) -> (Arc<ManualClock>, TurnClock<Arc<ManualClock>>) {
        let source = Arc::new(ManualClock::new());
        let clock = TurnClock::with_clock(Arc::clone(&source), total);
        (source, clock)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-6, "expected {expected}, got {actual}");
    }

    #[test]
    fn reset_fills_both_sides() {
        let (_, mut clock) = manual(600.0);
        clock.reset(300.0);

        assert_close(clock.remaining(Side::White), 300.0);
        assert_close(clock.remaining(Side::Black), 300.0);
        assert_close(clock.total(Side::White), 300.0);
        assert!(!clock.is_expired());
        assert!(!clock.is_running());
        assert_eq!(clock.active_side(), Side::STARTING);
    }

    #[test]
    fn reset_stops_a_running_clock() {
        let (source, mut clock) = manual(600.0);
        clock.start();
        clock.switch_turn();
        clock.reset(60.0);

        assert!(!clock.is_running());
        assert_eq!(clock.active_side(), Side::Black);
        source.advance_secs(5.0);
        assert_eq!(clock.tick(source.now()), None);
        assert_close(clock.remaining(Side::Black), 60.0);
    }

    #[test]
    fn tick_is_noop_while_stopped() {
        let (source, mut clock) = manual(600.0);
        source.advance_secs(10.0);

        assert_eq!(clock.tick(source.now()), None);
        assert_close(clock.remaining(Side::White), 600.0);
        assert_close(clock.remaining(Side::Black), 600.0);
    }

    #[test]
    fn start_reports_turn_started_once() {
        let (_, mut clock) = manual(600.0);

        assert_eq!(clock.start(), Some(ClockEvent::TurnStarted { side: Side::Black }));
        assert_eq!(clock.start(), None);
        assert_eq!(clock.ticking_side(), Some(Side::Black));
    }

    #[test]
    fn ticks_charge_only_the_active_side() {
        let (source, mut clock) = manual(600.0);
        let t0 = source.now();
        clock.start();

        let first = clock.tick(t0 + Duration::from_millis(250)).unwrap();
        let second = clock.tick(t0 + Duration::from_millis(1750)).unwrap();

        assert_eq!(second.side, Side::Black);
        assert_close(first.remaining - second.remaining, 1.5);
        assert_close(clock.remaining(Side::Black), 598.25);
        assert_close(clock.remaining(Side::White), 600.0);
    }

    #[test]
    fn switching_restarts_the_baseline() {
        let (source, mut clock) = manual(600.0);
        let t0 = source.now();
        clock.reset(600.0);
        clock.start();

        clock.tick(t0 + Duration::from_secs(1));
        assert_close(clock.remaining(Side::Black), 599.0);

        source.advance_secs(1.0);
        assert_eq!(clock.switch_turn(), Some(ClockEvent::TurnStarted { side: Side::White }));
        clock.tick(t0 + Duration::from_secs(2));

        assert_close(clock.remaining(Side::Black), 599.0);
        assert_close(clock.remaining(Side::White), 599.0);
    }

    #[test]
    fn time_between_ticks_and_switch_is_not_charged() {
        let (source, mut clock) = manual(600.0);
        clock.start();
        source.advance_secs(3.0);
        // no tick before the switch: those three seconds go to nobody
        clock.switch_turn();
        source.advance_secs(2.0);
        clock.tick(source.now());

        assert_close(clock.remaining(Side::Black), 600.0);
        assert_close(clock.remaining(Side::White), 598.0);
    }

    #[test]
    fn expiry_stops_the_clock() {
        let (source, mut clock) = manual(600.0);
        let t0 = source.now();
        clock.reset(1.0);
        clock.start();

        let report = clock.tick(t0 + Duration::from_millis(1500)).unwrap();

        assert!(report.remaining <= 0.0);
        assert_eq!(report.expired, Some(ClockEvent::Expired { side: Side::Black }));
        assert!(clock.is_expired());
        assert!(!clock.is_running());

        assert_eq!(clock.tick(t0 + Duration::from_secs(3)), None);
        assert_close(clock.remaining(Side::Black), -0.5);
    }

    #[test]
    fn expired_clock_ignores_switch_and_start() {
        let (source, mut clock) = manual(1.0);
        clock.start();
        source.advance_secs(2.0);
        clock.tick(source.now());

        assert_eq!(clock.switch_turn(), None);
        assert_eq!(clock.active_side(), Side::Black);
        assert_eq!(clock.start(), None);
        assert_eq!(clock.press(Side::Black), None);

        clock.reset(60.0);
        assert!(!clock.is_expired());
        assert!(clock.start().is_some());
    }

    #[test]
    fn press_ignores_the_idle_side() {
        let (_, mut clock) = manual(600.0);

        assert_eq!(clock.press(Side::White), None);
        assert!(!clock.is_running());

        assert_eq!(clock.press(Side::Black), Some(ClockEvent::TurnStarted { side: Side::White }));
        assert_eq!(clock.ticking_side(), Some(Side::White));

        assert_eq!(clock.press(Side::Black), None);
        assert_eq!(clock.active_side(), Side::White);
    }

    #[test]
    fn stale_timestamps_do_not_add_time() {
        let (source, mut clock) = manual(600.0);
        source.advance_secs(5.0);
        clock.start();

        let report = clock.tick(source.base()).unwrap();
        assert_close(report.remaining, 600.0);
    }

    #[test]
    fn stale_sample_after_switch_does_not_rewind_baseline() {
        let (source, mut clock) = manual(600.0);
        let t0 = source.now();
        clock.start();

        source.advance_secs(10.0);
        clock.switch_turn();

        let stale = clock.tick(t0 + Duration::from_secs(9)).unwrap();
        assert_eq!(stale.side, Side::White);
        assert_close(stale.remaining, 600.0);

        clock.tick(t0 + Duration::from_secs(11));
        assert_close(clock.remaining(Side::White), 599.0);
        assert_close(clock.remaining(Side::Black), 600.0);
    }

    #[test]
    fn snapshot_mirrors_state() {
        let (source, mut clock) = manual(600.0);
        clock.start();
        source.advance_secs(10.0);
        clock.tick(source.now());

        let snapshot = clock.snapshot();
        assert!(snapshot.running);
        assert!(!snapshot.expired);
        assert_eq!(snapshot.ticking_side(), Some(Side::Black));
        assert_close(snapshot.remaining(Side::Black), 590.0);
        assert_close(snapshot.total(Side::White), 600.0);
    }
}
