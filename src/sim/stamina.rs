//! Stamina and boost
//!
//! Boosting burns one stamina block per depletion interval; eating fruit earns
//! blocks back. The depletion timer is driven by wall-clock time through
//! [`Stamina::advance_clock`], not by frames.

use std::time::Duration;

/// A cancellable repeating timer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepeatingTimer {
    /// Interval while armed
    interval: Option<Duration>,
    /// Time accumulated since the last fire
    elapsed: Duration,
}

impl RepeatingTimer {
    /// Arm the timer. Arming an armed timer does nothing.
    pub fn arm(&mut self, interval: Duration) {
        if self.is_armed() || interval.is_zero() {
            return;
        }
        self.interval = Some(interval);
        self.elapsed = Duration::ZERO;
    }

    /// Disarm and forget any partial interval
    pub fn cancel(&mut self) {
        self.interval = None;
        self.elapsed = Duration::ZERO;
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Advance wall-clock time; returns how many times the timer fired
    pub fn advance(&mut self, dt: Duration) -> u32 {
        let Some(interval) = self.interval else {
            return 0;
        };
        self.elapsed += dt;
        let mut fires = 0;
        while self.elapsed >= interval {
            self.elapsed -= interval;
            fires += 1;
        }
        fires
    }
}

/// Stamina blocks, the fruit counter that refills them, and the boost state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stamina {
    blocks: u32,
    /// Fruit eaten since the last block was earned
    fruit_counter: u32,
    boosting: bool,
    timer: RepeatingTimer,
}

impl Stamina {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> u32 {
        self.blocks
    }

    pub fn fruit_counter(&self) -> u32 {
        self.fruit_counter
    }

    pub fn is_boosting(&self) -> bool {
        self.boosting
    }

    pub fn timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// Idle -> Boosting. Needs at least one block; a no-op while already
    /// boosting. Returns true if boosting started.
    pub fn start_boost(&mut self, interval: Duration) -> bool {
        if self.blocks == 0 || self.timer.is_armed() {
            return false;
        }
        self.timer.arm(interval);
        self.boosting = true;
        true
    }

    /// Boosting -> Idle, cancelling the depletion timer.
    /// Returns true if boosting was active.
    pub fn stop_boost(&mut self) -> bool {
        if !self.boosting && !self.timer.is_armed() {
            return false;
        }
        self.timer.cancel();
        self.boosting = false;
        true
    }

    /// Frame-start reconciliation: an empty meter ends the boost.
    /// Returns true if this forced a stop.
    pub fn reconcile(&mut self) -> bool {
        if self.blocks == 0 {
            self.stop_boost()
        } else {
            false
        }
    }

    /// Wall-clock callback. Each timer fire burns one block (never below
    /// zero); leaving the boost state is left to [`Stamina::reconcile`].
    pub fn advance_clock(&mut self, dt: Duration) -> u32 {
        let fires = self.timer.advance(dt);
        self.blocks = self.blocks.saturating_sub(fires);
        fires
    }

    /// Count eaten fruit toward the next block
    pub fn record_fruit(&mut self, count: u32) {
        self.fruit_counter += count;
    }

    /// Convert the fruit counter into a block once it reaches `per_block`,
    /// unless the meter is already full. Returns true if a block was earned.
    pub fn apply_gain(&mut self, per_block: u32, max_blocks: u32) -> bool {
        if self.fruit_counter >= per_block && self.blocks < max_blocks {
            self.blocks += 1;
            self.fruit_counter = 0;
            true
        } else {
            false
        }
    }

    /// Back to an empty, idle meter with no live timer
    pub fn reset(&mut self) {
        self.timer.cancel();
        *self = Self::default();
    }

    #[cfg(test)]
    pub(crate) fn with_blocks(blocks: u32) -> Self {
        Self {
            blocks,
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub(crate) fn set_fruit_counter(&mut self, counter: u32) {
        self.fruit_counter = counter;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(2500);

    #[test]
    fn test_timer_fires_on_interval() {
        let mut timer = RepeatingTimer::default();
        assert_eq!(timer.advance(Duration::from_secs(10)), 0);

        timer.arm(INTERVAL);
        assert_eq!(timer.advance(Duration::from_millis(2499)), 0);
        assert_eq!(timer.advance(Duration::from_millis(1)), 1);
        assert_eq!(timer.advance(Duration::from_millis(5000)), 2);
    }

    #[test]
    fn test_timer_rearm_is_idempotent() {
        let mut timer = RepeatingTimer::default();
        timer.arm(INTERVAL);
        timer.advance(Duration::from_millis(2000));
        // Second arm must not restart the interval
        timer.arm(INTERVAL);
        assert_eq!(timer.advance(Duration::from_millis(500)), 1);
    }

    #[test]
    fn test_cancel_drops_partial_interval() {
        let mut timer = RepeatingTimer::default();
        timer.arm(INTERVAL);
        timer.advance(Duration::from_millis(2400));
        timer.cancel();
        assert!(!timer.is_armed());
        assert_eq!(timer.advance(Duration::from_millis(200)), 0);
        timer.arm(INTERVAL);
        assert_eq!(timer.advance(Duration::from_millis(200)), 0);
    }

    #[test]
    fn test_boost_requires_blocks() {
        let mut stamina = Stamina::new();
        assert!(!stamina.start_boost(INTERVAL));
        assert!(!stamina.is_boosting());
        assert!(!stamina.timer_armed());
    }

    #[test]
    fn test_boost_start_stop() {
        let mut stamina = Stamina::with_blocks(2);
        assert!(stamina.start_boost(INTERVAL));
        assert!(stamina.is_boosting());
        assert!(stamina.timer_armed());
        // Already boosting
        assert!(!stamina.start_boost(INTERVAL));

        assert!(stamina.stop_boost());
        assert!(!stamina.is_boosting());
        assert!(!stamina.timer_armed());
        assert!(!stamina.stop_boost());
    }

    #[test]
    fn test_depletion_defers_stop_to_reconcile() {
        let mut stamina = Stamina::with_blocks(1);
        stamina.start_boost(INTERVAL);
        assert_eq!(stamina.advance_clock(INTERVAL), 1);
        assert_eq!(stamina.blocks(), 0);
        // Timer fire alone does not end the boost
        assert!(stamina.is_boosting());

        assert!(stamina.reconcile());
        assert!(!stamina.is_boosting());
        assert!(!stamina.timer_armed());
    }

    #[test]
    fn test_blocks_never_negative() {
        let mut stamina = Stamina::with_blocks(1);
        stamina.start_boost(INTERVAL);
        stamina.advance_clock(INTERVAL * 5);
        assert_eq!(stamina.blocks(), 0);
    }

    #[test]
    fn test_idle_clock_does_not_deplete() {
        let mut stamina = Stamina::with_blocks(3);
        stamina.advance_clock(INTERVAL * 4);
        assert_eq!(stamina.blocks(), 3);
    }

    #[test]
    fn test_gain_after_threshold() {
        let mut stamina = Stamina::with_blocks(2);
        stamina.set_fruit_counter(4);
        stamina.record_fruit(1);
        assert!(stamina.apply_gain(5, 4));
        assert_eq!(stamina.blocks(), 3);
        assert_eq!(stamina.fruit_counter(), 0);
        // Earning stamina never starts a boost
        assert!(!stamina.is_boosting());
    }

    #[test]
    fn test_gain_capped_at_max() {
        let mut stamina = Stamina::with_blocks(4);
        stamina.record_fruit(7);
        assert!(!stamina.apply_gain(5, 4));
        assert_eq!(stamina.blocks(), 4);
        // Counter keeps accumulating while full
        assert_eq!(stamina.fruit_counter(), 7);
    }

    #[test]
    fn test_reset_cancels_timer() {
        let mut stamina = Stamina::with_blocks(3);
        stamina.start_boost(INTERVAL);
        stamina.record_fruit(2);
        stamina.reset();
        assert_eq!(stamina, Stamina::default());
        // A stale timer would have burned a block here
        stamina.advance_clock(INTERVAL);
        assert_eq!(stamina.blocks(), 0);
    }
}
