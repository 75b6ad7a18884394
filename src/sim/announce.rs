//! Transient HUD announcements ("Level 3", "Reset")

use std::time::Duration;

/// A flag that stays up for a fixed wall-clock duration after being shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Announcement {
    remaining: Duration,
}

impl Announcement {
    /// Show (or re-show) for `duration`
    pub fn show(&mut self, duration: Duration) {
        self.remaining = duration;
    }

    pub fn hide(&mut self) {
        self.remaining = Duration::ZERO;
    }

    pub fn advance(&mut self, dt: Duration) {
        self.remaining = self.remaining.saturating_sub(dt);
    }

    pub fn is_visible(&self) -> bool {
        !self.remaining.is_zero()
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_hides_after_duration() {
        let mut notice = Announcement::default();
        assert!(!notice.is_visible());

        notice.show(Duration::from_millis(2000));
        notice.advance(Duration::from_millis(1999));
        assert!(notice.is_visible());
        notice.advance(Duration::from_millis(1));
        assert!(!notice.is_visible());
    }

    #[test]
    fn test_reshow_restarts() {
        let mut notice = Announcement::default();
        notice.show(Duration::from_millis(2000));
        notice.advance(Duration::from_millis(1500));
        notice.show(Duration::from_millis(2000));
        assert_eq!(notice.remaining(), Duration::from_millis(2000));
        notice.hide();
        assert!(!notice.is_visible());
    }
}
