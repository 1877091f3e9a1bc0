//! Pull-to-refresh gesture tracking.
//!
//! Vertical positions are in units (roughly CSS pixels).  A pull only
//! starts when the press lands while the feed is scrolled to the top.

/// Pull distance beyond which releasing triggers a hard refresh.
pub const REFRESH_TRIGGER: f64 = 80.0;
/// Pull distance beyond which the header shows the refreshing state.
pub const INDICATOR_THRESHOLD: f64 = 30.0;
/// Pulls at or beyond this distance stop updating.
pub const MAX_PULL: f64 = 150.0;

#[derive(Debug, Clone, Default)]
pub struct PullToRefresh {
    /// `0.0` means "no pull in progress".
    start_y: f64,
    pull_offset: f64,
}

impl PullToRefresh {
    pub fn press(&mut self, y: f64, at_top: bool) {
        if at_top {
            self.start_y = y;
        }
    }

    pub fn drag(&mut self, y: f64) {
        if self.start_y == 0.0 {
            return;
        }
        let diff = y - self.start_y;
        if diff > 0.0 && diff < MAX_PULL {
            self.pull_offset = diff;
        }
    }

    /// Ends the gesture; `true` when it should trigger a refresh.
    pub fn release(&mut self) -> bool {
        let trigger = self.pull_offset > REFRESH_TRIGGER;
        self.pull_offset = 0.0;
        self.start_y = 0.0;
        trigger
    }

    pub fn pull_offset(&self) -> f64 {
        self.pull_offset
    }

    /// How far the feed is pushed down while pulling.
    pub fn content_shift(&self) -> f64 {
        self.pull_offset / 2.0
    }

    pub fn is_refreshing(&self, loading: bool) -> bool {
        loading || self.pull_offset > INDICATOR_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_pull_triggers_refresh() {
        let mut pull = PullToRefresh::default();
        pull.press(32.0, true);
        pull.drag(72.0);
        assert!(pull.is_refreshing(false));
        pull.drag(132.0);
        assert_eq!(pull.pull_offset(), 100.0);
        assert_eq!(pull.content_shift(), 50.0);
        assert!(pull.release());
        assert_eq!(pull.pull_offset(), 0.0);
        assert!(!pull.is_refreshing(false));
    }

    #[test]
    fn short_pull_does_not_refresh() {
        let mut pull = PullToRefresh::default();
        pull.press(32.0, true);
        pull.drag(60.0);
        assert!(!pull.is_refreshing(false));
        assert!(!pull.release());
    }

    #[test]
    fn press_below_top_is_ignored() {
        let mut pull = PullToRefresh::default();
        pull.press(32.0, false);
        pull.drag(200.0);
        assert_eq!(pull.pull_offset(), 0.0);
        assert!(!pull.release());
    }

    #[test]
    fn overshoot_keeps_last_offset() {
        let mut pull = PullToRefresh::default();
        pull.press(16.0, true);
        pull.drag(116.0);
        pull.drag(400.0);
        assert_eq!(pull.pull_offset(), 100.0);
        // Moving back up does not shrink it either.
        pull.drag(10.0);
        assert_eq!(pull.pull_offset(), 100.0);
    }

    #[test]
    fn loading_always_shows_refreshing() {
        assert!(PullToRefresh::default().is_refreshing(true));
    }
}
