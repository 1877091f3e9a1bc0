//! Preview playback gating for grid cards.
//!
//! A card previews while enough of it is on screen and nothing covers the
//! feed.  Marquee cards are not gated.

/// Fraction of a card that must be visible for it to play.
pub const VISIBILITY_THRESHOLD: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    Playing,
    Paused,
}

/// Visible fraction of a span `[top, top + height)` inside
/// `[view_top, view_top + view_height)`.
pub fn visible_ratio(top: i32, height: u16, view_top: i32, view_height: u16) -> f64 {
    if height == 0 {
        return 0.0;
    }
    let bottom = top + i32::from(height);
    let view_bottom = view_top + i32::from(view_height);
    let overlap = (bottom.min(view_bottom) - top.max(view_top)).max(0);
    f64::from(overlap) / f64::from(height)
}

pub fn preview_state(visible_ratio: f64, overlay_active: bool, autoplay: bool) -> PreviewState {
    if autoplay && !overlay_active && visible_ratio > 0.0 && visible_ratio >= VISIBILITY_THRESHOLD {
        PreviewState::Playing
    } else {
        PreviewState::Paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_of_partially_visible_card() {
        assert_eq!(visible_ratio(0, 10, 0, 20), 1.0);
        assert_eq!(visible_ratio(15, 10, 0, 20), 0.5);
        assert_eq!(visible_ratio(-8, 10, 0, 20), 0.2);
        assert_eq!(visible_ratio(30, 10, 0, 20), 0.0);
        assert_eq!(visible_ratio(0, 0, 0, 20), 0.0);
    }

    #[test]
    fn plays_only_when_visible_enough_and_uncovered() {
        assert_eq!(preview_state(0.15, false, true), PreviewState::Playing);
        assert_eq!(preview_state(0.1, false, true), PreviewState::Paused);
        assert_eq!(preview_state(1.0, true, true), PreviewState::Paused);
        assert_eq!(preview_state(1.0, false, false), PreviewState::Paused);
    }
}
