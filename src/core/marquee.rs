//! Infinite marquee: an auto-scrolling, draggable strip of video cards.
//!
//! The strip holds three copies of its item list laid out side by side.
//! Every frame the scroll offset advances by a constant speed; whenever it
//! leaves the middle copy it jumps by exactly one third of the content
//! width, so the viewer never reaches an edge.
//!
//! All geometry is in *units* (roughly CSS pixels).  The renderer decides
//! how many units a terminal cell covers.
//!
//! State machine:
//!
//! ```text
//!   Scrolling ──press──▶ Dragging ──release──▶ Scrolling (maybe flip direction)
//!                           └──────leave──────▶ Scrolling
//! ```

use super::video::VideoItem;

// ─── constants ──────────────────────────────────────────────────

/// Auto-scroll distance per frame.
pub const BASE_SPEED: f64 = 0.8;
/// Drag distance is amplified relative to pointer motion.
pub const DRAG_MULTIPLIER: f64 = 1.5;
/// Release speed (units / ms) above which a drag counts as a fling.
pub const FLING_THRESHOLD: f64 = 0.1;
/// Delay before a fresh item list is centred on the middle copy.
pub const SETTLE_DELAY_MS: u64 = 150;
/// Lists shorter than this are quadrupled before tripling.
const MIN_SOURCE_ITEMS: usize = 5;
const COPIES: usize = 3;

// ─── geometry ───────────────────────────────────────────────────

/// Card sizes for one strip flavour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripGeometry {
    pub card_width: f64,
    pub gap: f64,
    pub padding: f64,
}

impl StripGeometry {
    /// Tall portrait cards.
    pub const SHORTS: Self = Self {
        card_width: 144.0,
        gap: 16.0,
        padding: 24.0,
    };
    /// Wide landscape cards.
    pub const LONG: Self = Self {
        card_width: 208.0,
        gap: 16.0,
        padding: 24.0,
    };

    /// Distance from one card's left edge to the next.
    pub fn pitch(&self) -> f64 {
        self.card_width + self.gap
    }

    /// Total content width for `count` cards.
    pub fn content_width(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        2.0 * self.padding + count as f64 * self.card_width + (count - 1) as f64 * self.gap
    }

    /// Left edge of card `index` in content space.
    pub fn card_x(&self, index: usize) -> f64 {
        self.padding + index as f64 * self.pitch()
    }
}

// ─── state ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarqueePhase {
    Scrolling,
    Dragging,
}

/// Where the pointer went down and where the strip was at that moment.
#[derive(Debug, Clone, Copy)]
struct DragAnchor {
    pointer_x: f64,
    offset: f64,
}

/// One marquee instance.  Owns its scroll offset exclusively.
#[derive(Debug, Clone)]
pub struct Marquee {
    geometry: StripGeometry,
    /// The list last handed to [`Marquee::set_items`].
    source: Vec<VideoItem>,
    /// Playable items, repeated; this is what gets laid out.
    display: Vec<VideoItem>,
    offset: f64,
    speed: f64,
    phase: MarqueePhase,
    anchor: DragAnchor,
    last_x: f64,
    last_time_ms: u64,
    velocity: f64,
    /// When set, the offset snaps to the middle copy once this time passes.
    center_at_ms: Option<u64>,
}

impl Marquee {
    pub fn new(geometry: StripGeometry, reverse: bool) -> Self {
        Self {
            geometry,
            source: Vec::new(),
            display: Vec::new(),
            offset: 0.0,
            speed: if reverse { -BASE_SPEED } else { BASE_SPEED },
            phase: MarqueePhase::Scrolling,
            anchor: DragAnchor {
                pointer_x: 0.0,
                offset: 0.0,
            },
            last_x: 0.0,
            last_time_ms: 0,
            velocity: 0.0,
            center_at_ms: None,
        }
    }

    /// Replace the source list.  An identical list is a no-op; any change,
    /// including an edited field on a known id, rebuilds the strip and
    /// schedules re-centring.
    pub fn set_items(&mut self, items: &[VideoItem], now_ms: u64) {
        if items == self.source.as_slice() && !items.is_empty() {
            return;
        }
        self.source = items.to_vec();

        let playable: Vec<&VideoItem> = items.iter().filter(|v| v.is_playable()).collect();
        let base: Vec<&VideoItem> = if items.len() < MIN_SOURCE_ITEMS {
            playable.iter().copied().cycle().take(playable.len() * 4).collect()
        } else {
            playable
        };
        self.display = base
            .iter()
            .copied()
            .cycle()
            .take(base.len() * COPIES)
            .cloned()
            .collect();

        let total = self.total_width();
        self.offset = if total > 0.0 {
            self.offset.rem_euclid(total)
        } else {
            0.0
        };
        self.center_at_ms = (!items.is_empty()).then_some(now_ms + SETTLE_DELAY_MS);
    }

    // ── per-frame ─────────────────────────────────────────────

    /// Advance one frame.
    pub fn tick(&mut self, now_ms: u64) {
        let total = self.total_width();

        if let Some(at) = self.center_at_ms {
            if now_ms >= at {
                self.center_at_ms = None;
                self.offset = total / 3.0;
            }
        }

        if self.phase == MarqueePhase::Dragging || total <= 0.0 {
            return;
        }

        self.offset += self.speed;
        let third = total / 3.0;
        if self.offset >= third * 2.0 {
            self.offset -= third;
        } else if self.offset <= 1.0 {
            self.offset += third;
        }
    }

    // ── pointer ───────────────────────────────────────────────

    pub fn press(&mut self, pointer_x: f64, now_ms: u64) {
        self.phase = MarqueePhase::Dragging;
        self.anchor = DragAnchor {
            pointer_x,
            offset: self.offset,
        };
        self.last_x = pointer_x;
        self.last_time_ms = now_ms;
    }

    pub fn drag_to(&mut self, pointer_x: f64, now_ms: u64) {
        if self.phase != MarqueePhase::Dragging {
            return;
        }

        let target = self.anchor.offset - (pointer_x - self.anchor.pointer_x) * DRAG_MULTIPLIER;
        let total = self.total_width();
        self.offset = if total > 0.0 { target.rem_euclid(total) } else { 0.0 };

        let dt = now_ms.saturating_sub(self.last_time_ms);
        if dt > 0 {
            self.velocity = (pointer_x - self.last_x) / dt as f64;
        }
        self.last_x = pointer_x;
        self.last_time_ms = now_ms;
    }

    /// Pointer up.  A fast enough fling sends the strip the opposite way
    /// from the pointer's motion.
    pub fn release(&mut self) {
        self.phase = MarqueePhase::Scrolling;
        if self.velocity.abs() > FLING_THRESHOLD {
            self.speed = if self.velocity > 0.0 {
                -BASE_SPEED
            } else {
                BASE_SPEED
            };
        }
    }

    /// Pointer left the strip mid-drag.  Never changes direction.
    pub fn leave(&mut self) {
        self.phase = MarqueePhase::Scrolling;
    }

    /// The item a click on `index` selects; nothing while a drag is live.
    pub fn click(&self, index: usize) -> Option<&VideoItem> {
        if self.is_dragging() {
            return None;
        }
        self.display.get(index)
    }

    /// Jump by whole cards (keyboard navigation).
    pub fn nudge(&mut self, cards: i32) {
        let total = self.total_width();
        if total <= 0.0 {
            return;
        }
        self.offset = (self.offset + f64::from(cards) * self.geometry.pitch()).rem_euclid(total);
    }

    // ── queries ───────────────────────────────────────────────

    pub fn total_width(&self) -> f64 {
        self.geometry.content_width(self.display.len())
    }

    /// Card nearest the middle of a viewport `viewport_width` units wide.
    pub fn center_index(&self, viewport_width: f64) -> Option<usize> {
        if self.display.is_empty() {
            return None;
        }
        let total = self.total_width();
        let middle = (self.offset + viewport_width / 2.0).rem_euclid(total);
        let local = (middle - self.geometry.padding).max(0.0);
        let index = (local / self.geometry.pitch()).round() as usize;
        Some(index.min(self.display.len() - 1))
    }

    pub fn display(&self) -> &[VideoItem] {
        &self.display
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }

    pub fn geometry(&self) -> StripGeometry {
        self.geometry
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[cfg(test)]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[cfg(test)]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == MarqueePhase::Dragging
    }
}
