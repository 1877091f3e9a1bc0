//! Rotating content windows.
//!
//! Each feed section shows a fixed-size slice of a longer list.  A shared
//! counter ticks on a wall-clock interval; every section derives its window
//! from `(counter + offset)` so sections fed from the same list diverge.

/// Pick `window` items from `items` for the given counter / section offset.
///
/// Lists that already fit are returned as-is.  Otherwise the window starts
/// at `((counter + offset) * window) % len`; when it runs past the end the
/// partial slice is padded with items from the front of the list.
pub fn rotate_selection<T: Clone>(items: &[T], window: usize, counter: u64, offset: u64) -> Vec<T> {
    if items.len() <= window {
        return items.to_vec();
    }

    let len = items.len() as u128;
    let start = ((u128::from(counter) + u128::from(offset)) * window as u128 % len) as usize;
    let end = (start + window).min(items.len());

    let mut selected = items[start..end].to_vec();
    if selected.len() < window {
        let missing = window - selected.len();
        selected.extend_from_slice(&items[..missing]);
    }
    selected
}

/// Process-wide rotation counter.
#[derive(Debug, Clone, Default)]
pub struct RotationClock {
    counter: u64,
}

impl RotationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Called once per rotation interval.
    pub fn advance(&mut self) {
        self.counter = self.counter.wrapping_add(1);
    }

    pub fn select<T: Clone>(&self, items: &[T], window: usize, offset: u64) -> Vec<T> {
        rotate_selection(items, window, self.counter, offset)
    }
}
