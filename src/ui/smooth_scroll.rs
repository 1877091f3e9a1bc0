//! Eases the feed between scroll positions.
//!
//! The feed's logical scroll position jumps in whole rows (wheel, focus
//! changes).  When it does, a displacement equal to the jump is injected and
//! decays toward zero each frame, so the content slides into place instead
//! of snapping.

#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Current row displacement.  Positive = content drawn below its
    /// target (a downward scroll that is still catching up).
    row_offset: f64,
    /// Last target row seen.
    target: u16,
    /// Damping: `offset *= (1 - speed)` each frame.
    speed: f64,
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new(0.35)
    }
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            row_offset: 0.0,
            target: 0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Feed the current target row; a change injects displacement.
    pub fn set_target(&mut self, target: u16) {
        if target != self.target {
            self.row_offset += f64::from(target) - f64::from(self.target);
            self.target = target;
        }
    }

    /// One frame of decay.
    pub fn tick(&mut self) {
        self.row_offset *= 1.0 - self.speed;
        if self.row_offset.abs() < 0.4 {
            self.row_offset = 0.0;
        }
    }

    /// Displacement rounded to whole rows.
    pub fn row_offset(&self) -> i32 {
        self.row_offset.round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_decays_to_rest() {
        let mut s = SmoothScroll::new(0.5);
        s.set_target(10);
        assert_eq!(s.row_offset(), 10);
        s.tick();
        assert_eq!(s.row_offset(), 5);
        for _ in 0..10 {
            s.tick();
        }
        assert_eq!(s.row_offset(), 0);
    }

    #[test]
    fn upward_jump_is_negative_and_repeated_target_is_ignored() {
        let mut s = SmoothScroll::new(0.5);
        s.set_target(4);
        for _ in 0..10 {
            s.tick();
        }
        s.set_target(0);
        s.set_target(0);
        assert_eq!(s.row_offset(), -4);
    }
}
