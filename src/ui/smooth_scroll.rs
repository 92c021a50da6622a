//! Horizontal smooth scroll with exponential ease-out.
//!
//! A paging request moves the target; each tick the displayed offset closes
//! a fixed fraction of the remaining distance, so the strip decelerates into
//! place over a handful of frames.

/// Pixel-offset smooth scroll animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    current: f64,
    target: f64,
    /// Damping: `gap *= (1 - speed)` each tick.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Move the target by `delta`, clamped to `[0, max]`.
    pub fn retarget_by(&mut self, delta: f64, max: f64) {
        self.target = (self.target + delta).clamp(0.0, max);
    }

    /// Jump straight to `offset` (drag, wheel); cancels any animation.
    pub fn jump_to(&mut self, offset: f64) {
        self.current = offset;
        self.target = offset;
    }

    /// Advance one frame.  Returns `true` if the offset moved.
    pub fn tick(&mut self) -> bool {
        if !self.is_animating() {
            return false;
        }
        let gap = self.target - self.current;
        let next = self.current + gap * self.speed;
        self.current = if (self.target - next).abs() < 0.5 {
            self.target
        } else {
            next
        };
        true
    }

    pub fn is_animating(&self) -> bool {
        self.current != self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_exactly_on_target() {
        let mut s = SmoothScroll::new(0.35);
        s.retarget_by(400.0, 600.0);
        let mut frames = 0;
        while s.tick() {
            frames += 1;
            assert!(frames < 100, "never settled");
        }
        assert_eq!(s.current(), 400.0);
        assert!(frames > 1);
    }

    #[test]
    fn target_is_clamped() {
        let mut s = SmoothScroll::new(0.5);
        s.retarget_by(-50.0, 600.0);
        assert!(!s.is_animating());
        s.retarget_by(900.0, 600.0);
        while s.tick() {}
        assert_eq!(s.current(), 600.0);
    }

    #[test]
    fn jump_cancels_animation() {
        let mut s = SmoothScroll::new(0.35);
        s.retarget_by(400.0, 600.0);
        s.tick();
        s.jump_to(120.0);
        assert!(!s.is_animating());
        assert!(!s.tick());
        assert_eq!(s.current(), 120.0);
    }
}
