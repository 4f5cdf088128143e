//! Elapsed-time accumulator used for the spawn and preview cadences.

/// Fires once `interval` seconds have accumulated, then starts over from zero.
///
/// At most one firing per [`IntervalTimer::tick`]; a long frame does not queue extra firings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalTimer {
    interval: f32,
    elapsed: f32,
}

impl IntervalTimer {
    pub fn new(interval: f32) -> Self {
        debug_assert!(interval > 0.0, "interval must be > 0");
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds. Returns true when the timer fires.
    pub fn tick(&mut self, dt: f32) -> bool {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_interval_and_resets() {
        let mut t = IntervalTimer::new(0.5);
        assert!(!t.tick(0.2));
        assert!(!t.tick(0.2));
        assert!(t.tick(0.2));
        assert_eq!(t.elapsed(), 0.0);
        assert!(!t.tick(0.1));
    }

    #[test]
    fn long_frames_fire_once() {
        let mut t = IntervalTimer::new(0.01);
        assert!(t.tick(1.0));
        assert!(!t.tick(0.0));
    }

    #[test]
    fn ignores_invalid_deltas() {
        let mut t = IntervalTimer::new(0.5);
        assert!(!t.tick(-3.0));
        assert!(!t.tick(f32::NAN));
        assert_eq!(t.elapsed(), 0.0);
        t.tick(0.3);
        t.reset();
        assert_eq!(t.elapsed(), 0.0);
        assert_eq!(t.interval(), 0.5);
    }
}
