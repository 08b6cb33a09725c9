/// Cursor blink state: a visibility flag toggled every half second
/// against a monotonic clock sampled once per frame.

use std::time::{Duration, Instant};

pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

pub struct CursorBlink {
    visible: bool,
    last_toggle: Instant,
}

impl CursorBlink {
    pub fn new(now: Instant) -> Self {
        Self {
            visible: true,
            last_toggle: now,
        }
    }

    /// Advance the blink state. Call once per frame.
    pub fn tick(&mut self, now: Instant) {
        if now.duration_since(self.last_toggle) >= BLINK_INTERVAL {
            self.visible = !self.visible;
            self.last_toggle = now;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_visible() {
        let c = CursorBlink::new(Instant::now());
        assert!(c.is_visible());
    }

    #[test]
    fn test_no_toggle_before_interval() {
        let t0 = Instant::now();
        let mut c = CursorBlink::new(t0);
        c.tick(t0 + Duration::from_millis(300));
        assert!(c.is_visible());
        c.tick(t0 + Duration::from_millis(499));
        assert!(c.is_visible());
    }

    #[test]
    fn test_toggles_after_interval() {
        let t0 = Instant::now();
        let mut c = CursorBlink::new(t0);
        c.tick(t0 + Duration::from_millis(600));
        assert!(!c.is_visible());
        c.tick(t0 + Duration::from_millis(1200));
        assert!(c.is_visible());
    }

    #[test]
    fn test_toggle_count_over_two_seconds() {
        // Simulated 60 fps frames over a 2-second window: the cursor
        // must flip 3-4 times, never 0 and never more than 5.
        let t0 = Instant::now();
        let mut c = CursorBlink::new(t0);
        let mut toggles = 0;
        let mut last = c.is_visible();
        for frame in 0..125 {
            c.tick(t0 + Duration::from_millis(16 * frame));
            if c.is_visible() != last {
                toggles += 1;
                last = c.is_visible();
            }
        }
        assert!((3..=4).contains(&toggles), "toggled {} times", toggles);
    }

    #[test]
    fn test_toggle_count_fine_grained() {
        // Same property at 1 ms sampling resolution.
        let t0 = Instant::now();
        let mut c = CursorBlink::new(t0);
        let mut toggles = 0;
        let mut last = c.is_visible();
        for ms in 0..=2000 {
            c.tick(t0 + Duration::from_millis(ms));
            if c.is_visible() != last {
                toggles += 1;
                last = c.is_visible();
            }
        }
        assert!((3..=4).contains(&toggles), "toggled {} times", toggles);
        assert!(toggles <= 5 && toggles != 0);
    }
}
