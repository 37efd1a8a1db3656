use serde::{Deserialize, Serialize};

use crate::Millis;

/// Absolute document offset the page should scroll to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRequest {
    pub target_y: f64,
}

fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
    }
}

/// A running smooth-scroll animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
    from: f64,
    to: f64,
    start: Millis,
    duration: Millis,
}

impl SmoothScroll {
    pub fn new(from: f64, request: ScrollRequest, start: Millis, duration: Millis) -> Self {
        Self {
            from,
            to: request.target_y,
            start,
            duration,
        }
    }

    /// Scroll offset at `now`. Exactly the target once the duration elapsed.
    pub fn position_at(&self, now: Millis) -> f64 {
        if self.is_done(now) {
            return self.to;
        }
        let elapsed = now.saturating_sub(self.start) as f64;
        let t = elapsed / self.duration as f64;
        self.from + (self.to - self.from) * ease_in_out_cubic(t)
    }

    pub fn is_done(&self, now: Millis) -> bool {
        now.saturating_sub(self.start) >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_origin_and_lands_on_target() {
        let s = SmoothScroll::new(100.0, ScrollRequest { target_y: 900.0 }, 1000, 600);
        assert!((s.position_at(1000) - 100.0).abs() < 1e-9);
        assert!((s.position_at(1300) - 500.0).abs() < 1e-9);
        assert_eq!(s.position_at(1600), 900.0);
        assert_eq!(s.position_at(5000), 900.0);
    }

    #[test]
    fn zero_duration_jumps() {
        let s = SmoothScroll::new(0.0, ScrollRequest { target_y: 40.0 }, 10, 0);
        assert!(s.is_done(10));
        assert_eq!(s.position_at(10), 40.0);
    }

    #[test]
    fn moves_monotonically_upward() {
        let s = SmoothScroll::new(800.0, ScrollRequest { target_y: 0.0 }, 0, 600);
        let mut last = f64::INFINITY;
        for now in (0..=600).step_by(50) {
            let y = s.position_at(now);
            assert!(y <= last);
            last = y;
        }
    }
}
