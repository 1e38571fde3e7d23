use instant::Instant;
use std::time::Duration;

/// Wall-clock delta source for the redraw loop.
///
/// The time uniform advances by the raw delta between ticks, matching the
/// redraw contract; only negative deltas (non-monotonic hosts) are floored.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            last: now,
            frame_index: 0,
        }
    }

    /// Resets the baseline so the next delta starts from `now`.
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }

    /// Advances the clock to `now` and returns the delta in seconds.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = if now > self.last {
            now - self.last
        } else {
            Duration::ZERO
        };
        self.last = now;
        self.frame_index += 1;
        dt.as_secs_f32()
    }

    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_reports_elapsed_seconds() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let dt = clock.tick_at(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-4);
        assert_eq!(clock.frame_index(), 1);
    }

    #[test]
    fn backwards_time_yields_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(start);
        assert_eq!(clock.tick_at(start - Duration::from_millis(5)), 0.0);
    }
}
