use std::time::{Duration, Instant};

/// Time elapsed since an animation started.
///
/// The start instant is captured on the first [`elapsed`](Self::elapsed) call and
/// never changes afterwards, so the first frame always observes zero elapsed time.
#[derive(Debug, Copy, Clone, Default)]
pub struct AnimationClock {
    start: Option<Instant>,
}

impl AnimationClock {
    #[inline]
    pub const fn new() -> Self {
        Self { start: None }
    }

    /// Returns the time since the first call, starting the clock if needed.
    pub fn elapsed(&mut self, now: Instant) -> Duration {
        let start = *self.start.get_or_insert(now);
        now.saturating_duration_since(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_zero() {
        let mut clock = AnimationClock::new();
        let t0 = Instant::now() + Duration::from_secs(5);
        assert_eq!(clock.elapsed(t0), Duration::ZERO);
    }

    #[test]
    fn start_is_set_once() {
        let mut clock = AnimationClock::new();
        let t0 = Instant::now();
        clock.elapsed(t0);
        let t1 = t0 + Duration::from_millis(750);
        assert_eq!(clock.elapsed(t1), Duration::from_millis(750));
        // A later frame does not move the start.
        let t2 = t1 + Duration::from_millis(250);
        assert_eq!(clock.elapsed(t2), Duration::from_secs(1));
    }

    #[test]
    fn earlier_instant_saturates_to_zero() {
        let mut clock = AnimationClock::new();
        let t0 = Instant::now() + Duration::from_secs(1);
        clock.elapsed(t0);
        assert_eq!(clock.elapsed(t0 - Duration::from_millis(10)), Duration::ZERO);
    }
}
