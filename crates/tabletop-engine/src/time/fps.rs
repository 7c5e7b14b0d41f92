use std::time::{Duration, Instant};

/// Counts presented frames over fixed windows (one second by default).
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: Duration,
    window_start: Option<Instant>,
    frames: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::with_window(Duration::from_secs(1))
    }

    pub fn with_window(window: Duration) -> Self {
        debug_assert!(!window.is_zero());
        Self {
            window,
            window_start: None,
            frames: 0,
        }
    }

    /// Records one frame presented at `now`.
    ///
    /// Returns the frame count of the window that just closed, if `now` closed one.
    /// The closing frame is counted in the next window.
    pub fn frame(&mut self, now: Instant) -> Option<u32> {
        let start = *self.window_start.get_or_insert(now);

        let mut report = None;
        if now.saturating_duration_since(start) >= self.window {
            report = Some(self.frames);
            self.frames = 0;
            self.window_start = Some(now);
        }

        self.frames += 1;
        report
    }

}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_frames_per_window() {
        let mut fps = FpsCounter::new();
        let t0 = Instant::now();

        for i in 0..60 {
            assert_eq!(fps.frame(t0 + Duration::from_millis(i * 16)), None);
        }
        assert_eq!(fps.frame(t0 + Duration::from_millis(1000)), Some(60));
    }

    #[test]
    fn closing_frame_starts_next_window() {
        let mut fps = FpsCounter::with_window(Duration::from_millis(100));
        let t0 = Instant::now();
        fps.frame(t0);
        assert_eq!(fps.frame(t0 + Duration::from_millis(100)), Some(1));
        fps.frame(t0 + Duration::from_millis(150));
        assert_eq!(fps.frame(t0 + Duration::from_millis(200)), Some(2));
    }

    #[test]
    fn nothing_reported_before_first_window() {
        let mut fps = FpsCounter::new();
        let t0 = Instant::now();
        assert_eq!(fps.frame(t0), None);
        assert_eq!(fps.frame(t0 + Duration::from_millis(999)), None);
    }
}
