use std::time::{Duration, Instant};

/// Frame-rate bookkeeping plus advisory pacing.
///
/// Counts frames and reports the rate over each full wall-clock second.
/// Pacing only computes a sleep budget against the target period; it
/// never participates in guard discipline.
#[derive(Debug)]
pub struct FrameClock {
    frame_period: Duration,
    window_start: Instant,
    frames_in_window: u32,
    last_rate: u32,
    last_frame: Instant,
}

impl FrameClock {
    pub fn new(frame_period: Duration, now: Instant) -> Self {
        Self {
            frame_period,
            window_start: now,
            frames_in_window: 0,
            last_rate: 0,
            last_frame: now,
        }
    }

    /// Record one completed frame. Returns the measured rate when a full
    /// second has elapsed, resetting the counter.
    pub fn record_frame(&mut self, now: Instant) -> Option<u32> {
        self.frames_in_window += 1;
        self.last_frame = now;
        let elapsed = now.duration_since(self.window_start);
        if elapsed >= Duration::from_secs(1) {
            let rate = (u64::from(self.frames_in_window) * 1000
                / elapsed.as_millis().max(1) as u64) as u32;
            self.last_rate = rate;
            self.frames_in_window = 0;
            self.window_start = now;
            tracing::debug!(fps = rate, "frame rate");
            Some(rate)
        } else {
            None
        }
    }

    /// Rate measured over the last completed window.
    pub fn rate(&self) -> u32 {
        self.last_rate
    }

    /// Remaining advisory sleep to keep the cadence under the target
    /// period. Zero when the frame already ran long.
    pub fn throttle_budget(&self, now: Instant) -> Duration {
        let spent = now.duration_since(self.last_frame);
        self.frame_period.saturating_sub(spent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_reported_after_one_second() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(Duration::from_millis(32), t0);
        for i in 1..=30 {
            assert_eq!(clock.record_frame(t0 + Duration::from_millis(i * 32)), None);
        }
        // 32nd frame crosses the one-second boundary
        assert_eq!(clock.record_frame(t0 + Duration::from_millis(31 * 32)), None);
        let rate = clock.record_frame(t0 + Duration::from_millis(32 * 32));
        assert!(rate.is_some());
        let rate = rate.unwrap();
        assert!((28..=34).contains(&rate), "rate was {rate}");
        assert_eq!(clock.rate(), rate);
    }

    #[test]
    fn window_resets_after_report() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(Duration::from_millis(32), t0);
        clock.record_frame(t0 + Duration::from_millis(1100));
        assert_eq!(clock.record_frame(t0 + Duration::from_millis(1200)), None);
    }

    #[test]
    fn throttle_budget_shrinks_with_spent_time() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(Duration::from_millis(32), t0);
        clock.record_frame(t0 + Duration::from_millis(10));
        let budget = clock.throttle_budget(t0 + Duration::from_millis(20));
        assert_eq!(budget, Duration::from_millis(22));
    }

    #[test]
    fn throttle_budget_is_zero_for_slow_frames() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(Duration::from_millis(32), t0);
        clock.record_frame(t0);
        assert_eq!(
            clock.throttle_budget(t0 + Duration::from_millis(100)),
            Duration::ZERO
        );
    }
}
