use std::time::{Duration, Instant};

/// Longest frame step handed to the camera. Longer stalls (window drags,
/// breakpoints) are clamped so the camera does not jump.
const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

/// Measures the time between consecutive frames.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
    delta: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            delta: 0.0,
        }
    }

    /// Start a new frame and return its delta in seconds.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Start a new frame at an explicit instant.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last).min(MAX_FRAME_STEP);
        self.last = now;
        self.delta = elapsed.as_secs_f32();
        self.delta
    }

    /// Delta of the most recent frame.
    pub fn delta(&self) -> f32 {
        self.delta
    }
}
