//! Frame clock
//!
//! Turns the host's display-refresh timestamps into frame deltas. The first
//! tick after creation or reset yields a zero delta so an animation never
//! jumps after a long pause.

/// Longest delta handed to animations, in seconds
pub const DEFAULT_MAX_DELTA: f32 = 0.1;

#[derive(Clone, Debug)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
    max_delta: f32,
    frame_count: u64,
    elapsed: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_timestamp: None,
            max_delta: DEFAULT_MAX_DELTA,
            frame_count: 0,
            elapsed: 0.0,
        }
    }

    /// Clamp deltas to `max_delta` seconds instead of the default
    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta.max(0.0);
        self
    }

    /// Record a frame at `timestamp` (seconds, any monotonic origin) and
    /// return the delta since the previous frame
    pub fn tick(&mut self, timestamp: f64) -> f32 {
        let dt = match self.last_timestamp {
            Some(last) if timestamp > last => ((timestamp - last) as f32).min(self.max_delta),
            _ => 0.0,
        };

        self.last_timestamp = Some(timestamp);
        self.frame_count += 1;
        self.elapsed += dt as f64;
        dt
    }

    /// Forget the previous timestamp; the next tick yields zero
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Sum of all deltas handed out so far
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
