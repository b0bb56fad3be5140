/// Converts the host's frame timestamps into simulation time.
///
/// `requestAnimationFrame` hands out milliseconds since page load; the scene
/// animates against that value scaled by a fixed factor.
#[derive(Debug, Clone, Copy)]
pub struct SimClock {
    /// Simulation units per host millisecond.
    scale: f64,
    /// Most recent simulation time.
    now: f32,
    frames: u64,
}

impl SimClock {
    /// Default host-ms → simulation-time factor.
    pub const DEFAULT_SCALE: f64 = 0.0005;

    pub fn new(scale: f64) -> Self {
        Self {
            scale,
            now: 0.0,
            frames: 0,
        }
    }

    /// Record a frame at `timestamp_ms` and return the simulation time.
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        self.now = (timestamp_ms * self.scale) as f32;
        self.frames += 1;
        self.now
    }

    /// Simulation time of the most recent frame.
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Number of frames recorded so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_timestamp() {
        let mut clock = SimClock::default();
        let t = clock.advance(2000.0);
        assert!((t - 1.0).abs() < 1e-6);
        assert_eq!(clock.now(), t);
    }

    #[test]
    fn counts_frames() {
        let mut clock = SimClock::new(1.0);
        clock.advance(16.0);
        clock.advance(32.0);
        assert_eq!(clock.frames(), 2);
        assert_eq!(clock.now(), 32.0);
    }
}
