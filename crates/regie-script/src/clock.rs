/// Tracks director time: a monotonic tick counter plus real and scaled elapsed seconds.
///
/// Scripts only ever see scaled time, so a time scale of zero freezes every
/// wait without stopping the tick counter.
#[derive(Debug, Clone, Default)]
pub struct ScriptClock {
    tick: u64,
    elapsed: f64,
    real_elapsed: f64,
}

impl ScriptClock {
    /// Create a clock at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick. Returns the new tick number.
    pub fn advance(&mut self, real_dt: f32, scaled_dt: f32) -> u64 {
        self.tick += 1;
        self.real_elapsed += f64::from(real_dt);
        self.elapsed += f64::from(scaled_dt);
        self.tick
    }

    /// Return the current tick number.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Scaled seconds since the director started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Unscaled seconds since the director started.
    pub fn real_elapsed(&self) -> f64 {
        self.real_elapsed
    }
}
