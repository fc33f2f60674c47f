/// Tuning for a director.
#[derive(Debug, Clone)]
pub struct DirectorConfig {
    /// Poll interval in seconds for speech and waiting effects.
    pub default_pause: f32,
    /// Seconds between choosing a dialogue option and its list starting.
    pub option_delay: f32,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
    /// Maximum cross-list commands handled in one tick. The rest wait for the next tick.
    pub max_dispatch: usize,
    /// Maximum actions one list may step through in a single tick before yielding.
    pub max_steps: usize,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            default_pause: 0.2,
            option_delay: 0.3,
            max_events: 0,
            max_dispatch: 1024,
            max_steps: 10_000,
        }
    }
}

impl DirectorConfig {
    /// Set the poll interval for speech and waiting effects.
    pub fn with_default_pause(mut self, seconds: f32) -> Self {
        self.default_pause = seconds;
        self
    }

    /// Set the delay between choosing an option and running it.
    pub fn with_option_delay(mut self, seconds: f32) -> Self {
        self.option_delay = seconds;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Set the per-tick command budget.
    pub fn with_max_dispatch(mut self, max: usize) -> Self {
        self.max_dispatch = max;
        self
    }

    /// Set the per-tick step budget of a single list.
    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = DirectorConfig::default();
        assert!((config.default_pause - 0.2).abs() < f32::EPSILON);
        assert!((config.option_delay - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.max_events, 0);
        assert!(config.max_dispatch > 0);
    }

    #[test]
    fn config_builder_chain() {
        let config = DirectorConfig::default()
            .with_default_pause(0.5)
            .with_option_delay(0.0)
            .with_max_events(100)
            .with_max_dispatch(8)
            .with_max_steps(64);
        assert!((config.default_pause - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.option_delay, 0.0);
        assert_eq!(config.max_events, 100);
        assert_eq!(config.max_dispatch, 8);
        assert_eq!(config.max_steps, 64);
    }
}
