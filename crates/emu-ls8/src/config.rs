//! Machine configuration.

use std::time::Duration;

/// Configuration for an LS-8 machine.
#[derive(Debug, Clone)]
pub struct Ls8Config {
    /// Period of the timer interrupt on line 0, or `None` to run
    /// without a timer device.
    pub timer_period: Option<Duration>,
}

impl Default for Ls8Config {
    fn default() -> Self {
        Self {
            timer_period: Some(Duration::from_secs(1)),
        }
    }
}
