//! Monitor configuration

use alerting::DEFAULT_DEBOUNCE_MS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::MonitorError;

/// Monitor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Landmark polling interval (milliseconds)
    pub tick_interval_ms: u64,

    /// Continuous looking-away time before an alert (milliseconds)
    pub debounce_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 200,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl MonitorConfig {
    /// Create strict config (alerts after a shorter streak)
    pub fn strict() -> Self {
        Self {
            debounce_ms: 1000,
            ..Default::default()
        }
    }

    /// Create lenient config (tolerates longer glances away)
    pub fn lenient() -> Self {
        Self {
            debounce_ms: 4000,
            ..Default::default()
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Reject settings the poll loop cannot run with
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.tick_interval_ms == 0 {
            return Err(MonitorError::Config(
                "tick_interval_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
