//! Attention Monitor
//!
//! Polls a landmark source on a fixed cadence, classifies each frame and
//! forwards debounced distraction alerts to a caller-supplied sink.

mod config;
mod monitor;
mod sink;
mod source;
mod ticker;

pub use config::MonitorConfig;
pub use monitor::AttentionMonitor;
pub use sink::AlertSink;
pub use source::{LandmarkSource, SourceError};
pub use ticker::{IntervalTicks, TickSource};

pub use alerting::{AlertEvent, AlertKind};

use thiserror::Error;

/// Monitor error types
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Monitor is already running")]
    AlreadyRunning,

    #[error("Configuration error: {0}")]
    Config(String),
}
