//! Alert event types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Alert categories.
///
/// Only `Distracted` is ever produced by the attention monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// Sustained looking away
    Distracted,
}

impl AlertKind {
    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Distracted => "distracted",
        }
    }

    /// Message shown to the subject
    pub fn notification(&self) -> &'static str {
        match self {
            AlertKind::Distracted => "Psst... Are you still there? Focus up!",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert delivered to the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub kind: AlertKind,
}

impl AlertEvent {
    pub fn distracted() -> Self {
        Self {
            kind: AlertKind::Distracted,
        }
    }
}
