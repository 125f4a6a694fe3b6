//! Alerting System
//!
//! Provides debounced inattention alerts: an alert fires only after a
//! sustained looking-away streak and at most once per episode.

mod debounce;
mod event;

pub use debounce::{DebounceTracker, EpisodeState, DEFAULT_DEBOUNCE_MS};
pub use event::{AlertEvent, AlertKind};
