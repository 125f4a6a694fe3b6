//! Gaze-Based Attention Classification
//!
//! Per-frame attention analysis from facial landmarks:
//! - Horizontal gaze ratio of each pupil within its eye
//! - Attentive / looking-away verdict against fixed thresholds
//! - Fail-safe handling of missing or degenerate tracking

pub mod analysis;
pub mod classifier;
pub mod ratio;

pub use analysis::{GazeAnalysis, TrackingLoss};
pub use classifier::{analyze, classify, GAZE_THRESHOLD_HIGH, GAZE_THRESHOLD_LOW};
pub use ratio::{gaze_ratio, MIN_CONTOUR_POINTS, NEUTRAL_RATIO};

use serde::{Deserialize, Serialize};

/// Attention verdict for one polled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttentionVerdict {
    Attentive,
    LookingAway,
}

impl AttentionVerdict {
    pub fn is_looking_away(self) -> bool {
        matches!(self, AttentionVerdict::LookingAway)
    }
}
