//! Per-frame gaze analysis results

use serde::{Deserialize, Serialize};

use crate::AttentionVerdict;

/// Why a frame was classified as looking away without computing ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingLoss {
    /// Estimator found no face
    NoFace,
    /// An iris set is too short to locate the pupil
    IrisIncomplete,
}

/// Complete gaze analysis of one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeAnalysis {
    /// Left eye gaze ratio (if tracking was usable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_ratio: Option<f32>,

    /// Right eye gaze ratio (if tracking was usable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_ratio: Option<f32>,

    /// Reason tracking was treated as lost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_loss: Option<TrackingLoss>,

    /// Resulting verdict
    pub verdict: AttentionVerdict,
}

impl GazeAnalysis {
    /// Analysis for a frame without usable iris tracking
    pub fn lost(reason: TrackingLoss) -> Self {
        Self {
            left_ratio: None,
            right_ratio: None,
            tracking_loss: Some(reason),
            verdict: AttentionVerdict::LookingAway,
        }
    }
}
