//! Landmark point type

use serde::{Deserialize, Serialize};

/// A single estimated 2D facial keypoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
    /// Keypoint name assigned by the estimator (e.g. "leftIris")
    #[serde(default, alias = "name", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl LandmarkPoint {
    /// Create an unlabeled point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, label: None }
    }

    /// Create a labeled point
    pub fn labeled(x: f32, y: f32, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            label: Some(label.into()),
        }
    }

    /// Whether the label starts with the given prefix
    pub fn has_label_prefix(&self, prefix: &str) -> bool {
        self.label
            .as_deref()
            .map_or(false, |label| label.starts_with(prefix))
    }
}
