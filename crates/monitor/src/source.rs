//! Landmark source interface

use async_trait::async_trait;
use landmarks::LandmarkFrame;
use thiserror::Error;

/// Landmark estimator failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Landmark estimator not ready")]
    NotReady,

    #[error("Landmark estimation failed: {0}")]
    Estimation(String),
}

/// External landmark estimator.
///
/// `Ok(None)` means the estimator produced nothing usable this time;
/// a frame with `face_detected == false` is a real observation.
#[async_trait]
pub trait LandmarkSource: Send {
    async fn estimate(&mut self) -> Result<Option<LandmarkFrame>, SourceError>;
}
