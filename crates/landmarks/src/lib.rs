//! Facial Landmark Types
//!
//! Data produced by an external face-mesh estimator, one snapshot per
//! video frame:
//! - Named 2D landmark points
//! - Eye contours and iris point sets for both eyes
//! - JSON Lines landmark traces for offline replay

pub mod frame;
pub mod point;
pub mod trace;

pub use frame::{
    FaceKeypoints, LandmarkFrame, LEFT_EYE_CONTOUR, LEFT_IRIS, PUPIL_INDEX, RIGHT_EYE_CONTOUR,
    RIGHT_IRIS,
};
pub use point::LandmarkPoint;
pub use trace::{parse_trace, parse_trace_line, TraceRecord};

use thiserror::Error;

/// Landmark error types
#[derive(Error, Debug)]
pub enum LandmarkError {
    #[error("Malformed trace record on line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Trace I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
