//! JSON Lines landmark traces
//!
//! A trace holds one estimator result per line, in capture order:
//! - a `LandmarkFrame` object
//! - a raw estimator result `{"faces": [{"keypoints": [...]}]}`
//! - `null` or a blank line when the estimator returned nothing

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::frame::FaceKeypoints;
use crate::{LandmarkError, LandmarkFrame};

/// One decoded trace line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraceRecord {
    /// Pre-grouped landmark frame
    Frame(LandmarkFrame),
    /// Raw estimator output with labeled keypoints
    Faces { faces: Vec<FaceKeypoints> },
}

impl TraceRecord {
    /// Convert to the frame the classifier consumes
    pub fn into_frame(self) -> LandmarkFrame {
        match self {
            TraceRecord::Frame(frame) => frame,
            TraceRecord::Faces { faces } => LandmarkFrame::from_faces(&faces),
        }
    }
}

/// Decode one trace line. `line_no` is 1-based and only used for errors.
pub fn parse_trace_line(line_no: usize, line: &str) -> Result<Option<LandmarkFrame>, LandmarkError> {
    let line = line.trim();
    if line.is_empty() || line == "null" {
        return Ok(None);
    }

    let record: TraceRecord = serde_json::from_str(line)
        .map_err(|source| LandmarkError::MalformedRecord { line: line_no, source })?;

    Ok(Some(record.into_frame()))
}

/// Decode a whole trace, one entry per line
pub fn parse_trace<R: BufRead>(reader: R) -> Result<Vec<Option<LandmarkFrame>>, LandmarkError> {
    let mut frames = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        frames.push(parse_trace_line(idx + 1, &line?)?);
    }
    debug!("Decoded landmark trace with {} entries", frames.len());
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_null_lines_are_empty_estimates() {
        assert!(parse_trace_line(1, "").unwrap().is_none());
        assert!(parse_trace_line(2, "  null ").unwrap().is_none());
    }

    #[test]
    fn test_frame_record() {
        let frame = parse_trace_line(1, r#"{"face_detected": false}"#)
            .unwrap()
            .unwrap();
        assert_eq!(frame, LandmarkFrame::no_face());
    }

    #[test]
    fn test_faces_record() {
        let line = r#"{"faces": [{"keypoints": [
            {"x": 1.0, "y": 0.0, "name": "leftIris0"},
            {"x": 2.0, "y": 0.0, "name": "rightEyeContour0"}
        ]}]}"#;
        let frame = parse_trace_line(1, &line.replace('\n', " ")).unwrap().unwrap();
        assert!(frame.face_detected);
        assert_eq!(frame.left_iris.len(), 1);
        assert_eq!(frame.right_eye_contour.len(), 1);

        let empty = parse_trace_line(2, r#"{"faces": []}"#).unwrap().unwrap();
        assert!(!empty.face_detected);
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let trace = "null\n{\"face_detected\": true}\nnot json\n";
        match parse_trace(trace.as_bytes()) {
            Err(LandmarkError::MalformedRecord { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed record, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_trace_keeps_order() {
        let trace = "{\"face_detected\": true}\n\n{\"face_detected\": false}\n";
        let frames = parse_trace(trace.as_bytes()).unwrap();
        assert_eq!(frames.len(), 3);
        assert!(frames[0].as_ref().unwrap().face_detected);
        assert!(frames[1].is_none());
        assert!(!frames[2].as_ref().unwrap().face_detected);
    }
}
