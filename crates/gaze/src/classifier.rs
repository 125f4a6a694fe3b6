//! Attention classification from eye landmarks

use landmarks::{LandmarkFrame, PUPIL_INDEX};
use tracing::debug;

use crate::analysis::{GazeAnalysis, TrackingLoss};
use crate::ratio::gaze_ratio;
use crate::AttentionVerdict;

/// Gaze ratios below this mean the pupil sits too far left
pub const GAZE_THRESHOLD_LOW: f32 = 0.25;

/// Gaze ratios above this mean the pupil sits too far right
pub const GAZE_THRESHOLD_HIGH: f32 = 0.75;

/// Iris sets need the pupil-center point to be present
const MIN_IRIS_POINTS: usize = PUPIL_INDEX + 1;

fn within_bounds(ratio: f32) -> bool {
    (GAZE_THRESHOLD_LOW..=GAZE_THRESHOLD_HIGH).contains(&ratio)
}

/// Analyze a frame, keeping both eye ratios for diagnostics.
///
/// Missing face or incomplete iris tracking counts as looking away:
/// unreliable tracking is treated as inattention, never as unknown.
/// Either eye outside `[GAZE_THRESHOLD_LOW, GAZE_THRESHOLD_HIGH]` on
/// either side is enough to call the frame looking away.
pub fn analyze(frame: &LandmarkFrame) -> GazeAnalysis {
    if !frame.face_detected {
        return GazeAnalysis::lost(TrackingLoss::NoFace);
    }
    if frame.left_iris.len() < MIN_IRIS_POINTS || frame.right_iris.len() < MIN_IRIS_POINTS {
        return GazeAnalysis::lost(TrackingLoss::IrisIncomplete);
    }

    let left = gaze_ratio(&frame.left_eye_contour, frame.left_pupil());
    let right = gaze_ratio(&frame.right_eye_contour, frame.right_pupil());

    let verdict = if within_bounds(left) && within_bounds(right) {
        AttentionVerdict::Attentive
    } else {
        AttentionVerdict::LookingAway
    };

    debug!("Gaze ratios left={:.3} right={:.3} -> {:?}", left, right, verdict);

    GazeAnalysis {
        left_ratio: Some(left),
        right_ratio: Some(right),
        tracking_loss: None,
        verdict,
    }
}

/// Classify a frame as attentive or looking away
pub fn classify(frame: &LandmarkFrame) -> AttentionVerdict {
    analyze(frame).verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use landmarks::LandmarkPoint;
    use proptest::prelude::*;

    /// Eye spanning x in [0, 100] so the ratio is pupil_x / 100
    fn eye() -> Vec<LandmarkPoint> {
        (0..16)
            .map(|i| LandmarkPoint::new(if i == 8 { 100.0 } else if i == 0 { 0.0 } else { 50.0 }, 0.0))
            .collect()
    }

    fn iris(pupil_x: f32) -> Vec<LandmarkPoint> {
        (0..5)
            .map(|i| LandmarkPoint::new(if i == PUPIL_INDEX { pupil_x } else { -1.0 }, 0.0))
            .collect()
    }

    fn frame(left_pupil_x: f32, right_pupil_x: f32) -> LandmarkFrame {
        LandmarkFrame {
            face_detected: true,
            left_eye_contour: eye(),
            right_eye_contour: eye(),
            left_iris: iris(left_pupil_x),
            right_iris: iris(right_pupil_x),
        }
    }

    #[test]
    fn test_centered_gaze_is_attentive() {
        assert_eq!(classify(&frame(50.0, 50.0)), AttentionVerdict::Attentive);
    }

    #[test]
    fn test_no_face_is_looking_away() {
        let mut f = frame(50.0, 50.0);
        f.face_detected = false;
        assert_eq!(classify(&f), AttentionVerdict::LookingAway);
        assert_eq!(analyze(&f).tracking_loss, Some(TrackingLoss::NoFace));
    }

    #[test]
    fn test_short_iris_is_looking_away() {
        let mut f = frame(50.0, 50.0);
        f.right_iris.truncate(4);
        assert_eq!(classify(&f), AttentionVerdict::LookingAway);

        let mut f = frame(50.0, 50.0);
        f.left_iris.clear();
        let analysis = analyze(&f);
        assert_eq!(analysis.verdict, AttentionVerdict::LookingAway);
        assert_eq!(analysis.tracking_loss, Some(TrackingLoss::IrisIncomplete));
        assert!(analysis.left_ratio.is_none());
    }

    #[test]
    fn test_boundaries_are_attentive() {
        assert_eq!(classify(&frame(25.0, 75.0)), AttentionVerdict::Attentive);
        assert_eq!(classify(&frame(75.0, 25.0)), AttentionVerdict::Attentive);
    }

    #[test]
    fn test_just_outside_boundaries() {
        assert_eq!(classify(&frame(24.9999, 50.0)), AttentionVerdict::LookingAway);
        assert_eq!(classify(&frame(50.0, 75.0001)), AttentionVerdict::LookingAway);
    }

    #[test]
    fn test_degenerate_contour_falls_back_to_neutral() {
        // Short contours give the neutral ratio, which is attentive
        let mut f = frame(0.0, 100.0);
        f.left_eye_contour.truncate(8);
        f.right_eye_contour.truncate(3);
        let analysis = analyze(&f);
        assert_eq!(analysis.left_ratio, Some(0.5));
        assert_eq!(analysis.verdict, AttentionVerdict::Attentive);
    }

    proptest! {
        #[test]
        fn prop_single_eye_out_of_range_is_looking_away(
            good in 25.0f32..=75.0,
            bad in prop_oneof![-200.0f32..24.9, 75.1f32..300.0],
            left_is_bad in any::<bool>(),
        ) {
            let f = if left_is_bad { frame(bad, good) } else { frame(good, bad) };
            prop_assert_eq!(classify(&f), AttentionVerdict::LookingAway);
        }

        #[test]
        fn prop_no_face_ignores_geometry(left in -100.0f32..200.0, right in -100.0f32..200.0) {
            let mut f = frame(left, right);
            f.face_detected = false;
            prop_assert_eq!(classify(&f), AttentionVerdict::LookingAway);
        }
    }
}
