//! Landmark frame types

use serde::{Deserialize, Serialize};

use crate::point::LandmarkPoint;

/// Label prefix of the left eye contour keypoints
pub const LEFT_EYE_CONTOUR: &str = "leftEyeContour";
/// Label prefix of the right eye contour keypoints
pub const RIGHT_EYE_CONTOUR: &str = "rightEyeContour";
/// Label prefix of the left iris keypoints
pub const LEFT_IRIS: &str = "leftIris";
/// Label prefix of the right iris keypoints
pub const RIGHT_IRIS: &str = "rightIris";

/// Position of the pupil-center estimate within an iris point set
pub const PUPIL_INDEX: usize = 4;

/// One face as returned by the estimator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceKeypoints {
    pub keypoints: Vec<LandmarkPoint>,
}

/// Landmarks for one video frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    /// Whether the estimator found a face
    pub face_detected: bool,

    /// Left eye outline, first and last horizontal extremes at 0 and 8
    #[serde(default)]
    pub left_eye_contour: Vec<LandmarkPoint>,

    /// Right eye outline
    #[serde(default)]
    pub right_eye_contour: Vec<LandmarkPoint>,

    /// Left iris points, pupil center at `PUPIL_INDEX`
    #[serde(default)]
    pub left_iris: Vec<LandmarkPoint>,

    /// Right iris points
    #[serde(default)]
    pub right_iris: Vec<LandmarkPoint>,
}

impl LandmarkFrame {
    /// Frame for an estimate that found no face
    pub fn no_face() -> Self {
        Self::default()
    }

    /// Build a frame from one face's flat list of labeled keypoints.
    ///
    /// Keypoints are grouped by label prefix, keeping estimator order
    /// within each group. Unlabeled keypoints are ignored.
    pub fn from_keypoints(keypoints: &[LandmarkPoint]) -> Self {
        let select = |prefix: &str| -> Vec<LandmarkPoint> {
            keypoints
                .iter()
                .filter(|p| p.has_label_prefix(prefix))
                .cloned()
                .collect()
        };

        Self {
            face_detected: true,
            left_eye_contour: select(LEFT_EYE_CONTOUR),
            right_eye_contour: select(RIGHT_EYE_CONTOUR),
            left_iris: select(LEFT_IRIS),
            right_iris: select(RIGHT_IRIS),
        }
    }

    /// Build a frame from every face the estimator returned; only the
    /// first face is tracked.
    pub fn from_faces(faces: &[FaceKeypoints]) -> Self {
        match faces.first() {
            Some(face) => Self::from_keypoints(&face.keypoints),
            None => Self::no_face(),
        }
    }

    /// Left pupil-center estimate, if the iris set is long enough
    pub fn left_pupil(&self) -> Option<&LandmarkPoint> {
        self.left_iris.get(PUPIL_INDEX)
    }

    /// Right pupil-center estimate, if the iris set is long enough
    pub fn right_pupil(&self) -> Option<&LandmarkPoint> {
        self.right_iris.get(PUPIL_INDEX)
    }
}
