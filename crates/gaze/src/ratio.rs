//! Gaze ratio calculation

use landmarks::LandmarkPoint;

/// Ratio reported whenever the eye geometry cannot be trusted
pub const NEUTRAL_RATIO: f32 = 0.5;

/// Contours shorter than this are not usable
pub const MIN_CONTOUR_POINTS: usize = 9;

/// Index of the right horizontal extreme within an eye contour
const EYE_RIGHT_INDEX: usize = 8;

/// Horizontal pupil position within an eye: 0 at the contour's first
/// point, 1 at its ninth. Not clamped.
///
/// Returns `NEUTRAL_RATIO` for a short contour, a missing pupil, or a
/// zero-width eye.
pub fn gaze_ratio(eye_contour: &[LandmarkPoint], pupil: Option<&LandmarkPoint>) -> f32 {
    let Some(pupil) = pupil else {
        return NEUTRAL_RATIO;
    };
    if eye_contour.len() < MIN_CONTOUR_POINTS {
        return NEUTRAL_RATIO;
    }

    let eye_left = &eye_contour[0];
    let eye_right = &eye_contour[EYE_RIGHT_INDEX];
    let eye_width = eye_right.x - eye_left.x;
    if eye_width == 0.0 {
        return NEUTRAL_RATIO;
    }

    (pupil.x - eye_left.x) / eye_width
}
