//! Stateless landmark classifier: digit extension, gesture label, pointer.

use super::landmarks::{FINGER_TIPS, INDEX_TIP, LandmarkSet, THUMB_IP, THUMB_TIP};
use crate::draw::Point;

/// Extension flags in digit order: thumb, index, middle, ring, pinky.
pub type Fingers = [bool; 5];

/// Discrete hand gesture recognized in a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    /// No command gesture; the hand just points.
    #[default]
    None,
    /// Four or more digits extended: erase.
    OpenPalm,
    /// Only the thumb extended: save.
    ThumbsUp,
}

/// Everything the state machine needs from one hand in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub fingers: Fingers,
    pub gesture: Gesture,
    /// Index fingertip in raster coordinates.
    pub pointer: Point,
}

/// Determines which digits are extended.
///
/// The thumb counts as extended when its tip lies left of the IP joint. That
/// holds for a right hand seen through a mirrored (selfie) camera; other
/// camera orientations or a left hand flip the comparison.
///
/// The other digits are extended when the tip sits above (smaller y) the PIP
/// joint two indices below it.
pub fn fingers_up(hand: &LandmarkSet) -> Fingers {
    let mut fingers = [false; 5];
    fingers[0] = hand.point(THUMB_TIP).x < hand.point(THUMB_IP).x;
    for (digit, &tip) in FINGER_TIPS.iter().enumerate().skip(1) {
        fingers[digit] = hand.point(tip).y < hand.point(tip - 2).y;
    }
    fingers
}

pub fn is_open_palm(fingers: &Fingers) -> bool {
    fingers.iter().filter(|&&up| up).count() >= 4
}

pub fn is_thumbs_up(fingers: &Fingers) -> bool {
    *fingers == [true, false, false, false, false]
}

/// Maps an extension vector to a gesture. Open palm wins over thumbs up.
pub fn classify(fingers: &Fingers) -> Gesture {
    if is_open_palm(fingers) {
        Gesture::OpenPalm
    } else if is_thumbs_up(fingers) {
        Gesture::ThumbsUp
    } else {
        Gesture::None
    }
}

/// Classifies one hand against a frame of `width` x `height` pixels.
pub fn classify_hand(hand: &LandmarkSet, width: u32, height: u32) -> Classification {
    let fingers = fingers_up(hand);
    Classification {
        fingers,
        gesture: classify(&fingers),
        pointer: hand.point(INDEX_TIP).to_pixel(width, height),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::gesture::landmarks::{INDEX_PIP, LANDMARK_COUNT, Landmark};

    /// Builds a hand whose digit extension matches `fingers`, with the index
    /// fingertip at the normalized position `tip`.
    pub(crate) fn hand_with(fingers: Fingers, tip: (f32, f32)) -> LandmarkSet {
        let mut points = [Landmark::new(0.5, 0.8, 0.0); LANDMARK_COUNT];

        // Thumb: IP joint at x = 0.5, tip left of it when extended.
        points[THUMB_IP] = Landmark::new(0.5, 0.6, 0.0);
        points[THUMB_TIP] = Landmark::new(if fingers[0] { 0.4 } else { 0.6 }, 0.6, 0.0);

        for (digit, &tip_index) in FINGER_TIPS.iter().enumerate().skip(1) {
            let x = 0.3 + 0.1 * digit as f32;
            points[tip_index - 2] = Landmark::new(x, 0.5, 0.0);
            points[tip_index] = Landmark::new(x, if fingers[digit] { 0.3 } else { 0.7 }, 0.0);
        }

        let (tx, ty) = tip;
        points[INDEX_TIP] = Landmark::new(tx, ty, 0.0);
        points[INDEX_PIP].y = if fingers[1] { ty + 0.05 } else { ty - 0.05 };
        LandmarkSet::new(points)
    }

    #[test]
    fn open_palm_truth_table() {
        assert!(is_open_palm(&[true, true, true, true, true]));
        assert!(is_open_palm(&[false, true, true, true, true]));
        assert!(!is_open_palm(&[true, false, false, false, false]));
        assert!(!is_open_palm(&[true, true, true, false, false]));
    }

    #[test]
    fn thumbs_up_truth_table() {
        assert!(is_thumbs_up(&[true, false, false, false, false]));
        assert!(!is_thumbs_up(&[true, true, false, false, false]));
        assert!(!is_thumbs_up(&[false, false, false, false, false]));
    }

    #[test]
    fn classify_labels() {
        assert_eq!(classify(&[true; 5]), Gesture::OpenPalm);
        assert_eq!(
            classify(&[true, false, false, false, false]),
            Gesture::ThumbsUp
        );
        assert_eq!(
            classify(&[false, true, false, false, false]),
            Gesture::None
        );
        assert_eq!(classify(&[false; 5]), Gesture::None);
    }

    #[test]
    fn fingers_up_reads_landmark_geometry() {
        let pointing = [false, true, false, false, false];
        assert_eq!(fingers_up(&hand_with(pointing, (0.5, 0.3))), pointing);

        let palm = [true; 5];
        assert_eq!(fingers_up(&hand_with(palm, (0.5, 0.3))), palm);

        let thumb = [true, false, false, false, false];
        assert_eq!(fingers_up(&hand_with(thumb, (0.5, 0.6))), thumb);
    }

    #[test]
    fn thumb_uses_mirrored_x_convention() {
        let mut hand = hand_with([false; 5], (0.5, 0.6));
        hand.point_mut(THUMB_TIP).x = 0.45;
        assert!(fingers_up(&hand)[0]);
        hand.point_mut(THUMB_TIP).x = 0.55;
        assert!(!fingers_up(&hand)[0]);
    }

    #[test]
    fn classify_hand_scales_pointer() {
        let hand = hand_with([false, true, false, false, false], (0.25, 0.5));
        let result = classify_hand(&hand, 640, 480);
        assert_eq!(result.pointer, (160, 240));
        assert_eq!(result.gesture, Gesture::None);
    }
}
