//! Pure overlay layout: maps detection records to positioned rectangles.
//!
//! Pixel placement is computed against the display container's size at draw
//! time, not at fetch time, so overlays stay correct when the layout shifts
//! between request and response. Rendering is left to the caller; this
//! module knows nothing about any UI toolkit.

use crate::shared::detection::Detection;

/// A positioned marker (rectangle + label) for one detection, in pixels
/// relative to the display container's top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label: String,
}

/// Confidence as a percentage with two decimals, e.g. `84.10`.
pub fn format_confidence(confidence: f32) -> String {
    format!("{:.2}", confidence * 100.0)
}

/// Lay out one overlay box per detection against the container's current
/// rendered size, `(width, height)` in pixels.
pub fn layout(detections: &[Detection], container: (f32, f32)) -> Vec<OverlayBox> {
    let (cw, ch) = container;
    detections
        .iter()
        .map(|det| {
            let [x, y, w, h] = det.bbox;
            OverlayBox {
                x: x * cw,
                y: y * ch,
                width: w * cw,
                height: h * ch,
                label: format!("{} {}%", det.class, format_confidence(det.confidence)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn detection(class: &str, confidence: f32, bbox: [f32; 4]) -> Detection {
        Detection {
            class: class.to_string(),
            confidence,
            bbox,
        }
    }

    #[rstest]
    #[case(0.0, "0.00")]
    #[case(0.841, "84.10")]
    #[case(0.5, "50.00")]
    #[case(0.999, "99.90")]
    #[case(1.0, "100.00")]
    fn test_confidence_formats_with_two_decimals(#[case] c: f32, #[case] expected: &str) {
        assert_eq!(format_confidence(c), expected);
    }

    #[test]
    fn test_layout_scales_by_container_size() {
        let dets = vec![detection("OxygenTank", 0.841, [0.1, 0.1, 0.3, 0.4])];
        let boxes = layout(&dets, (640.0, 480.0));
        assert_eq!(boxes.len(), 1);
        assert_relative_eq!(boxes[0].x, 64.0);
        assert_relative_eq!(boxes[0].y, 48.0);
        assert_relative_eq!(boxes[0].width, 192.0);
        assert_relative_eq!(boxes[0].height, 192.0);
        assert_eq!(boxes[0].label, "OxygenTank 84.10%");
    }

    #[test]
    fn test_relayout_tracks_resized_container() {
        // Same detections, container resized between two draws: placement
        // follows the new dimensions.
        let dets = vec![detection("FireAlarm", 0.5, [0.5, 0.25, 0.2, 0.2])];
        let before = layout(&dets, (100.0, 100.0));
        let after = layout(&dets, (200.0, 400.0));
        assert_relative_eq!(before[0].x, 50.0);
        assert_relative_eq!(after[0].x, 100.0);
        assert_relative_eq!(after[0].y, 100.0);
        assert_relative_eq!(after[0].height, 80.0);
    }

    #[test]
    fn test_empty_list_leaves_zero_boxes() {
        let dets = vec![
            detection("OxygenTank", 0.8, [0.1, 0.1, 0.2, 0.2]),
            detection("FireAlarm", 0.6, [0.5, 0.5, 0.2, 0.2]),
        ];
        assert_eq!(layout(&dets, (320.0, 240.0)).len(), 2);
        // Rendering an empty list right after must leave nothing behind.
        assert!(layout(&[], (320.0, 240.0)).is_empty());
    }

    #[test]
    fn test_missing_confidence_labels_as_zero() {
        let dets = vec![detection("EmergencyPhone", 0.0, [0.0, 0.0, 1.0, 1.0])];
        let boxes = layout(&dets, (100.0, 100.0));
        assert_eq!(boxes[0].label, "EmergencyPhone 0.00%");
    }
}
