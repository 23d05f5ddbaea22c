use serde::{Deserialize, Serialize};

/// One predicted object instance returned by the inference service.
///
/// `bbox` is `[x, y, w, h]` with `(x, y)` the top-left corner, all four
/// values normalized 0-1 relative to the source image dimensions. Results
/// are never persisted; they live until the next render replaces them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class: String,
    /// Some backend builds omit the score; missing reads as 0.
    #[serde(default)]
    pub confidence: f32,
    #[serde(rename = "box")]
    pub bbox: [f32; 4],
}

/// Lenient wire parsing: a malformed or non-array body degrades to zero
/// detections, and a bad array element is skipped. The dashboard treats
/// all of these as an empty result, never as a fatal error.
pub fn parse_detections(body: &str) -> Vec<Detection> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        log::warn!("discarding unparseable detection payload");
        return Vec::new();
    };
    let Some(items) = value.as_array() else {
        log::warn!("detection payload is not an array, treating as empty");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(
            |item| match serde_json::from_value::<Detection>(item.clone()) {
                Ok(det) => Some(det),
                Err(e) => {
                    log::warn!("skipping malformed detection record: {e}");
                    None
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_full_record() {
        let body = r#"[{"class":"OxygenTank","confidence":0.841,"box":[0.1,0.1,0.3,0.4]}]"#;
        let detections = parse_detections(body);
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].class, "OxygenTank");
        assert_relative_eq!(detections[0].confidence, 0.841);
        assert_eq!(detections[0].bbox, [0.1, 0.1, 0.3, 0.4]);
    }

    #[test]
    fn test_missing_confidence_reads_as_zero() {
        let body = r#"[{"class":"FireAlarm","box":[0.0,0.0,0.5,0.5]}]"#;
        let detections = parse_detections(body);
        assert_eq!(detections.len(), 1);
        assert_relative_eq!(detections[0].confidence, 0.0);
    }

    #[test]
    fn test_empty_array_is_empty() {
        assert!(parse_detections("[]").is_empty());
    }

    #[test]
    fn test_non_array_body_is_empty() {
        // The backend reports errors as an object, e.g. {"error": "..."}.
        assert!(parse_detections(r#"{"error":"No image uploaded"}"#).is_empty());
        assert!(parse_detections("null").is_empty());
    }

    #[test]
    fn test_garbage_body_is_empty() {
        assert!(parse_detections("<html>502 Bad Gateway</html>").is_empty());
    }

    #[test]
    fn test_malformed_element_is_skipped() {
        let body = r#"[
            {"class":"FireExtinguisher","confidence":0.9,"box":[0.2,0.2,0.1,0.2]},
            {"confidence":0.5},
            {"class":"EmergencyPhone","confidence":0.7,"box":[0.6,0.1,0.2,0.3]}
        ]"#;
        let detections = parse_detections(body);
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].class, "FireExtinguisher");
        assert_eq!(detections[1].class, "EmergencyPhone");
    }
}
