//! JSON interchange format.

use crate::document::SignatureData;
use crate::error::{SignatureError, SignatureResult};
use serde_json::{Map, Value};

/// Serialize a document to pretty-printed JSON.
pub fn to_json(document: &SignatureData) -> SignatureResult<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Deserialize a document from JSON text.
///
/// Fails with [`SignatureError::Parse`] when the text is not well-formed JSON
/// or does not fit the document types.
pub fn from_json(text: &str) -> SignatureResult<SignatureData> {
    Ok(serde_json::from_str(text)?)
}

/// Parse untrusted JSON text, applying the structural check before
/// deserializing.
pub fn parse_validated(text: &str) -> SignatureResult<SignatureData> {
    let value: Value = serde_json::from_str(text)?;
    if !validate(&value) {
        log::warn!("Rejected signature document that failed validation");
        return Err(SignatureError::InvalidDocument(
            "document does not match the signature schema".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

/// Structural type check of a candidate document.
///
/// Never fails; any mismatch yields `false`.
pub fn validate(candidate: &Value) -> bool {
    let Some(doc) = candidate.as_object() else {
        return false;
    };

    let Some(strokes) = doc.get("strokes").and_then(Value::as_array) else {
        return false;
    };

    is_dimension(doc, "width")
        && is_dimension(doc, "height")
        && is_string(doc, "backgroundColor")
        && is_number(doc, "timestamp")
        && strokes.iter().all(validate_stroke)
}

fn validate_stroke(stroke: &Value) -> bool {
    let Some(stroke) = stroke.as_object() else {
        return false;
    };
    let Some(points) = stroke.get("points").and_then(Value::as_array) else {
        return false;
    };

    is_string(stroke, "color")
        && is_number(stroke, "width")
        && is_number(stroke, "timestamp")
        && points.iter().all(validate_point)
}

fn validate_point(point: &Value) -> bool {
    let Some(point) = point.as_object() else {
        return false;
    };

    is_number(point, "x")
        && is_number(point, "y")
        && is_optional_number(point, "pressure")
        && is_optional_number(point, "timestamp")
}

fn is_number(object: &Map<String, Value>, key: &str) -> bool {
    object.get(key).is_some_and(Value::is_number)
}

/// Non-negative integer that fits the pixel size fields.
fn is_dimension(object: &Map<String, Value>, key: &str) -> bool {
    object
        .get(key)
        .and_then(Value::as_u64)
        .is_some_and(|v| v <= u64::from(u32::MAX))
}

fn is_string(object: &Map<String, Value>, key: &str) -> bool {
    object.get(key).is_some_and(Value::is_string)
}

/// Absent or numeric. An explicit `null` is not accepted.
fn is_optional_number(object: &Map<String, Value>, key: &str) -> bool {
    object.get(key).is_none_or(Value::is_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{SignaturePoint, SignatureStroke};
    use serde_json::json;

    fn sample_document() -> SignatureData {
        SignatureData {
            strokes: vec![
                SignatureStroke::new(
                    vec![
                        SignaturePoint::new(10.0, 10.0).with_timestamp(1000.0),
                        SignaturePoint::new(20.0, 20.0).with_pressure(0.4),
                        SignaturePoint::new(30.0, 30.0),
                    ],
                    "#000000",
                    2.0,
                    1000.0,
                ),
                SignatureStroke::new(
                    vec![SignaturePoint::new(50.0, 50.0), SignaturePoint::new(60.0, 60.0)],
                    "#ff0000",
                    3.0,
                    2000.0,
                ),
            ],
            width: 400,
            height: 200,
            background_color: "#ffffff".to_string(),
            timestamp: 3000.0,
        }
    }

    #[test]
    fn test_round_trip() {
        let document = sample_document();
        let text = to_json(&document).unwrap();
        let back = from_json(&text).unwrap();
        assert_eq!(back, document);
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(sample_document()).unwrap();
        assert!(value.get("backgroundColor").is_some());
        assert!(value["strokes"][0]["points"][2].get("pressure").is_none());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = from_json("{not json");
        assert!(matches!(result, Err(SignatureError::Parse(_))));
    }

    #[test]
    fn test_validate_canonical_document() {
        let value = serde_json::to_value(sample_document()).unwrap();
        assert!(validate(&value));
    }

    #[test]
    fn test_validate_rejects_non_sequence_strokes() {
        let value = json!({
            "strokes": "nope",
            "width": 400,
            "height": 200,
            "backgroundColor": "#ffffff",
            "timestamp": 0
        });
        assert!(!validate(&value));
    }

    #[test]
    fn test_validate_rejects_bad_point() {
        let mut value = serde_json::to_value(sample_document()).unwrap();
        value["strokes"][0]["points"][1]["x"] = json!("10");
        assert!(!validate(&value));

        let mut value = serde_json::to_value(sample_document()).unwrap();
        value["strokes"][0]["points"][1]["pressure"] = json!(null);
        assert!(!validate(&value));
    }

    #[test]
    fn test_validate_rejects_bad_color() {
        let mut value = serde_json::to_value(sample_document()).unwrap();
        value["strokes"][1]["color"] = json!(255);
        assert!(!validate(&value));
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        assert!(!validate(&json!(null)));
        assert!(!validate(&json!([])));
        assert!(!validate(&json!({"strokes": [], "width": 1, "height": 1, "backgroundColor": "#fff"})));
    }

    #[test]
    fn test_validate_rejects_non_pixel_dimensions() {
        for (width, height) in [
            (json!(400.5), json!(200)),
            (json!(400), json!(-1)),
            (json!(400), json!(u64::from(u32::MAX) + 1)),
            (json!("400"), json!(200)),
        ] {
            let mut value = serde_json::to_value(sample_document()).unwrap();
            value["width"] = width;
            value["height"] = height;
            assert!(!validate(&value));

            let text = value.to_string();
            assert!(matches!(parse_validated(&text), Err(SignatureError::InvalidDocument(_))));
        }

        let mut value = serde_json::to_value(sample_document()).unwrap();
        value["width"] = json!(0);
        assert!(validate(&value));
    }

    #[test]
    fn test_parse_validated() {
        let text = to_json(&sample_document()).unwrap();
        assert_eq!(parse_validated(&text).unwrap(), sample_document());

        let wrong = r##"{"strokes": 5, "width": 1, "height": 1, "backgroundColor": "#fff", "timestamp": 0}"##;
        assert!(matches!(parse_validated(wrong), Err(SignatureError::InvalidDocument(_))));
        assert!(matches!(parse_validated("]"), Err(SignatureError::Parse(_))));
    }
}
