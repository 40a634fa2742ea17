//! GiroMilano API response DTOs.
//!
//! These types map the upstream journey-pattern and stop-summary payloads.
//! Everything is `Option` because the upstream omits fields freely, and the
//! identifier fields stay raw `serde_json::Value` because the same field
//! arrives as a string in one payload and a number in another.

use serde::Deserialize;
use serde_json::Value;

/// One journey pattern (a directional variant of a line).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawJourneyPattern {
    /// Shared line attributes.
    pub line: Option<RawLine>,

    /// Top-level line code ("91", "-1", ...). String or number upstream.
    pub code: Option<Value>,

    /// Journey-pattern identifier, e.g. "19|0".
    pub id: Option<Value>,

    /// Direction indicator ("0"/"1").
    pub direction: Option<Value>,

    /// Journey-pattern id as carried on stop-summary payloads.
    pub journey_pattern_id: Option<Value>,

    /// Secondary rider-facing code; substitutes the head code in one
    /// undocumented upstream case.
    pub booklet_url2: Option<String>,

    /// Raw waiting-time message ("in arrivo", "12 min", ...).
    pub wait_message: Option<String>,

    /// Stop-shaped mappings, kept raw so one bad entry cannot sink the rest.
    pub stops: Option<Vec<Value>>,

    /// Route geometry.
    pub geometry: Option<RawGeometry>,
}

/// Shared line attributes nested under `Line`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawLine {
    /// Free-text route description; the input to classification.
    pub line_description: Option<String>,

    /// Upstream transport-mode code (0 metro, 1 tram, 2 Trenord, 99 Qlines).
    pub transport_mode: Option<i64>,

    /// Line identifier, fallback for `Code`/`Id`.
    pub line_id: Option<Value>,
}

/// Geometry wrapper: an ordered list of polyline segments.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawGeometry {
    pub segments: Option<Vec<Value>>,
}

/// A stop summary, either top-level or nested under `StopPoint`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawStop {
    /// Nested override: when present, id/name/location come from here.
    pub stop_point: Option<Box<RawStopPoint>>,

    pub code: Option<Value>,
    pub description: Option<String>,
    pub location: Option<RawLocation>,

    /// Line-shaped mappings served at this stop.
    pub lines: Option<Vec<Value>>,
}

/// The stop fields proper.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawStopPoint {
    pub code: Option<Value>,
    pub description: Option<String>,
    pub location: Option<RawLocation>,
}

/// Upstream coordinates; numbers in practice, stringified on output.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLocation {
    #[serde(rename = "X")]
    pub x: Option<Value>,
    #[serde(rename = "Y")]
    pub y: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_journey_pattern() {
        let json = r#"{
            "Code": "19",
            "Id": "19|0",
            "Direction": "0",
            "Line": {
                "LineId": "19",
                "LineDescription": "Tram 19 Rogoredo - Famagosta",
                "TransportMode": 1
            },
            "WaitMessage": "6 min",
            "Geometry": {
                "Segments": [
                    {"Points": [{"X": 9.18, "Y": 45.46}]}
                ]
            }
        }"#;

        let pattern: RawJourneyPattern = serde_json::from_str(json).unwrap();

        assert_eq!(pattern.code, Some("19".into()));
        assert_eq!(pattern.id, Some("19|0".into()));
        let line = pattern.line.unwrap();
        assert_eq!(
            line.line_description.as_deref(),
            Some("Tram 19 Rogoredo - Famagosta")
        );
        assert_eq!(line.transport_mode, Some(1));
        assert_eq!(pattern.wait_message.as_deref(), Some("6 min"));
        assert_eq!(pattern.geometry.unwrap().segments.unwrap().len(), 1);
    }

    #[test]
    fn deserialize_journey_pattern_with_numeric_code() {
        let json = r#"{"Code": -1, "Line": {"TransportMode": 0}}"#;
        let pattern: RawJourneyPattern = serde_json::from_str(json).unwrap();
        assert_eq!(pattern.code, Some(serde_json::json!(-1)));
    }

    #[test]
    fn deserialize_stop_with_nested_stop_point() {
        let json = r#"{
            "StopPoint": {
                "Code": "16634",
                "Description": "Duomo",
                "Location": {"X": 9.18951, "Y": 45.46427}
            },
            "Lines": [{"JourneyPatternId": "19|0"}]
        }"#;

        let stop: RawStop = serde_json::from_str(json).unwrap();

        let point = stop.stop_point.unwrap();
        assert_eq!(point.code, Some("16634".into()));
        assert_eq!(point.description.as_deref(), Some("Duomo"));
        assert!(point.location.is_some());
        assert_eq!(stop.lines.unwrap().len(), 1);
    }

    #[test]
    fn deserialize_minimal_stop() {
        let json = r#"{
            "Code": -101,
            "Description": "Duomo M1",
            "Location": {"X": 9.18951, "Y": 45.46427}
        }"#;

        let stop: RawStop = serde_json::from_str(json).unwrap();

        assert!(stop.stop_point.is_none());
        assert_eq!(stop.code, Some(serde_json::json!(-101)));
        assert!(stop.lines.is_none());
    }
}
