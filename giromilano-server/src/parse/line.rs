//! Line record construction.
//!
//! Composes description classification, waiting-time classification and
//! nested stop/geometry extraction into one [`LineRecord`], applying the
//! upstream filtering and override rules.

use serde_json::Value;
use tracing::warn;

use crate::giromilano::RawJourneyPattern;
use crate::records::{LineDetails, LineInfo, LineLocal, LineRecord, Vehicle};

use super::description::parse_description;
use super::stop::build_stop_at_depth;
use super::waiting::classify;
use super::MAX_NESTING;

/// Trenord mainline-rail services are served elsewhere and never emitted.
const TRANSPORT_MODE_TRENORD: i64 = 2;
/// Reserved Qlines transport mode, likewise excluded.
const TRANSPORT_MODE_QLINES: i64 = 99;

/// Build a normalized line record from a raw journey-pattern mapping.
///
/// Returns `None` when the input is not a mapping, cannot be decoded, or
/// names an excluded service (Trenord, Qlines, reserved `Q` journey
/// patterns). An omitted line is absent from the output, never emitted
/// with error markers.
pub fn build_line(raw: &Value) -> Option<LineRecord> {
    build_line_at_depth(raw, 0)
}

pub(super) fn build_line_at_depth(raw: &Value, depth: usize) -> Option<LineRecord> {
    if !raw.is_object() {
        return None;
    }

    let pattern: RawJourneyPattern = match serde_json::from_value(raw.clone()) {
        Ok(pattern) => pattern,
        Err(e) => {
            warn!("skipping malformed journey pattern: {e}");
            return None;
        }
    };

    let line_attrs = pattern.line.as_ref();

    // Prefer top-level identifiers, then the summary-payload fallbacks.
    let mut info_code = pattern.code.clone();
    let mut info_id = pattern.id.clone();
    if info_id.is_none() {
        info_id = pattern.journey_pattern_id.clone();
    }
    if info_code.is_none() {
        info_code = line_attrs.and_then(|l| l.line_id.clone());
    }
    if info_id.is_none() {
        info_id = line_attrs.and_then(|l| l.line_id.clone());
    }

    let transport_mode = line_attrs.and_then(|l| l.transport_mode);
    if transport_mode == Some(TRANSPORT_MODE_TRENORD)
        || transport_mode == Some(TRANSPORT_MODE_QLINES)
    {
        return None;
    }

    let journey_pattern_id = pattern.journey_pattern_id.as_ref();
    let has_journey_pattern = journey_pattern_id.is_some_and(is_truthy);
    if has_journey_pattern {
        let id_text = journey_pattern_id.map(value_display).unwrap_or_default();
        if id_text.trim().starts_with('Q') {
            return None;
        }
    }

    let code_text = info_code.as_ref().map(value_display);

    let desc = line_attrs.and_then(|l| l.line_description.clone());

    let mut head_code = None;
    let mut start_point = None;
    let mut end_point = None;
    if let Some(desc) = desc.as_deref() {
        let parsed = parse_description(Some(desc), has_journey_pattern);
        head_code = parsed.mode_code;
        start_point = parsed.start_points;
        end_point = parsed.end_points;

        // Undocumented upstream quirk, preserved as-is: with a journey
        // pattern present and no night prefix, the booklet code replaces
        // the classified one.
        if has_journey_pattern && !desc.starts_with('N') {
            head_code = pattern.booklet_url2.clone();
        }

        // Line 91 always presents as its day/night pair. Final say.
        if code_text.as_deref() == Some("91") {
            head_code = Some("91/N91".to_string());
        }
    }

    let stops = build_stops(&pattern, &info_id, depth);
    let geometry = extract_geometry(&pattern);
    let vehicle = classify_vehicle(code_text.as_deref());
    let waiting_time = classify(pattern.wait_message.as_deref());

    Some(LineRecord {
        info: LineInfo {
            code: info_code.unwrap_or(Value::Null),
            id: info_id.unwrap_or(Value::Null),
            direction: pattern.direction.unwrap_or(Value::Null),
        },
        details: LineDetails {
            head_code,
            start_point,
            end_point,
            desc,
            vehicle,
            stops,
            geometry,
        },
        local: LineLocal {
            waiting_time,
            alerts: Vec::new(),
        },
    })
}

/// Parse nested stops, dropping (and logging) bad entries individually.
fn build_stops(
    pattern: &RawJourneyPattern,
    line_id: &Option<Value>,
    depth: usize,
) -> Vec<crate::records::StopRecord> {
    let Some(raw_stops) = pattern.stops.as_ref() else {
        return Vec::new();
    };
    if depth >= MAX_NESTING {
        warn!("nesting limit reached, dropping stops of line {line_id:?}");
        return Vec::new();
    }

    raw_stops
        .iter()
        .filter_map(|raw| {
            if !raw.is_object() {
                return None;
            }
            let stop = build_stop_at_depth(raw, depth + 1);
            if stop.is_none() {
                warn!("skipping unparsable stop of line {line_id:?}");
            }
            stop
        })
        .collect()
}

/// Collect one opaque point list per geometry segment.
fn extract_geometry(pattern: &RawJourneyPattern) -> Vec<Vec<Value>> {
    let Some(segments) = pattern
        .geometry
        .as_ref()
        .and_then(|g| g.segments.as_ref())
    else {
        return Vec::new();
    };

    segments
        .iter()
        .filter_map(|segment| segment.get("Points").and_then(Value::as_array).cloned())
        .collect()
}

/// Vehicle class from the numeric top-level code alone.
fn classify_vehicle(code: Option<&str>) -> Vehicle {
    match code {
        Some("-1" | "-2" | "-3" | "-4" | "-5") => Vehicle::Metro,
        Some("-11") => Vehicle::Mela,
        _ => Vehicle::Surface,
    }
}

/// Canonical text form of an upstream identifier: strings unquoted,
/// everything else as its JSON rendering.
pub(super) fn value_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Python-style truthiness of an upstream JSON value.
pub(super) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
