//! Stop record construction.
//!
//! Wraps a stop-shaped mapping with location/type metadata and recursively
//! builds the lines embedded in it. Line-summary payloads nest the stop
//! fields under `StopPoint`; detail payloads carry them at the top level.

use serde_json::Value;
use tracing::warn;

use crate::giromilano::RawStop;
use crate::records::{StopDetails, StopInfo, StopLocation, StopRecord, StopType};

use super::line::{build_line_at_depth, value_display};
use super::MAX_NESTING;

/// Build a normalized stop record from a raw stop-shaped mapping.
///
/// Returns `None` when the input is not a mapping or is missing its
/// id/name/location fields; the failure is logged and the stop is simply
/// absent from the output.
pub fn build_stop(raw: &Value) -> Option<StopRecord> {
    build_stop_at_depth(raw, 0)
}

pub(super) fn build_stop_at_depth(raw: &Value, depth: usize) -> Option<StopRecord> {
    if !raw.is_object() {
        return None;
    }

    let stop: RawStop = match serde_json::from_value(raw.clone()) {
        Ok(stop) => stop,
        Err(e) => {
            warn!("skipping malformed stop: {e}");
            return None;
        }
    };

    // The nested StopPoint, when present, overrides the top-level fields.
    let (code, name, location) = match stop.stop_point {
        Some(point) => (point.code, point.description, point.location),
        None => (stop.code, stop.description, stop.location),
    };

    let Some(code) = code else {
        warn!("skipping stop without a Code field");
        return None;
    };
    let Some(name) = name else {
        warn!("skipping stop {code:?} without a Description field");
        return None;
    };
    let Some(location) = location else {
        warn!("skipping stop {code:?} without a Location field");
        return None;
    };
    let (Some(x), Some(y)) = (location.x, location.y) else {
        warn!("skipping stop {code:?} with incomplete coordinates");
        return None;
    };

    // The id doubles as the type discriminant: negative ids are metro stops.
    let code_text = value_display(&code);
    let numeric_id: i64 = match code_text.trim().parse() {
        Ok(n) => n,
        Err(_) => {
            warn!("skipping stop with non-numeric id {code_text:?}");
            return None;
        }
    };
    let kind = if numeric_id < 0 {
        StopType::Metro
    } else {
        StopType::Surface
    };

    let lines = build_lines(stop.lines.as_deref(), &code, depth);

    Some(StopRecord {
        info: StopInfo { id: code },
        details: StopDetails { name, kind },
        location: StopLocation {
            x: value_display(&x),
            y: value_display(&y),
        },
        lines,
    })
}

/// Build the embedded lines, filtering out the ones the line builder omits.
fn build_lines(raw_lines: Option<&[Value]>, stop_id: &Value, depth: usize) -> Vec<crate::records::LineRecord> {
    let Some(raw_lines) = raw_lines else {
        return Vec::new();
    };
    if depth >= MAX_NESTING {
        warn!("nesting limit reached, dropping lines of stop {stop_id:?}");
        return Vec::new();
    }

    raw_lines
        .iter()
        .filter_map(|raw| build_line_at_depth(raw, depth + 1))
        .collect()
}
