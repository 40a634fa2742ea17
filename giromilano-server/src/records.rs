//! Normalized output records.
//!
//! These are the shapes the API serves. Every record is built fresh from
//! one upstream payload and never mutated afterwards; `info` identifiers
//! pass the upstream JSON values through unchanged because the upstream
//! mixes strings and numbers for the same field.

use serde::Serialize;
use serde_json::Value;

use crate::parse::WaitingTime;

/// Vehicle class of a line, derived from its numeric code alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vehicle {
    Metro,
    Mela,
    Surface,
}

/// Stop class, derived from the sign of the numeric stop id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StopType {
    Metro,
    Surface,
}

/// A normalized transit line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineRecord {
    pub info: LineInfo,
    pub details: LineDetails,
    pub local: LineLocal,
}

/// Upstream identifiers, passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineInfo {
    pub code: Value,
    pub id: Value,
    pub direction: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDetails {
    /// Rider-facing short identifier ("M1", "19", "91/N91").
    pub head_code: Option<String>,
    /// Alternative start termini joined by `/`.
    pub start_point: Option<String>,
    /// Alternative end termini joined by `/`.
    pub end_point: Option<String>,
    /// The original upstream description.
    pub desc: Option<String>,
    pub vehicle: Vehicle,
    pub stops: Vec<StopRecord>,
    /// One opaque point list per upstream geometry segment.
    pub geometry: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineLocal {
    pub waiting_time: WaitingTime,
    /// Always empty; reserved for service alerts.
    pub alerts: Vec<Value>,
}

/// A normalized stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopRecord {
    pub info: StopInfo,
    pub details: StopDetails,
    pub location: StopLocation,
    pub lines: Vec<LineRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopInfo {
    pub id: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopDetails {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: StopType,
}

/// Stop coordinates, stringified from the upstream numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopLocation {
    #[serde(rename = "X")]
    pub x: String,
    #[serde(rename = "Y")]
    pub y: String,
}
