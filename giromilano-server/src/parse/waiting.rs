//! Waiting-time message classification.
//!
//! The upstream `WaitMessage` field is a small fixed vocabulary of Italian
//! status strings plus a "<minutes> min" countdown. The literal mapping is
//! a single lookup table so the vocabulary stays exhaustive in one place.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Enumerated waiting-time status kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WaitingTimeKind {
    None,
    Reloading,
    Plus30,
    Nightly,
    Arriving,
    Waiting,
    NoService,
    Suspended,
    Time,
}

/// A classified waiting-time status.
///
/// `value` is non-null only for [`WaitingTimeKind::Time`], where it holds
/// the minute count as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitingTime {
    #[serde(rename = "type")]
    pub kind: WaitingTimeKind,
    pub value: Option<String>,
}

impl WaitingTime {
    fn of(kind: WaitingTimeKind) -> Self {
        Self { kind, value: None }
    }

    fn minutes(value: &str) -> Self {
        Self {
            kind: WaitingTimeKind::Time,
            value: Some(value.to_string()),
        }
    }
}

/// Literal status vocabulary, matched on trimmed lowercased input.
/// The suspended marker contains a form feed exactly as the upstream emits it.
const STATUS_TABLE: &[(&str, WaitingTimeKind)] = &[
    ("ricalcolo", WaitingTimeKind::Reloading),
    ("+30 min", WaitingTimeKind::Plus30),
    ("serale", WaitingTimeKind::Nightly),
    ("in arrivo", WaitingTimeKind::Arriving),
    ("in coda", WaitingTimeKind::Waiting),
    ("no serv.", WaitingTimeKind::NoService),
    ("fermata\u{0C}sospesa", WaitingTimeKind::Suspended),
];

/// Leading minute countdown, e.g. "12 min" or "3min".
static MINUTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(\d+)\s*min").unwrap());

/// Classify a raw waiting-time message.
///
/// Unknown or absent input maps to [`WaitingTimeKind::None`]; absence of a
/// recognized status is a valid outcome, not an error.
pub fn classify(raw: Option<&str>) -> WaitingTime {
    let Some(raw) = raw else {
        return WaitingTime::of(WaitingTimeKind::None);
    };

    let normalized = raw.trim().to_lowercase();

    if let Some((_, kind)) = STATUS_TABLE.iter().find(|(literal, _)| *literal == normalized) {
        return WaitingTime::of(*kind);
    }

    if let Some(caps) = MINUTES.captures(normalized.trim()) {
        return WaitingTime::minutes(&caps[1]);
    }

    WaitingTime::of(WaitingTimeKind::None)
}
