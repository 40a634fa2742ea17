//! Route-text segmentation.
//!
//! After the mode prefix has been removed, a description remainder such as
//! "Rogoredo - Famagosta e Abbiategrasso - Famagosta" still encodes the
//! route topology: " e " joins parallel segments, " - " separates the
//! termini of one segment, and "(Circolare ...)" marks a circular route
//! whose start and end coincide.

use once_cell::sync::Lazy;
use regex::Regex;

use super::text::{ALTERNATIVE_SEPARATOR, parse_location_name};

/// "(Circolare ...)" annotation anchored at the end of a terminus name.
static CIRCULAR_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*\(Circolare.*?\)$").unwrap());

/// Any "circolare" annotation, with or without parentheses.
static CIRCULAR_ANYWHERE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\(?circolare[^)]*\)?").unwrap());

static CON_DIR_INFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i) con dir\. ").unwrap());

fn contains_circolare(s: &str) -> bool {
    s.to_lowercase().contains("circolare")
}

/// Split route text into joined start and end terminus lists.
///
/// Returns `(start_points, end_points)`, each the collected terminus names
/// joined by `/`. Both are `None` when no segment yields a terminus pair;
/// they are always produced together or not at all.
pub fn split_route(route_text: &str) -> (Option<String>, Option<String>) {
    let route_text = route_text.trim();

    // "con dir." introduces branch destinations, so an " e " inside the text
    // joins alternative names, not parallel segments. Keep it whole.
    let segments: Vec<&str> = if route_text.is_empty() {
        Vec::new()
    } else if CON_DIR_INFIX.is_match(route_text) {
        vec![route_text]
    } else {
        route_text.split(" e ").collect()
    };

    let mut starts: Vec<String> = Vec::new();
    let mut ends: Vec<String> = Vec::new();

    let segment_count = segments.len();
    for segment in segments {
        let segment = segment.trim();
        let parts: Vec<&str> = segment.split(" - ").collect();

        match parts.len() {
            2 => {
                let start = parse_location_name(parts[0].trim());
                let end = parse_location_name(parts[1].trim());
                starts.push(start);
                ends.push(strip_circular_suffix(&end));
            }
            1 if segment_count == 1 => {
                let single = parts[0].trim();
                if contains_circolare(single) {
                    let mut name = CIRCULAR_ANYWHERE.replace_all(single, "").trim().to_string();
                    // "(Circolare unica)" strips to nothing; the raw text is
                    // the only name we have.
                    if name.is_empty() && single.to_lowercase().contains("unica") {
                        name = single.to_string();
                    }
                    let name = parse_location_name(&name);
                    starts.push(name.clone());
                    ends.push(name);
                }
                // A circular description is terminal either way.
                break;
            }
            n if n > 2 && contains_circolare(segment) => {
                // Some circular routes repeat the terminus verbatim as the
                // last two parts; use the repeated name. Anything else falls
                // back to the whole segment.
                if parts[n - 2].trim() == parts[n - 1].trim() {
                    let name = parse_location_name(parts[n - 1].trim());
                    starts.push(name.clone());
                    ends.push(name);
                } else {
                    let name = parse_location_name(segment);
                    starts.push(name.clone());
                    ends.push(name);
                }
            }
            n if n > 2 => {
                // Intermediate points are dropped; only the outer termini count.
                let start = parse_location_name(parts[0].trim());
                let end = parse_location_name(parts[n - 1].trim());
                starts.push(start);
                ends.push(strip_circular_suffix(&end));
            }
            // Orphan fragment of a multi-segment route ("... e C"): skip it.
            _ => {}
        }
    }

    (join_points(&starts), join_points(&ends))
}

fn strip_circular_suffix(name: &str) -> String {
    CIRCULAR_SUFFIX.replace(name, "").trim().to_string()
}

fn join_points(points: &[String]) -> Option<String> {
    if points.is_empty() {
        return None;
    }
    Some(
        points
            .iter()
            .filter(|p| !p.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(ALTERNATIVE_SEPARATOR),
    )
}
