//! Line-description classification.
//!
//! The upstream `LineDescription` field mixes several grammars:
//! "Linea M3 Comasina - San Donato (Gialla)", "Tram 19 ...", "Bus 57 ...",
//! night buses "N42 - ..." and "Bus 90 N90 - ...", plus descriptions with
//! no recognizable prefix at all. Classification is an ordered rule table
//! evaluated top-down; the first matching rule wins, so precedence is
//! explicit and testable rule by rule.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::route::split_route;

/// Metro line colour annotation, e.g. "(Rossa)".
static METRO_COLOUR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*\((Rossa|Verde|Gialla|Blu|Lilla)\)").unwrap());

/// A parsed route description.
///
/// `start_points` and `end_points` each join alternative terminus names
/// with `/`. They are produced together: one is `None` iff the other is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedRoute {
    /// Transit-mode-qualified line code ("M1", "19", "91/N91").
    pub mode_code: Option<String>,
    /// Ordered alternative start termini joined by `/`.
    pub start_points: Option<String>,
    /// Ordered alternative end termini joined by `/`.
    pub end_points: Option<String>,
}

/// Extracts `(mode_code, route_remainder)` from a rule match.
type Extractor = fn(&Captures) -> (String, String);

/// The ordered classification rules. First match wins.
static RULES: Lazy<Vec<(Regex, Extractor)>> = Lazy::new(|| {
    vec![
        // "Linea M1 Sesto FS - Rho Fiera (Rossa)"
        (Regex::new(r"^Linea (M\d+)\s*(.*)").unwrap(), extract_metro as Extractor),
        // "Metro leggera Cascina Gobba - Ospedale San Raffaele"
        (Regex::new(r"^Metro leggera\s*(.*)").unwrap(), extract_mela),
        // "Tram 19 Rogoredo - Famagosta"
        (Regex::new(r"^Tram (\d+)\s*(.*)").unwrap(), extract_plain_code),
        // "Bus 90 N90 - Lotto - Isonzo" (day line with a night variant)
        (
            Regex::new(r"(?i)^Bus\s+(\w*)\s*N\d*\s*- \s*(.*)").unwrap(),
            extract_night_pair,
        ),
        // "N42 - Centrale - Quarto Oggiaro"
        (Regex::new(r"(?i)^N(\w*)\s*-\s*(.*)").unwrap(), extract_night_pair),
        // "Bus 91 ..." always carries its night twin.
        (Regex::new(r"(?i)^Bus\s+91\s*(.*)").unwrap(), extract_bus_91),
        // "Bus 57 Cairoli - Quarto Oggiaro FS"
        (Regex::new(r"^Bus (\w+)\s*(.*)").unwrap(), extract_plain_code),
    ]
});

fn extract_metro(caps: &Captures) -> (String, String) {
    let rest = caps.get(2).map_or("", |m| m.as_str()).trim();
    let rest = METRO_COLOUR.replace_all(rest, "").trim().to_string();
    (caps[1].to_string(), rest)
}

fn extract_mela(caps: &Captures) -> (String, String) {
    ("MeLa".to_string(), caps[1].trim().to_string())
}

fn extract_plain_code(caps: &Captures) -> (String, String) {
    (caps[1].trim().to_string(), caps[2].trim().to_string())
}

fn extract_night_pair(caps: &Captures) -> (String, String) {
    let code = caps[1].trim();
    (format!("{code}/N{code}"), caps[2].trim().to_string())
}

fn extract_bus_91(caps: &Captures) -> (String, String) {
    ("91/N91".to_string(), caps[1].trim().to_string())
}

/// Classify a line description and extract its mode code and termini.
///
/// `from_stop` selects the fallback when no rule matches: in a stop context
/// the description is treated as pure route text with no extractable code;
/// otherwise the first whitespace-delimited token is taken as the code.
/// A `None` description yields an all-`None` result.
pub fn parse_description(description: Option<&str>, from_stop: bool) -> ParsedRoute {
    let Some(description) = description else {
        return ParsedRoute::default();
    };

    let mut mode_code: Option<String> = None;
    let mut route_text: String = description.to_string();

    let matched = RULES.iter().find_map(|(pattern, extract)| {
        pattern.captures(description).map(|caps| extract(&caps))
    });

    match matched {
        Some((code, rest)) => {
            mode_code = Some(code);
            route_text = rest;
        }
        None if !from_stop => {
            if !description.is_empty() {
                let mut pieces = description.splitn(2, ' ');
                mode_code = pieces.next().map(str::to_string);
                route_text = pieces.next().unwrap_or("").trim().to_string();
            } else {
                route_text = String::new();
            }
        }
        // Stop context: no code, the whole description is route text.
        None => {}
    }

    let (start_points, end_points) = split_route(&route_text);

    ParsedRoute {
        mode_code: mode_code.map(|c| c.trim().to_string()),
        start_points,
        end_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(desc: &str) -> ParsedRoute {
        parse_description(Some(desc), false)
    }

    #[test]
    fn none_description() {
        assert_eq!(parse_description(None, false), ParsedRoute::default());
        assert_eq!(parse_description(None, true), ParsedRoute::default());
    }

    #[test]
    fn tram_line() {
        let parsed = parse("Tram 19 Rogoredo - Famagosta");
        assert_eq!(parsed.mode_code.as_deref(), Some("19"));
        assert_eq!(parsed.start_points.as_deref(), Some("Rogoredo"));
        assert_eq!(parsed.end_points.as_deref(), Some("Famagosta"));
    }

    #[test]
    fn metro_line_with_colour() {
        let parsed = parse("Linea M1 Sesto FS - Rho Fiera (Rossa)");
        assert_eq!(parsed.mode_code.as_deref(), Some("M1"));
        assert_eq!(parsed.start_points.as_deref(), Some("Sesto FS"));
        assert_eq!(parsed.end_points.as_deref(), Some("Rho Fiera"));
    }

    #[test]
    fn metro_colour_case_insensitive() {
        let parsed = parse("Linea M3 Comasina - San Donato (gialla)");
        assert_eq!(parsed.mode_code.as_deref(), Some("M3"));
        assert_eq!(parsed.end_points.as_deref(), Some("San Donato"));
    }

    #[test]
    fn metro_leggera() {
        let parsed = parse("Metro leggera Cascina Gobba - Ospedale San Raffaele");
        assert_eq!(parsed.mode_code.as_deref(), Some("MeLa"));
        assert_eq!(parsed.start_points.as_deref(), Some("Cascina Gobba"));
        assert_eq!(parsed.end_points.as_deref(), Some("Ospedale San Raffaele"));
    }

    #[test]
    fn bus_with_night_twin() {
        let parsed = parse("Bus 90 N90 - Lotto - Isonzo");
        assert_eq!(parsed.mode_code.as_deref(), Some("90/N90"));
        assert_eq!(parsed.start_points.as_deref(), Some("Lotto"));
        assert_eq!(parsed.end_points.as_deref(), Some("Isonzo"));
    }

    #[test]
    fn bare_night_line() {
        let parsed = parse("N42 - Centrale - Quarto Oggiaro");
        assert_eq!(parsed.mode_code.as_deref(), Some("42/N42"));
        assert_eq!(parsed.start_points.as_deref(), Some("Centrale"));
        assert_eq!(parsed.end_points.as_deref(), Some("Quarto Oggiaro"));
    }

    #[test]
    fn bus_91_hardcoded() {
        let parsed = parse("Bus 91 Famagosta - Lodi T.I.B.B.");
        assert_eq!(parsed.mode_code.as_deref(), Some("91/N91"));
        assert_eq!(parsed.start_points.as_deref(), Some("Famagosta"));
        assert_eq!(parsed.end_points.as_deref(), Some("Lodi T.I.B.B."));
    }

    #[test]
    fn plain_bus() {
        let parsed = parse("Bus 57 Cairoli - Quarto Oggiaro FS");
        assert_eq!(parsed.mode_code.as_deref(), Some("57"));
        assert_eq!(parsed.start_points.as_deref(), Some("Cairoli"));
        assert_eq!(parsed.end_points.as_deref(), Some("Quarto Oggiaro FS"));
    }

    #[test]
    fn night_pair_precedes_plain_bus() {
        // "Bus 90 N90 - ..." must hit the night rule, not "Bus <word>".
        let parsed = parse("Bus 90 N90 - A - B");
        assert_eq!(parsed.mode_code.as_deref(), Some("90/N90"));
    }

    #[test]
    fn bus_91_precedes_plain_bus() {
        let parsed = parse("Bus 91 A - B");
        assert_eq!(parsed.mode_code.as_deref(), Some("91/N91"));
    }

    #[test]
    fn unmatched_takes_first_token_outside_stop_context() {
        let parsed = parse("Filobus 92 Bovisa FN - Viale Isonzo");
        assert_eq!(parsed.mode_code.as_deref(), Some("Filobus"));
        assert_eq!(parsed.start_points.as_deref(), Some("92 Bovisa FN"));
        assert_eq!(parsed.end_points.as_deref(), Some("Viale Isonzo"));
    }

    #[test]
    fn unmatched_in_stop_context_keeps_code_null() {
        let parsed = parse_description(Some("Filobus 92 Bovisa FN - Viale Isonzo"), true);
        assert_eq!(parsed.mode_code, None);
        // The full description is still handed to the splitter.
        assert!(parsed.start_points.is_some());
    }

    #[test]
    fn empty_description() {
        let parsed = parse("");
        assert_eq!(parsed.mode_code, None);
        assert_eq!(parsed.start_points, None);
        assert_eq!(parsed.end_points, None);
    }

    #[test]
    fn circular_description() {
        let parsed = parse("Bus 76 Lorenteggio (Circolare sinistra)");
        assert_eq!(parsed.mode_code.as_deref(), Some("76"));
        assert_eq!(parsed.start_points.as_deref(), Some("Lorenteggio"));
        assert_eq!(parsed.end_points.as_deref(), Some("Lorenteggio"));
    }

    #[test]
    fn start_and_end_null_together() {
        for desc in [
            "Tram 19 Rogoredo - Famagosta",
            "Bus 57 niente",
            "Linea M1",
            "",
            "parola",
        ] {
            let parsed = parse(desc);
            assert_eq!(
                parsed.start_points.is_none(),
                parsed.end_points.is_none(),
                "input: {desc:?}"
            );
        }
    }
}
