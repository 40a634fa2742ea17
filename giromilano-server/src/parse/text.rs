//! Terminus-name text handling.
//!
//! Route descriptions carry cosmetic markers ("SOSTITUTIVO", "NOTTURNA",
//! a leading night-route code) and ad-hoc join syntax ("con dir.", " e ")
//! that must be stripped or expanded before a terminus name is usable.

use once_cell::sync::Lazy;
use regex::Regex;

/// Separator between alternative terminus names in the output.
pub const ALTERNATIVE_SEPARATOR: &str = "/";

static SOSTITUTIVO_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^SOSTITUTIVO\s*").unwrap());

static NOTTURNA_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^NOTTURNA\s*").unwrap());

/// Night-route marker, e.g. "N15 - " or "NQuarto - ".
static NIGHT_CODE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^N\w*\s*-\s*").unwrap());

/// Branch indicator: "<trunk> con dir. <branches>".
static CON_DIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(.*?) con dir\. (.*?)$").unwrap());

/// Strip known cosmetic prefixes from a description fragment.
///
/// Removes, in order and each only if present: a leading "SOSTITUTIVO"
/// marker, a leading "NOTTURNA" marker, and a leading night-route marker of
/// the form `N<code> - `. All matches are case-insensitive. Any input is
/// accepted; absence of a marker is a no-op.
pub fn normalize(raw: &str) -> String {
    let s = raw.trim();
    let s = SOSTITUTIVO_PREFIX.replace(s, "");
    let s = NOTTURNA_PREFIX.replace(s.trim_start(), "");
    let s = NIGHT_CODE_PREFIX.replace(s.trim_start(), "");
    s.trim().to_string()
}

/// Resolve a terminus candidate into its alternative names joined by `/`.
///
/// A candidate like "Milano con dir. Nord e Sud" names a trunk plus
/// branches; the trunk and every branch become alternatives in textual
/// order. Without "con dir.", a bare " e " still separates alternatives.
/// Anything else is returned trimmed and unchanged. Empty input yields
/// empty output.
pub fn parse_location_name(raw: &str) -> String {
    let name = normalize(raw);

    if let Some(caps) = CON_DIR.captures(&name) {
        let trunk = caps.get(1).map_or("", |m| m.as_str()).trim();
        let branches = caps.get(2).map_or("", |m| m.as_str()).trim();

        let mut alternatives: Vec<&str> = Vec::new();
        alternatives.extend(split_alternatives(trunk));
        alternatives.extend(split_alternatives(branches));
        return alternatives.join(ALTERNATIVE_SEPARATOR);
    }

    if name.contains(" e ") {
        return split_alternatives(&name).join(ALTERNATIVE_SEPARATOR);
    }

    name
}

/// Split on the literal ` e `, trimming and dropping empty pieces.
fn split_alternatives(s: &str) -> Vec<&str> {
    s.split(" e ")
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_plain_text_untouched() {
        assert_eq!(normalize("Rogoredo"), "Rogoredo");
        assert_eq!(normalize("  Rogoredo  "), "Rogoredo");
    }

    #[test]
    fn normalize_strips_sostitutivo() {
        assert_eq!(normalize("SOSTITUTIVO Famagosta"), "Famagosta");
        assert_eq!(normalize("sostitutivo Famagosta"), "Famagosta");
    }

    #[test]
    fn normalize_strips_notturna() {
        assert_eq!(normalize("NOTTURNA Centrale"), "Centrale");
    }

    #[test]
    fn normalize_strips_night_code_marker() {
        assert_eq!(normalize("N15 - Duomo"), "Duomo");
        assert_eq!(normalize("N27-Lambrate"), "Lambrate");
    }

    #[test]
    fn normalize_strips_stacked_markers() {
        assert_eq!(normalize("SOSTITUTIVO NOTTURNA N42 - Bisceglie"), "Bisceglie");
    }

    #[test]
    fn normalize_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn location_plain_name() {
        assert_eq!(parse_location_name("Rogoredo FS"), "Rogoredo FS");
    }

    #[test]
    fn location_con_dir_with_branches() {
        assert_eq!(
            parse_location_name("Milano con dir. Nord e Sud"),
            "Milano/Nord/Sud"
        );
    }

    #[test]
    fn location_con_dir_case_insensitive() {
        assert_eq!(
            parse_location_name("Milano CON DIR. Nord"),
            "Milano/Nord"
        );
    }

    #[test]
    fn location_con_dir_trunk_with_e() {
        assert_eq!(
            parse_location_name("Baggio e Olmi con dir. Quinto Romano"),
            "Baggio/Olmi/Quinto Romano"
        );
    }

    #[test]
    fn location_plain_e_join() {
        assert_eq!(parse_location_name("Baggio e Olmi"), "Baggio/Olmi");
    }

    #[test]
    fn location_e_join_drops_empty_pieces() {
        assert_eq!(parse_location_name("Baggio e  e Olmi"), "Baggio/Olmi");
    }

    #[test]
    fn location_empty_input() {
        assert_eq!(parse_location_name(""), "");
    }

    #[test]
    fn location_word_containing_e_not_split() {
        // " e " requires surrounding spaces; "Sesto" must not split.
        assert_eq!(parse_location_name("Sesto FS"), "Sesto FS");
    }
}
