//! Metro status page scraping.
//!
//! ATM publishes the live metro line status only as an HTML table on its
//! homepage, not through the API. The table rows carry the line name in an
//! image `alt` attribute and the status as text; a separate block holds an
//! optional service message. Extraction runs on lazily compiled regexes
//! over the markup; missing pieces yield empty output, never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Status of a single metro line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineStatus {
    /// Line name as published ("M1", "M2", ...).
    pub line: String,
    /// Human-readable status text ("Regolare", ...).
    pub status: String,
}

/// The scraped metro status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetroStatus {
    pub lines: Vec<LineStatus>,
    /// Service-wide message, empty when none is published.
    pub message: String,
}

/// One row of the status table.
static STATUS_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<tr.*?</tr>").unwrap());

/// The line image inside a `StatusLinee_Linea` cell.
static LINE_IMG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)class="[^"]*StatusLinee_Linea[^"]*".*?<img[^>]*\balt="([^"]*)""#).unwrap()
});

/// The status text inside a `StatusLinee_StatoScritta` element.
static STATUS_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)class="[^"]*StatusLinee_StatoScritta[^"]*"[^>]*>(.*?)<"#).unwrap()
});

/// The service message inside a `StatusLinee_Mex_Testo` element.
static MESSAGE_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)class="[^"]*StatusLinee_Mex_Testo[^"]*"[^>]*>(.*?)</"#).unwrap()
});

/// Extract metro line statuses from the homepage markup.
pub fn parse_metro_status(html: &str) -> MetroStatus {
    let mut lines = Vec::new();

    for row in STATUS_ROW.find_iter(html) {
        let row = row.as_str();

        let Some(line) = LINE_IMG
            .captures(row)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
        else {
            continue;
        };
        if line.is_empty() {
            continue;
        }

        let status = STATUS_TEXT
            .captures(row)
            .and_then(|caps| caps.get(1))
            .map_or_else(|| "N/A".to_string(), |m| m.as_str().trim().to_string());

        lines.push(LineStatus { line, status });
    }

    let message = MESSAGE_TEXT
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    MetroStatus { lines, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <div id="StatusLinee">
          <table>
            <tr>
              <td class="StatusLinee_Linea"><img src="m1.png" alt="M1" /></td>
              <td><span class="StatusLinee_StatoScritta">Regolare</span></td>
            </tr>
            <tr>
              <td class="StatusLinee_Linea"><img src="m2.png" alt="M2" /></td>
              <td><span class="StatusLinee_StatoScritta">
                Rallentata
              </span></td>
            </tr>
            <tr>
              <td>a row without a line image</td>
            </tr>
          </table>
        </div>
        <div class="StatusLinee_Mex_Testo">Servizio regolare su tutte le linee</div>
    "#;

    #[test]
    fn parses_line_statuses() {
        let status = parse_metro_status(SAMPLE);

        assert_eq!(status.lines.len(), 2);
        assert_eq!(status.lines[0].line, "M1");
        assert_eq!(status.lines[0].status, "Regolare");
        assert_eq!(status.lines[1].line, "M2");
        assert_eq!(status.lines[1].status, "Rallentata");
    }

    #[test]
    fn parses_service_message() {
        let status = parse_metro_status(SAMPLE);
        assert_eq!(status.message, "Servizio regolare su tutte le linee");
    }

    #[test]
    fn rows_without_line_image_are_skipped() {
        let status = parse_metro_status(SAMPLE);
        assert!(status.lines.iter().all(|l| !l.line.is_empty()));
    }

    #[test]
    fn empty_markup_yields_empty_status() {
        let status = parse_metro_status("");
        assert!(status.lines.is_empty());
        assert!(status.message.is_empty());
    }

    #[test]
    fn missing_status_text_is_not_available() {
        let html = r#"
            <tr>
              <td class="StatusLinee_Linea"><img alt="M3" /></td>
            </tr>
        "#;
        let status = parse_metro_status(html);
        assert_eq!(status.lines.len(), 1);
        assert_eq!(status.lines[0].status, "N/A");
    }

    #[test]
    fn serializes_to_lines_and_message() {
        let json = serde_json::to_value(parse_metro_status(SAMPLE)).unwrap();
        assert_eq!(json["lines"][0]["line"], "M1");
        assert_eq!(json["lines"][0]["status"], "Regolare");
        assert!(json["message"].is_string());
    }
}
