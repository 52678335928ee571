//! WebVTT compliance checking
//!
//! Two entry points over the same set of rules:
//! - [`validate_vtt_format`] stops at the first violation (generation gate)
//! - [`validate_bunny_stream_compliance`] evaluates every rule and reports
//!   errors and style warnings without failing

use serde::{Deserialize, Serialize};

use crate::error::{Result, SubtitleError};

const MSG_EMPTY: &str = "VTT content must be a non-empty string";
const MSG_BOM: &str = "VTT content must not start with a BOM (byte order mark)";
const MSG_HEADER: &str = "VTT content must start with \"WEBVTT\" followed by a newline";
const MSG_EMPTY_LINE: &str = "WEBVTT header must be followed by an empty line";
const MSG_TIMESTAMPS: &str = "No valid VTT timestamps found (expected HH:MM:SS.mmm --> HH:MM:SS.mmm)";
const MSG_UTF8: &str = "Content contains replacement characters (lossy UTF-8 decoding upstream)";

/// Outcome of each compliance rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceChecks {
    #[serde(rename = "noBOM")]
    pub no_bom: bool,
    pub has_webvtt_header: bool,
    pub has_empty_line_after_header: bool,
    pub no_sequence_numbers: bool,
    pub valid_timestamps: bool,
    pub utf8_encoding: bool,
}

impl ComplianceChecks {
    /// Whether every rule passed
    pub fn all_passed(&self) -> bool {
        self.no_bom
            && self.has_webvtt_header
            && self.has_empty_line_after_header
            && self.no_sequence_numbers
            && self.valid_timestamps
            && self.utf8_encoding
    }
}

/// Result of a full compliance run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub is_valid: bool,
    #[serde(rename = "compliance")]
    pub checks: ComplianceChecks,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

fn has_valid_timestamp(content: &str) -> bool {
    regex!(r"[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3}[ \t]+-->[ \t]+[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3}").is_match(content)
}

fn is_timing_line(line: &str) -> bool {
    regex!(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3}[ \t]+-->").is_match(line.trim())
}

/// 1-based line number of the first numeric line directly above a timing line
fn find_sequence_number(content: &str) -> Option<usize> {
    let lines: Vec<&str> = content.split('\n').collect();
    lines.windows(2).position(|pair| {
        regex!(r"^[0-9]+$").is_match(pair[0].trim()) && is_timing_line(pair[1])
    })
    .map(|i| i + 1)
}

fn sequence_number_message(line: usize) -> String {
    format!(
        "Sequence number found at line {}: cue numbers are not allowed",
        line
    )
}

/// Validate a WebVTT document, failing on the first violated rule.
///
/// Rules are checked in a fixed order so the reported message is
/// deterministic: empty, BOM, header, empty line, timestamps, sequence numbers.
pub fn validate_vtt_format(content: &str) -> Result<()> {
    if content.is_empty() {
        return Err(SubtitleError::Compliance(MSG_EMPTY.to_string()));
    }
    if content.starts_with('\u{FEFF}') {
        return Err(SubtitleError::Compliance(MSG_BOM.to_string()));
    }
    if !content.starts_with("WEBVTT\n") {
        return Err(SubtitleError::Compliance(MSG_HEADER.to_string()));
    }
    if !content.starts_with("WEBVTT\n\n") {
        return Err(SubtitleError::Compliance(MSG_EMPTY_LINE.to_string()));
    }
    if !has_valid_timestamp(content) {
        return Err(SubtitleError::Compliance(MSG_TIMESTAMPS.to_string()));
    }
    if let Some(line) = find_sequence_number(content) {
        return Err(SubtitleError::Compliance(sequence_number_message(line)));
    }
    Ok(())
}

/// Evaluate every compliance rule and collect errors and warnings.
pub fn validate_bunny_stream_compliance(content: &str) -> ComplianceReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if content.is_empty() {
        errors.push(MSG_EMPTY.to_string());
    }

    let sequence_line = find_sequence_number(content);
    let checks = ComplianceChecks {
        no_bom: !content.starts_with('\u{FEFF}'),
        has_webvtt_header: content.starts_with("WEBVTT\n"),
        has_empty_line_after_header: content.starts_with("WEBVTT\n\n"),
        no_sequence_numbers: sequence_line.is_none(),
        valid_timestamps: has_valid_timestamp(content),
        utf8_encoding: !content.contains('\u{FFFD}'),
    };

    if !checks.no_bom {
        errors.push(MSG_BOM.to_string());
    }
    if !checks.has_webvtt_header {
        errors.push(MSG_HEADER.to_string());
    }
    if !checks.has_empty_line_after_header {
        errors.push(MSG_EMPTY_LINE.to_string());
    }
    if !checks.valid_timestamps {
        errors.push(MSG_TIMESTAMPS.to_string());
    }
    if let Some(line) = sequence_line {
        errors.push(sequence_number_message(line));
    }
    if !checks.utf8_encoding {
        errors.push(MSG_UTF8.to_string());
    }

    // Style warnings
    if content.contains("\r\n") {
        warnings.push("Content uses CRLF line endings; LF is recommended".to_string());
    }
    if content.contains('\t') {
        warnings.push("Content contains tab characters".to_string());
    }
    let body = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    if let Some(first_line) = body.split('\n').next() {
        if first_line.trim() == "WEBVTT" && first_line != "WEBVTT" {
            warnings.push("Whitespace found around the WEBVTT header".to_string());
        }
    }

    ComplianceReport {
        is_valid: checks.all_passed() && errors.is_empty(),
        checks,
        errors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "WEBVTT\n\n00:00:01.000 --> 00:00:03.000\nHello world\n\n";

    #[test]
    fn test_validate_accepts_valid_document() {
        assert!(validate_vtt_format(VALID).is_ok());
    }

    #[test]
    fn test_validate_check_order() {
        let cases = [
            ("", MSG_EMPTY),
            ("\u{FEFF}WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHi\n\n", MSG_BOM),
            ("WEBVTT 00:00:01.000 --> 00:00:02.000", MSG_HEADER),
            (" WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHi\n\n", MSG_HEADER),
            ("WEBVTT\n00:00:01.000 --> 00:00:02.000\nHi\n\n", MSG_EMPTY_LINE),
            ("WEBVTT\n\n00:00:01,000 --> 00:00:02,000\nHi\n\n", MSG_TIMESTAMPS),
        ];
        for (content, expected) in cases {
            let err = validate_vtt_format(content).unwrap_err();
            assert_eq!(err, SubtitleError::Compliance(expected.to_string()), "{:?}", content);
        }
    }

    #[test]
    fn test_validate_detects_sequence_numbers() {
        let content = "WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.000\nHi\n\n";
        let err = validate_vtt_format(content).unwrap_err();
        assert!(err.to_string().contains("Sequence number found at line 3"));
    }

    #[test]
    fn test_numeric_text_is_not_a_sequence_number() {
        let content = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\n42\n\n00:00:03.000 --> 00:00:04.000\nHi\n\n";
        assert!(validate_vtt_format(content).is_ok());
    }

    #[test]
    fn test_non_ascii_digits_are_not_timestamps() {
        let content = "WEBVTT\n\n00:00:0\u{0661}.\u{0660}\u{0660}\u{0660} --> 00:00:02.000\nHi\n\n";
        let err = validate_vtt_format(content).unwrap_err();
        assert_eq!(err, SubtitleError::Compliance(MSG_TIMESTAMPS.to_string()));

        let report = validate_bunny_stream_compliance(content);
        assert!(!report.checks.valid_timestamps);
        assert!(!report.is_valid);
    }

    #[test]
    fn test_report_on_valid_document() {
        let report = validate_bunny_stream_compliance(VALID);
        assert!(report.is_valid);
        assert!(report.checks.all_passed());
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_report_bom() {
        let report = validate_bunny_stream_compliance(
            "\u{FEFF}WEBVTT\n\n00:00:01.000 --> 00:00:03.000\nHi\n\n",
        );
        assert!(!report.checks.no_bom);
        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|e| e.contains("BOM")));
    }

    #[test]
    fn test_report_collects_every_violation() {
        let report = validate_bunny_stream_compliance("WEBVTT\n1\n00:00:01,000 --> 00:00:02,000\nHi");
        assert!(!report.is_valid);
        assert!(report.checks.has_webvtt_header);
        assert!(!report.checks.has_empty_line_after_header);
        assert!(!report.checks.valid_timestamps);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_report_warnings() {
        let content = "WEBVTT \r\n\r\n00:00:01.000 --> 00:00:02.000\r\n\tHi\r\n\r\n";
        let report = validate_bunny_stream_compliance(content);
        assert!(!report.is_valid);
        assert_eq!(report.warnings.len(), 3);
    }

    #[test]
    fn test_report_replacement_characters() {
        let report = validate_bunny_stream_compliance(
            "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nM\u{FFFD}ller\n\n",
        );
        assert!(!report.checks.utf8_encoding);
        assert!(!report.is_valid);
        assert!(validate_vtt_format("WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nM\u{FFFD}ller\n\n").is_ok());
    }

    #[test]
    fn test_strict_failure_implies_report_errors() {
        let inputs = [
            "",
            "WEBVTT",
            "\u{FEFF}WEBVTT\n\n",
            "WEBVTT\n\nno cues",
            "WEBVTT\n\n3\n00:00:01.000 --> 00:00:02.000\nHi\n\n",
            "webvtt\n\n00:00:01.000 --> 00:00:02.000\nHi\n\n",
            VALID,
        ];
        for content in inputs {
            if validate_vtt_format(content).is_err() {
                let report = validate_bunny_stream_compliance(content);
                assert!(!report.is_valid, "{:?}", content);
                assert!(!report.errors.is_empty(), "{:?}", content);
            }
        }
    }

    #[test]
    fn test_report_serializes_field_names() {
        let json = serde_json::to_value(validate_bunny_stream_compliance(VALID)).unwrap();
        assert_eq!(json["isValid"], true);
        assert_eq!(json["compliance"]["noBOM"], true);
        assert_eq!(json["compliance"]["hasWebvttHeader"], true);
        assert_eq!(json["compliance"]["noSequenceNumbers"], true);
    }
}
