//! SRT (SubRip) parsing
//!
//! Turns normalized UTF-8 text into an ordered list of [`SubtitleRecord`]s.
//! Timestamps are kept in their SRT textual form; the VTT generator does the
//! separator conversion.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SubtitleError};

/// A single subtitle block as it appeared in the SRT source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleRecord {
    /// Sequence number from the index line (not checked for monotonicity)
    pub index: u32,
    /// Start time, `HH:MM:SS,mmm`
    pub start_time: String,
    /// End time, `HH:MM:SS,mmm`
    pub end_time: String,
    /// Cue text, internal newlines preserved
    pub text: String,
}

/// A parsed SRT timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub milliseconds: u16,
}

impl Timestamp {
    /// Total offset in milliseconds
    pub fn total_milliseconds(&self) -> u64 {
        ((self.hours as u64 * 60 + self.minutes as u64) * 60 + self.seconds as u64) * 1000
            + self.milliseconds as u64
    }

    /// Format as `HH:MM:SS.mmm`
    pub fn to_vtt_string(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            self.hours, self.minutes, self.seconds, self.milliseconds
        )
    }
}

impl fmt::Display for Timestamp {
    /// SRT form, `HH:MM:SS,mmm`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours, self.minutes, self.seconds, self.milliseconds
        )
    }
}

fn is_index_line(line: &str) -> bool {
    regex!(r"^[0-9]+$").is_match(line.trim())
}

/// Loose check used by the block-boundary lookahead
fn looks_like_timing_line(line: &str) -> bool {
    line.contains("-->")
}

/// Strip a leading BOM and normalize CRLF / CR to LF
fn normalize(content: &str) -> String {
    content
        .strip_prefix('\u{FEFF}')
        .unwrap_or(content)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

/// Decide whether the blank line at `pos` closes the current block.
///
/// It does when the next non-blank line is numeric and the line after that
/// is a timing line, or when only blank lines remain. Anything else keeps the
/// blank line as part of a multi-paragraph cue.
fn blank_line_ends_block(lines: &[&str], pos: usize) -> bool {
    let mut next = pos + 1;
    while next < lines.len() && lines[next].trim().is_empty() {
        next += 1;
    }
    if next >= lines.len() {
        return true;
    }
    is_index_line(lines[next])
        && lines
            .get(next + 1)
            .is_some_and(|line| looks_like_timing_line(line))
}

/// Parse SRT content into subtitle records.
pub fn parse_srt(content: &str) -> Result<Vec<SubtitleRecord>> {
    let normalized = normalize(content);
    let lines: Vec<&str> = normalized.split('\n').collect();
    let mut records = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        // Skip blank lines between blocks
        if lines[i].trim().is_empty() {
            i += 1;
            continue;
        }

        // Index line
        let index_line = lines[i].trim();
        if !is_index_line(index_line) {
            return Err(SubtitleError::InvalidFormat(format!(
                "Invalid subtitle index at line {}: \"{}\"",
                i + 1,
                lines[i]
            )));
        }
        let index: u32 = index_line.parse().map_err(|_| {
            SubtitleError::InvalidFormat(format!(
                "Subtitle index out of range at line {}: \"{}\"",
                i + 1,
                index_line
            ))
        })?;
        i += 1;

        // Timing line
        let Some(timing_line) = lines.get(i) else {
            return Err(SubtitleError::InvalidFormat(format!(
                "Missing timestamp line for subtitle {}",
                index
            )));
        };
        let caps = regex!(r"^([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3})\s*-->\s*([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3})$")
            .captures(timing_line.trim())
            .ok_or_else(|| {
                SubtitleError::InvalidFormat(format!(
                    "Invalid timestamp format at line {}: \"{}\"",
                    i + 1,
                    timing_line
                ))
            })?;
        let start_time = caps[1].to_string();
        let end_time = caps[2].to_string();
        i += 1;

        // Text lines
        let mut text_lines = Vec::new();
        while i < lines.len() {
            if lines[i].trim().is_empty() && blank_line_ends_block(&lines, i) {
                break;
            }
            text_lines.push(lines[i]);
            i += 1;
        }

        let text = text_lines.join("\n").trim().to_string();
        if text.is_empty() {
            return Err(SubtitleError::InvalidFormat(format!(
                "No text content found for subtitle {}",
                index
            )));
        }

        records.push(SubtitleRecord {
            index,
            start_time,
            end_time,
            text,
        });
    }

    if records.is_empty() {
        return Err(SubtitleError::InvalidFormat(
            "No valid subtitle blocks found".to_string(),
        ));
    }

    tracing::debug!("parsed {} subtitle blocks", records.len());
    Ok(records)
}

/// Check whether content parses as SRT
pub fn validate_srt(content: &str) -> bool {
    parse_srt(content).is_ok()
}

/// Parse a single `HH:MM:SS,mmm` timestamp.
///
/// Only the digit layout is checked; `01:99:99,000` is accepted here.
pub fn parse_timestamp(value: &str) -> Result<Timestamp> {
    let invalid = || SubtitleError::InvalidTimestamp(format!("Invalid timestamp format: {}", value));
    let caps = regex!(r"^([0-9]{2}):([0-9]{2}):([0-9]{2}),([0-9]{3})$")
        .captures(value)
        .ok_or_else(invalid)?;

    Ok(Timestamp {
        hours: caps[1].parse().map_err(|_| invalid())?,
        minutes: caps[2].parse().map_err(|_| invalid())?,
        seconds: caps[3].parse().map_err(|_| invalid())?,
        milliseconds: caps[4].parse().map_err(|_| invalid())?,
    })
}

/// Extract the spoken text of an SRT document, one space between lines.
///
/// Index and timing lines are dropped from every block.
pub fn extract_srt_text(content: &str) -> String {
    let normalized = normalize(content);
    let mut words = Vec::new();

    for block in regex!(r"\n[ \t]*\n").split(&normalized) {
        for (n, line) in block.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || looks_like_timing_line(line) {
                continue;
            }
            if n == 0 && is_index_line(line) {
                continue;
            }
            words.push(line);
        }
    }

    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BLOCKS: &str = "1\n00:00:01,000 --> 00:00:03,000\nHello world\n\n2\n00:00:04,000 --> 00:00:06,000\nThis is a test subtitle";

    #[test]
    fn test_parse_basic() {
        let records = parse_srt(TWO_BLOCKS).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            SubtitleRecord {
                index: 1,
                start_time: "00:00:01,000".to_string(),
                end_time: "00:00:03,000".to_string(),
                text: "Hello world".to_string(),
            }
        );
        assert_eq!(records[1].index, 2);
        assert_eq!(records[1].text, "This is a test subtitle");
    }

    #[test]
    fn test_parse_crlf_bom_and_extra_blank_lines() {
        let content = "\u{FEFF}\r\n1\r\n00:00:01,000 --> 00:00:02,500\r\nLine one\r\nLine two\r\n\r\n\r\n2\r00:00:03,000-->00:00:04,000\rBye\r\n\r\n";
        let records = parse_srt(content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "Line one\nLine two");
        assert_eq!(records[1].start_time, "00:00:03,000");
        assert_eq!(records[1].text, "Bye");
    }

    #[test]
    fn test_multi_paragraph_text_is_preserved() {
        let content = "1\n00:00:01,000 --> 00:00:03,000\nFirst paragraph\n\nSecond paragraph\n\n2\n00:00:04,000 --> 00:00:05,000\nNext";
        let records = parse_srt(content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "First paragraph\n\nSecond paragraph");
    }

    #[test]
    fn test_stray_number_mid_paragraph_without_timing_stays_text() {
        let content = "1\n00:00:01,000 --> 00:00:03,000\nCount down\n\n42\nstill talking\n\n2\n00:00:04,000 --> 00:00:05,000\nNext";
        let records = parse_srt(content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "Count down\n\n42\nstill talking");
    }

    #[test]
    fn test_invalid_index_line() {
        let content = "abc\n00:00:01,000 --> 00:00:03,000\nHello";
        assert!(!validate_srt(content));
        let err = parse_srt(content).unwrap_err();
        assert!(err.to_string().contains("Invalid SRT format"));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_invalid_timing_line() {
        let content = "1\n00:00:01.000 --> 00:00:03.000\nHello";
        let err = parse_srt(content).unwrap_err();
        assert!(matches!(err, SubtitleError::InvalidFormat(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_non_ascii_digits_are_rejected() {
        // Arabic-Indic digits in the timing line
        let content = "1\n00:00:0\u{0661},\u{0660}\u{0660}\u{0660} --> 00:00:02,000\nHi";
        let err = parse_srt(content).unwrap_err();
        assert!(err.to_string().contains("Invalid timestamp format at line 2"));

        let err = parse_srt("\u{0661}\u{0662}\n00:00:01,000 --> 00:00:02,000\nHi").unwrap_err();
        assert!(err.to_string().contains("Invalid subtitle index at line 1"));

        assert!(parse_timestamp("00:00:0\u{0661},000").is_err());
    }

    #[test]
    fn test_missing_timing_line() {
        let err = parse_srt("1").unwrap_err();
        assert!(err.to_string().contains("Missing timestamp line for subtitle 1"));
    }

    #[test]
    fn test_block_without_text() {
        let content = "1\n00:00:01,000 --> 00:00:03,000\n\n2\n00:00:04,000 --> 00:00:06,000\nHi";
        let err = parse_srt(content).unwrap_err();
        assert!(err.to_string().contains("No text content found for subtitle 1"));
    }

    #[test]
    fn test_empty_content() {
        for content in ["", "   ", "\n\n\r\n"] {
            let err = parse_srt(content).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Invalid SRT format: No valid subtitle blocks found"
            );
        }
    }

    #[test]
    fn test_parser_accepts_out_of_range_minutes() {
        let content = "1\n01:99:99,000 --> 01:99:99,500\nOdd";
        assert!(validate_srt(content));
    }

    #[test]
    fn test_validate_agrees_with_parse() {
        for content in [TWO_BLOCKS, "", "x", "1\n00:00:01,000 --> 00:00:02,000\n"] {
            assert_eq!(validate_srt(content), parse_srt(content).is_ok());
        }
    }

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("01:02:03,456").unwrap();
        assert_eq!(
            ts,
            Timestamp {
                hours: 1,
                minutes: 2,
                seconds: 3,
                milliseconds: 456
            }
        );
        assert_eq!(ts.total_milliseconds(), 3_723_456);
        assert_eq!(ts.to_string(), "01:02:03,456");
        assert_eq!(ts.to_vtt_string(), "01:02:03.456");
    }

    #[test]
    fn test_parse_timestamp_rejects_bad_layout() {
        for bad in ["01:02:03.456", "1:02:03,456", "01:02:03,45", "01:02,456", "", " 01:02:03,456"] {
            let err = parse_timestamp(bad).unwrap_err();
            assert!(err.to_string().starts_with("Invalid timestamp format"), "{}", bad);
        }
    }

    #[test]
    fn test_extract_srt_text() {
        assert_eq!(
            extract_srt_text(TWO_BLOCKS),
            "Hello world This is a test subtitle"
        );
        let multi = "1\n00:00:01,000 --> 00:00:02,000\nline a\nline b\n";
        assert_eq!(extract_srt_text(multi), "line a line b");
    }
}
