//! Source encoding detection and UTF-8 normalization
//!
//! Subtitle files arrive in whatever encoding the authoring tool used. This
//! module turns a raw byte buffer into clean UTF-8 text:
//! - BOM detection (UTF-8, UTF-16 LE/BE)
//! - Strict UTF-8 validation
//! - Windows-1252 / ISO-8859-1 classification by byte histogram
//! - Repair of text that was UTF-8 but got decoded as a single-byte encoding
//!
//! Conversion never fails. Undecodable input degrades to lossy UTF-8.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, WINDOWS_1252};
use serde::{Deserialize, Serialize};
use std::fmt;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Upper bound on repair passes over multiply mis-encoded text
const MAX_REPAIR_ROUNDS: usize = 5;

/// Encoding detected for a source buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceEncoding {
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "windows-1252")]
    Windows1252,
    #[serde(rename = "iso-8859-1")]
    Latin1,
}

impl SourceEncoding {
    /// Canonical (WHATWG) label
    pub fn label(&self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "utf-8",
            SourceEncoding::Windows1252 => "windows-1252",
            SourceEncoding::Latin1 => "iso-8859-1",
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Detect the encoding of a raw subtitle buffer.
///
/// UTF-16 input with a BOM reports `Utf8`: it is transcoded by
/// [`convert_to_utf8`] and is UTF-8 compatible from then on.
pub fn detect_encoding(bytes: &[u8]) -> SourceEncoding {
    if bytes.is_empty() || bytes.starts_with(UTF8_BOM) {
        return SourceEncoding::Utf8;
    }

    if utf16_bom(bytes).is_some() {
        return SourceEncoding::Utf8;
    }

    if std::str::from_utf8(bytes).is_ok() {
        return SourceEncoding::Utf8;
    }

    // 0x80-0x9F are C1 controls in Latin-1 but printable in Windows-1252
    if bytes.iter().any(|b| (0x80..=0x9F).contains(b)) {
        return SourceEncoding::Windows1252;
    }

    if bytes.iter().any(|&b| b >= 0x80) {
        // Latin-1 assigns every byte, so it only wins when Windows-1252 can't decode
        return if decode_windows_1252(bytes).is_some() {
            SourceEncoding::Windows1252
        } else {
            SourceEncoding::Latin1
        };
    }

    SourceEncoding::Utf8
}

/// Convert a raw buffer to clean UTF-8 text without a BOM.
pub fn convert_to_utf8(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    if let Some(text) = decode_utf16_with_bom(bytes) {
        tracing::debug!("transcoded UTF-16 input ({} bytes)", bytes.len());
        return finish(text);
    }

    let encoding = detect_encoding(bytes);
    tracing::debug!(encoding = %encoding, size = bytes.len(), "detected source encoding");

    let decoded = match encoding {
        SourceEncoding::Utf8 => decode_utf8_lossy(bytes),
        SourceEncoding::Windows1252 => decode_windows_1252_lossy(bytes),
        SourceEncoding::Latin1 => decode_latin1(bytes),
    };

    finish(decoded)
}

/// Reverse UTF-8 text that was decoded as Latin-1/Windows-1252 one or more times.
///
/// Only acts when the `Ã` + continuation marker is present, so clean text is
/// returned unchanged.
pub fn repair_double_encoding(text: &str) -> String {
    let mut current = text.to_string();

    for round in 1..=MAX_REPAIR_ROUNDS {
        if !has_double_encoding_marker(&current) {
            break;
        }
        let Some(bytes) = encode_single_byte(&current) else {
            break;
        };
        let Ok(repaired) = String::from_utf8(bytes) else {
            break;
        };
        if repaired == current {
            break;
        }
        tracing::debug!(round, "repaired double-encoded text");
        current = repaired;
    }

    current
}

/// Strip leftover BOMs and undo double encoding
fn finish(text: String) -> String {
    let text = text.trim_start_matches('\u{FEFF}');
    repair_double_encoding(text)
}

fn decode_utf8_lossy(bytes: &[u8]) -> String {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => text.to_string(),
        Err(e) => {
            tracing::warn!("UTF-8 decode failed ({}), falling back to lossy decode", e);
            String::from_utf8_lossy(body).into_owned()
        }
    }
}

/// UTF-16 encoding and BOM length, if the buffer starts with a UTF-16 BOM
fn utf16_bom(bytes: &[u8]) -> Option<(&'static Encoding, usize)> {
    Encoding::for_bom(bytes).filter(|(encoding, _)| *encoding == UTF_16LE || *encoding == UTF_16BE)
}

fn decode_utf16_with_bom(bytes: &[u8]) -> Option<String> {
    let (encoding, bom_len) = utf16_bom(bytes)?;
    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
    if had_errors {
        tracing::warn!("{} input contained malformed code units", encoding.name());
    }
    Some(text.into_owned())
}

/// Strict Windows-1252 decode; `None` if a byte has no mapping
fn decode_windows_1252(bytes: &[u8]) -> Option<String> {
    WINDOWS_1252
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}

/// Windows-1252 decode; bytes the code page leaves undefined become C1 controls
fn decode_windows_1252_lossy(bytes: &[u8]) -> String {
    WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned()
}

fn decode_latin1(bytes: &[u8]) -> String {
    encoding_rs::mem::decode_latin1(bytes).into_owned()
}

/// Map a char back to the single byte it was decoded from
fn single_byte(c: char) -> Option<u8> {
    let mut buf = [0u8; 4];
    let (bytes, _, unmappable) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
    match bytes.as_ref() {
        [byte] if !unmappable => Some(*byte),
        // C1 controls that Windows-1252 reassigns, e.g. U+0080
        _ => u8::try_from(u32::from(c)).ok(),
    }
}

fn encode_single_byte(text: &str) -> Option<Vec<u8>> {
    text.chars().map(single_byte).collect()
}

fn has_double_encoding_marker(text: &str) -> bool {
    text.chars()
        .zip(text.chars().skip(1))
        .any(|(lead, next)| lead == '\u{00C3}' && matches!(single_byte(next), Some(0x80..=0xBF)))
}
