//! Base64 packaging and MIME configuration for API delivery

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SubtitleError};
use crate::vtt::compliance::validate_vtt_format;

/// WebVTT document packaged for a JSON response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Base64Output {
    /// Base64 of the UTF-8 document bytes
    pub content: String,
    pub mime_type: String,
    pub charset: String,
    pub encoding: String,
    pub size: PackageSize,
    pub metadata: PackageMetadata,
}

/// Byte sizes before and after Base64 encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSize {
    pub original: usize,
    pub encoded: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageMetadata {
    pub format: String,
    pub bunny_stream_compatible: bool,
    pub encoding: String,
}

/// Validate a WebVTT document and package it as Base64.
///
/// The document must already pass [`validate_vtt_format`].
pub fn generate_base64_output(vtt: &str) -> Result<Base64Output> {
    if vtt.is_empty() {
        return Err(SubtitleError::InvalidInput(
            "VTT content must be a non-empty string".to_string(),
        ));
    }

    validate_vtt_format(vtt)?;

    let content = BASE64.encode(vtt.as_bytes());
    let size = PackageSize {
        original: vtt.len(),
        encoded: content.len(),
    };

    Ok(Base64Output {
        content,
        mime_type: "text/vtt".to_string(),
        charset: "utf-8".to_string(),
        encoding: "base64".to_string(),
        size,
        metadata: PackageMetadata {
            format: "WebVTT".to_string(),
            bunny_stream_compatible: true,
            encoding: "UTF-8 without BOM".to_string(),
        },
    })
}

/// MIME types and content-type headers for delivering VTT files
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VttMimeConfig {
    pub primary: &'static str,
    pub alternatives: &'static [&'static str],
    pub file_extension: &'static str,
    pub bunny_stream: BunnyStreamMimeType,
    pub browser: BrowserMimeTypes,
}

/// Content type used when delivering the file itself
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BunnyStreamMimeType {
    pub mime_type: &'static str,
    pub charset: &'static str,
    pub content_type: &'static str,
}

/// Content types for browser download vs. inline display
#[derive(Debug, Clone, Serialize)]
pub struct BrowserMimeTypes {
    pub download: &'static str,
    pub display: &'static str,
}

static VTT_MIME_CONFIG: VttMimeConfig = VttMimeConfig {
    primary: "text/vtt",
    alternatives: &["text/plain", "application/octet-stream"],
    file_extension: ".vtt",
    bunny_stream: BunnyStreamMimeType {
        mime_type: "text/vtt",
        charset: "utf-8",
        content_type: "text/vtt; charset=utf-8",
    },
    browser: BrowserMimeTypes {
        download: "text/vtt; charset=utf-8",
        display: "text/plain; charset=utf-8",
    },
};

/// Static MIME configuration for the HTTP layer
pub fn get_vtt_mime_type_config() -> &'static VttMimeConfig {
    &VTT_MIME_CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "WEBVTT\n\n00:00:01.000 --> 00:00:03.000\nHällo\n\n";

    #[test]
    fn test_base64_output() {
        let output = generate_base64_output(VALID).unwrap();
        assert_eq!(BASE64.decode(&output.content).unwrap(), VALID.as_bytes());
        assert_eq!(output.mime_type, "text/vtt");
        assert_eq!(output.charset, "utf-8");
        assert_eq!(output.encoding, "base64");
        assert_eq!(output.size.original, VALID.len());
        assert_eq!(output.size.encoded, output.content.len());
        assert!(output.metadata.bunny_stream_compatible);
    }

    #[test]
    fn test_base64_output_rejects_empty() {
        let err = generate_base64_output("").unwrap_err();
        assert!(matches!(err, SubtitleError::InvalidInput(_)));
    }

    #[test]
    fn test_base64_output_requires_compliance() {
        let err = generate_base64_output("WEBVTT\n00:00:01.000 --> 00:00:02.000\nHi\n").unwrap_err();
        assert!(matches!(err, SubtitleError::Compliance(_)));
    }

    #[test]
    fn test_base64_output_field_names() {
        let json = serde_json::to_value(generate_base64_output(VALID).unwrap()).unwrap();
        assert_eq!(json["mimeType"], "text/vtt");
        assert_eq!(json["metadata"]["bunnyStreamCompatible"], true);
        assert_eq!(json["metadata"]["encoding"], "UTF-8 without BOM");
        assert!(json["size"]["original"].is_number());
    }

    #[test]
    fn test_mime_config_field_names() {
        let json = serde_json::to_value(get_vtt_mime_type_config()).unwrap();
        assert_eq!(json["primary"], "text/vtt");
        assert_eq!(json["fileExtension"], ".vtt");
        assert_eq!(json["bunnyStream"]["contentType"], "text/vtt; charset=utf-8");
        assert_eq!(json["browser"]["display"], "text/plain; charset=utf-8");
        assert!(json["alternatives"].is_array());
    }
}
