//! End-to-end SRT to WebVTT conversion
//!
//! raw bytes -> UTF-8 text -> records -> (correction, re-parse) -> WebVTT
//! -> compliance report / Base64 package. Language detection runs on the
//! normalized text and is attached to the output.

use serde::Serialize;

use crate::correction::TextCorrector;
use crate::encoding::{convert_to_utf8, detect_encoding, SourceEncoding};
use crate::error::{Result, SubtitleError};
use crate::language::{detect_language, DetectionResult};
use crate::srt::{parse_srt, SubtitleRecord};
use crate::vtt::{
    generate_base64_output, generate_vtt, validate_bunny_stream_compliance, Base64Output,
    ComplianceReport,
};

/// Default input ceiling (10 MB)
pub const DEFAULT_MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Conversion options
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// Run the text through the corrector before generation
    pub correct: bool,
    /// Attach a language detection result
    pub detect_language: bool,
    /// Attach a Base64 package of the document
    pub package_base64: bool,
    /// Reject inputs larger than this many bytes
    pub max_input_bytes: usize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            correct: false,
            detect_language: true,
            package_base64: true,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

/// What happened to the correction step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionStatus {
    pub requested: bool,
    /// Corrected records were used for generation
    pub applied: bool,
    pub used_fallback: bool,
    pub error: Option<String>,
}

impl CorrectionStatus {
    fn fallback(error: Option<String>) -> Self {
        Self {
            requested: true,
            applied: false,
            used_fallback: true,
            error,
        }
    }
}

/// Result of a full conversion
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOutput {
    /// The WebVTT document
    pub vtt: String,
    pub subtitle_count: usize,
    pub source_encoding: SourceEncoding,
    pub language: Option<DetectionResult>,
    pub compliance: ComplianceReport,
    pub correction: CorrectionStatus,
    pub package: Option<Base64Output>,
}

/// Run the correction step, falling back to `original` on any failure
fn apply_correction(
    text: &str,
    original: Vec<SubtitleRecord>,
    corrector: &dyn TextCorrector,
) -> (Vec<SubtitleRecord>, CorrectionStatus) {
    let outcome = corrector.correct(text);

    let corrected = match (outcome.success, outcome.corrected_text) {
        (true, Some(corrected)) => corrected,
        _ => {
            tracing::warn!(
                "text correction failed, using original subtitles: {}",
                outcome.error.as_deref().unwrap_or("no corrected text returned")
            );
            return (original, CorrectionStatus::fallback(outcome.error));
        }
    };

    // Corrected text is untrusted until it parses
    match parse_srt(&corrected) {
        Ok(records) => {
            tracing::debug!("applied corrected text ({} blocks)", records.len());
            let status = CorrectionStatus {
                requested: true,
                applied: true,
                used_fallback: outcome.used_fallback,
                error: None,
            };
            (records, status)
        }
        Err(e) => {
            tracing::warn!("corrected text failed to parse, using original subtitles: {}", e);
            (original, CorrectionStatus::fallback(Some(e.to_string())))
        }
    }
}

/// Convert an SRT buffer to WebVTT.
pub fn convert(
    bytes: &[u8],
    options: &ConversionOptions,
    corrector: Option<&dyn TextCorrector>,
) -> Result<ConversionOutput> {
    if bytes.len() > options.max_input_bytes {
        return Err(SubtitleError::InvalidInput(format!(
            "input exceeds {} bytes",
            options.max_input_bytes
        )));
    }

    let source_encoding = detect_encoding(bytes);
    let text = convert_to_utf8(bytes);
    let records = parse_srt(&text)?;

    let (records, correction) = match (options.correct, corrector) {
        (true, Some(corrector)) => apply_correction(&text, records, corrector),
        (true, None) => (
            records,
            CorrectionStatus::fallback(Some("no corrector available".to_string())),
        ),
        (false, _) => (records, CorrectionStatus::default()),
    };

    let vtt = generate_vtt(&records)?;
    let compliance = validate_bunny_stream_compliance(&vtt);
    for warning in &compliance.warnings {
        tracing::warn!("compliance warning: {}", warning);
    }

    let language = options.detect_language.then(|| detect_language(&text));
    let package = if options.package_base64 {
        Some(generate_base64_output(&vtt)?)
    } else {
        None
    };

    tracing::info!(
        encoding = %source_encoding,
        subtitles = records.len(),
        corrected = correction.applied,
        "converted SRT to WebVTT"
    );

    Ok(ConversionOutput {
        vtt,
        subtitle_count: records.len(),
        source_encoding,
        language,
        compliance,
        correction,
        package,
    })
}
