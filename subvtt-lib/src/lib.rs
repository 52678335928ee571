//! SRT to WebVTT conversion core
//!
//! Pure, synchronous building blocks for turning uploaded SubRip files into
//! WebVTT documents:
//! - Encoding detection and UTF-8 normalization
//! - SRT parsing and validation
//! - WebVTT generation, compliance checking and Base64 packaging
//! - Heuristic language detection
//! - The end-to-end conversion pipeline

// helper.
macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).unwrap())
    }};
}

pub mod correction;
pub mod encoding;
pub mod error;
pub mod language;
pub mod pipeline;
pub mod srt;
pub mod vtt;

#[cfg(test)]
pub(crate) mod tests;

pub use correction::{CorrectionOutcome, PassthroughCorrector, TextCorrector};
pub use encoding::{convert_to_utf8, detect_encoding, repair_double_encoding, SourceEncoding};
pub use error::{Result, SubtitleError};
pub use language::{
    detect_language, is_valid_language_code, language_name_for_code, list_supported_languages,
    DetectionResult, LanguageInfo, LanguageMatch,
};
pub use pipeline::{convert, ConversionOptions, ConversionOutput, CorrectionStatus};
pub use srt::{extract_srt_text, parse_srt, parse_timestamp, validate_srt, SubtitleRecord, Timestamp};
pub use vtt::{
    convert_timestamp, generate_base64_output, generate_vtt, get_vtt_mime_type_config,
    validate_bunny_stream_compliance, validate_vtt_format, Base64Output, ComplianceChecks,
    ComplianceReport, VttMimeConfig,
};
