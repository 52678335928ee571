//! WebVTT output
//!
//! This module turns parsed SRT records into WebVTT documents:
//! - Timestamp separator conversion with range checks
//! - Document generation (header, cues, no sequence numbers)
//! - Strict format validation and a non-throwing compliance report
//! - Base64 packaging and MIME configuration for API delivery

pub mod compliance;
pub mod generator;
pub mod package;

pub use compliance::{
    validate_bunny_stream_compliance, validate_vtt_format, ComplianceChecks, ComplianceReport,
};
pub use generator::{convert_timestamp, generate_vtt, VTT_HEADER};
pub use package::{
    generate_base64_output, get_vtt_mime_type_config, Base64Output, BrowserMimeTypes,
    BunnyStreamMimeType, PackageMetadata, PackageSize, VttMimeConfig,
};
