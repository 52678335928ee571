//! Text correction collaborator
//!
//! Correction (spelling/grammar fixes by an external service) is plugged in
//! through [`TextCorrector`]. Whatever it returns is treated as untrusted: the
//! pipeline re-parses corrected text before using it.

use serde::{Deserialize, Serialize};

/// Result reported by a correction service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionOutcome {
    pub success: bool,
    pub corrected_text: Option<String>,
    /// The service gave up and the original text should be used
    pub used_fallback: bool,
    pub error: Option<String>,
}

impl CorrectionOutcome {
    /// Successful correction
    pub fn corrected(text: impl Into<String>) -> Self {
        Self {
            success: true,
            corrected_text: Some(text.into()),
            used_fallback: false,
            error: None,
        }
    }

    /// Failed correction; the caller keeps the original text
    pub fn fallback(error: impl Into<String>) -> Self {
        Self {
            success: false,
            corrected_text: None,
            used_fallback: true,
            error: Some(error.into()),
        }
    }
}

/// A service that corrects the text of an SRT document
pub trait TextCorrector: Send + Sync {
    /// Correct `srt`, returning a complete SRT document on success
    fn correct(&self, srt: &str) -> CorrectionOutcome;
}

/// Corrector used when no correction service is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCorrector;

impl TextCorrector for PassthroughCorrector {
    fn correct(&self, _srt: &str) -> CorrectionOutcome {
        CorrectionOutcome::fallback("text correction is not configured")
    }
}
