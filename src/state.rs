//! Application state management
//!
//! Holds the server configuration, the text corrector used by the
//! conversion pipeline, and request counters for the debug endpoint.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use subvtt_lib::{ConversionOptions, PassthroughCorrector, TextCorrector};

use crate::config::ServerConfig;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Request counters
#[derive(Debug, Default)]
pub struct ConversionStats {
    pub conversions: AtomicU64,
    pub failed_conversions: AtomicU64,
    pub corrections_applied: AtomicU64,
    pub language_detections: AtomicU64,
    pub validations: AtomicU64,
}

/// Point-in-time copy of [`ConversionStats`]
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub uptime_secs: u64,
    pub conversions: u64,
    pub failed_conversions: u64,
    pub corrections_applied: u64,
    pub language_detections: u64,
    pub validations: u64,
}

/// Application state shared across all handlers
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,

    /// Corrector handed to the pipeline when correction is requested
    pub corrector: Arc<dyn TextCorrector>,

    /// Request counters
    pub stats: ConversionStats,

    /// Unix time the state was created
    pub started_at: u64,
}

impl AppState {
    /// Create a new AppState with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        Self::with_corrector(config, Arc::new(PassthroughCorrector))
    }

    /// Create a new AppState with a specific text corrector
    pub fn with_corrector(config: ServerConfig, corrector: Arc<dyn TextCorrector>) -> Self {
        Self {
            config,
            corrector,
            stats: ConversionStats::default(),
            started_at: now_secs(),
        }
    }

    /// Pipeline options for a request
    pub fn conversion_options(&self, correct: Option<bool>, package_base64: bool) -> ConversionOptions {
        ConversionOptions {
            correct: correct.unwrap_or(self.config.conversion.correction_enabled),
            detect_language: self.config.conversion.detect_language,
            package_base64,
            max_input_bytes: self.config.limits.max_upload_bytes(),
        }
    }

    pub fn record_conversion(&self, corrected: bool) {
        self.stats.conversions.fetch_add(1, Ordering::Relaxed);
        if corrected {
            self.stats.corrections_applied.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_failure(&self) {
        self.stats.failed_conversions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_detection(&self) {
        self.stats.language_detections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation(&self) {
        self.stats.validations.fetch_add(1, Ordering::Relaxed);
    }

    /// Get request statistics
    pub fn stats_snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            uptime_secs: now_secs().saturating_sub(self.started_at),
            conversions: self.stats.conversions.load(Ordering::Relaxed),
            failed_conversions: self.stats.failed_conversions.load(Ordering::Relaxed),
            corrections_applied: self.stats.corrections_applied.load(Ordering::Relaxed),
            language_detections: self.stats.language_detections.load(Ordering::Relaxed),
            validations: self.stats.validations.load(Ordering::Relaxed),
        }
    }
}
