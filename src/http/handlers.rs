//! HTTP request handlers
//!
//! Implements handlers for the conversion API endpoints.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use subvtt_lib::{
    convert, detect_language, get_vtt_mime_type_config, list_supported_languages,
    validate_bunny_stream_compliance, Base64Output, ComplianceReport, CorrectionStatus,
    DetectionResult, LanguageInfo, SourceEncoding, SubtitleError, VttMimeConfig,
};

use crate::error::ServerError;
use crate::state::{AppState, StatsSnapshot};

const DEFAULT_FILENAME: &str = "subtitles.srt";

/// HTTP error type
#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    PayloadTooLarge(String),
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            HttpError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error,
            }),
        )
            .into_response()
    }
}

impl From<SubtitleError> for HttpError {
    fn from(err: SubtitleError) -> Self {
        if err.is_client_error() {
            HttpError::BadRequest(err.to_string())
        } else {
            HttpError::InternalError(err.to_string())
        }
    }
}

impl From<ServerError> for HttpError {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::Subtitle(e) => e.into(),
            ServerError::PayloadTooLarge { .. } => HttpError::PayloadTooLarge(err.to_string()),
            _ => HttpError::InternalError(err.to_string()),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Version endpoint
pub async fn version_check() -> &'static str {
    concat!("subvtt-server v", env!("CARGO_PKG_VERSION"))
}

/// Supported languages
/// GET /api/languages
pub async fn languages() -> Json<Vec<LanguageInfo>> {
    Json(list_supported_languages())
}

/// MIME types for delivering VTT files
/// GET /api/mime-types
pub async fn mime_types() -> Json<&'static VttMimeConfig> {
    Json(get_vtt_mime_type_config())
}

/// Response shape of `/api/convert`
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    File,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConvertQuery {
    #[serde(default)]
    pub format: OutputFormat,
    pub correct: Option<bool>,
    pub filename: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub success: bool,
    pub conversion_id: String,
    pub processed_at: String,
    pub filename: String,
    pub subtitle_count: usize,
    pub source_encoding: SourceEncoding,
    pub language: Option<DetectionResult>,
    pub compliance: ComplianceReport,
    pub correction: CorrectionStatus,
    pub vtt: Option<Base64Output>,
}

/// Output file name for an uploaded SRT name: directories dropped, the
/// extension replaced with `.vtt`, header-unsafe characters replaced.
pub fn vtt_filename(name: Option<&str>) -> String {
    let name = name
        .and_then(|n| n.rsplit(['/', '\\']).next())
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_FILENAME);

    let stem = match name.rfind('.') {
        Some(pos) if pos > 0 => &name[..pos],
        _ => name,
    };

    let stem: String = stem
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!("{}{}", stem, get_vtt_mime_type_config().file_extension)
}

/// SRT to WebVTT conversion
/// POST /api/convert?format=json|file&correct=bool&filename=<name>
pub async fn convert_subtitles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConvertQuery>,
    body: Bytes,
) -> Result<Response, HttpError> {
    let limit = state.config.limits.max_upload_bytes();
    if body.len() > limit {
        state.record_failure();
        return Err(ServerError::PayloadTooLarge {
            size: body.len(),
            limit,
        }
        .into());
    }

    let options = state.conversion_options(query.correct, query.format == OutputFormat::Json);
    let corrector = state.corrector.clone();

    let result =
        tokio::task::spawn_blocking(move || convert(&body, &options, Some(corrector.as_ref())))
            .await
            .map_err(|e| HttpError::InternalError(format!("Conversion task failed: {}", e)))?;

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!("conversion failed: {}", e);
            state.record_failure();
            return Err(e.into());
        }
    };
    state.record_conversion(output.correction.applied);

    let filename = vtt_filename(query.filename.as_deref());

    match query.format {
        OutputFormat::File => {
            let mime = get_vtt_mime_type_config();
            let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
                .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"subtitles.vtt\""));

            let mut headers = HeaderMap::new();
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(mime.bunny_stream.content_type),
            );
            headers.insert(header::CONTENT_DISPOSITION, disposition);
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

            Ok((headers, output.vtt).into_response())
        }
        OutputFormat::Json => {
            let response = ConvertResponse {
                success: true,
                conversion_id: uuid::Uuid::new_v4().to_string(),
                processed_at: chrono::Utc::now().to_rfc3339(),
                filename,
                subtitle_count: output.subtitle_count,
                source_encoding: output.source_encoding,
                language: output.language,
                compliance: output.compliance,
                correction: output.correction,
                vtt: output.package,
            };
            Ok(Json(response).into_response())
        }
    }
}

/// Language detection for raw text or an SRT document
/// POST /api/detect-language
pub async fn detect_language_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<DetectionResult>, HttpError> {
    let request: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| HttpError::BadRequest(format!("Invalid JSON body: {}", e)))?;
    let content = request
        .get("content")
        .and_then(|c| c.as_str())
        .ok_or_else(|| SubtitleError::InvalidInput("content must be a string".to_string()))?
        .to_string();

    let result = tokio::task::spawn_blocking(move || detect_language(&content))
        .await
        .map_err(|e| HttpError::InternalError(format!("Detection task failed: {}", e)))?;

    state.record_detection();
    Ok(Json(result))
}

/// Compliance report for a WebVTT document
/// POST /api/validate
pub async fn validate_vtt(State(state): State<Arc<AppState>>, body: Bytes) -> Json<ComplianceReport> {
    state.record_validation();
    let content = String::from_utf8_lossy(&body);
    Json(validate_bunny_stream_compliance(&content))
}

/// Debug endpoint - request counters
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsSnapshot> {
    Json(state.stats_snapshot())
}
