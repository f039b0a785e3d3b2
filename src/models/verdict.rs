// Verdict returned to the caller of POST /check-link

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{models::scan::ScanResult, utils::url_normalizer::NormalizeError};

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

/// Body of POST /check-link. `url` is kept untyped so a non-string value
/// is reported as an invalid format rather than a missing field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckLinkRequest {
    #[serde(default)]
    pub url: Option<Value>,
}

impl CheckLinkRequest {
    /// The `url` field as text. Absent and `null` are `Ok(None)`.
    pub fn url_text(&self) -> Result<Option<&str>, NormalizeError> {
        match &self.url {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.as_str())),
            Some(other) => Err(NormalizeError::InvalidFormat(format!(
                "expected a string, got {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictResponse {
    pub verdict: String,
}

// =============================================================================
// VERDICT
// =============================================================================

/// Semantic bucket of a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictCategory {
    Safe,
    WarningMalicious,
    WarningError,
    Rejection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Allow-listed host or a definitive negative scan
    Safe,
    /// Provider flagged the URL or scored it above zero
    Malicious,
    MissingUrl,
    InvalidFormat,
    ScanNotStarted,
    DomainNotFound,
    TimedOut,
    /// Completed scan carried neither a malicious flag nor a score
    Inconclusive,
    InternalError,
}

impl Verdict {
    /// Map a completed provider payload. Only a present, non-positive signal is safe.
    pub fn from_scan_result(result: &ScanResult) -> Self {
        let flagged = result.malicious == Some(true);
        let scored = result.score.map(|s| s > 0.0).unwrap_or(false);

        if flagged || scored {
            Verdict::Malicious
        } else if result.malicious.is_none() && result.score.is_none() {
            Verdict::Inconclusive
        } else {
            Verdict::Safe
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Safe => "safe",
            Verdict::Malicious => {
                "Warning: This URL's domain appears invalid and could be malicious"
            },
            Verdict::MissingUrl => "Warning: No URL provided",
            Verdict::InvalidFormat => "Warning: Invalid URL format",
            Verdict::ScanNotStarted => "Warning: Could not start scan (API error)",
            Verdict::DomainNotFound => {
                "Error: This domain does not exist or could not be resolved."
            },
            Verdict::TimedOut => "Warning: Scan timed out or failed",
            Verdict::Inconclusive => "Warning: Scan result was inconclusive",
            Verdict::InternalError => "Warning: Internal server error",
        }
    }

    pub fn category(&self) -> VerdictCategory {
        match self {
            Verdict::Safe => VerdictCategory::Safe,
            Verdict::Malicious => VerdictCategory::WarningMalicious,
            Verdict::MissingUrl => VerdictCategory::Rejection,
            Verdict::InvalidFormat
            | Verdict::ScanNotStarted
            | Verdict::DomainNotFound
            | Verdict::TimedOut
            | Verdict::Inconclusive
            | Verdict::InternalError => VerdictCategory::WarningError,
        }
    }

    pub fn is_safe(&self) -> bool {
        self.category() == VerdictCategory::Safe
    }

    /// Only a missing URL is a hard error; everything else is a soft 200 verdict
    pub fn status_code(&self) -> StatusCode {
        match self {
            Verdict::MissingUrl => StatusCode::BAD_REQUEST,
            _ => StatusCode::OK,
        }
    }

    pub fn to_response(&self) -> VerdictResponse {
        VerdictResponse {
            verdict: self.message().to_string(),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl IntoResponse for Verdict {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}
