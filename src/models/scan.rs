// urlscan.io wire types and the provider-neutral scan job/result

use serde::{Deserialize, Serialize};

/// Opaque job handle issued by the provider on submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanJob {
    pub id: String,
}

impl ScanJob {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl std::fmt::Display for ScanJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

/// Completed verdict payload, consumed once
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub malicious: Option<bool>,
    pub score: Option<f64>,
}

// =============================================================================
// URLSCAN.IO PAYLOADS
// =============================================================================

#[derive(Debug, Serialize)]
pub struct SubmitScanBody<'a> {
    pub url: &'a str,
}

/// Body of POST /scan/ (both success and error responses)
#[derive(Debug, Default, Deserialize)]
pub struct SubmitScanResponse {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of GET /result/{uuid}/; only the verdict block is read
#[derive(Debug, Default, Deserialize)]
pub struct ScanResultResponse {
    #[serde(default)]
    pub verdicts: Option<UrlscanVerdicts>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UrlscanVerdicts {
    #[serde(default)]
    pub overall: Option<UrlscanOverallVerdict>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UrlscanOverallVerdict {
    #[serde(default)]
    pub malicious: Option<bool>,
    #[serde(default)]
    pub score: Option<f64>,
}

impl ScanResultResponse {
    /// The job is done once `verdicts.overall` is present
    pub fn into_scan_result(self) -> Option<ScanResult> {
        let overall = self.verdicts?.overall?;
        Some(ScanResult {
            malicious: overall.malicious,
            score: overall.score,
        })
    }
}
