// urlscan.io client
// Submits public scans and reads back the overall verdict

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::{
    app_config::ScannerConfig,
    models::scan::{ScanJob, ScanResult, ScanResultResponse, SubmitScanBody, SubmitScanResponse},
    services::scan_provider::ScanProvider,
    utils::scan_errors::{PollError, SubmitError},
};

// =============================================================================
// URLSCAN CLIENT
// =============================================================================

fn is_loopback_url(raw: &str) -> bool {
    match url::Url::parse(raw).ok().and_then(|u| u.host().map(|h| h.to_owned())) {
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

pub struct UrlscanClient {
    http_client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    referer: String,
}

impl UrlscanClient {
    pub fn new(config: &ScannerConfig) -> Self {
        let mut builder = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .user_agent("link-checker/0.1");

        // Local mirrors and fakes are never reached through a proxy
        if is_loopback_url(&config.api_url) {
            builder = builder.no_proxy();
        }

        let http_client = builder.build().unwrap_or_default();

        if config.api_key.is_none() {
            warn!("URLSCAN_API_KEY is not set; scan submissions will be rejected by the provider");
        }

        Self {
            http_client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            referer: config.referer.clone(),
        }
    }

    fn scan_endpoint(&self) -> String {
        format!("{}/scan/", self.api_url)
    }

    fn result_endpoint(&self, job: &ScanJob) -> String {
        format!("{}/result/{}/", self.api_url, job.id)
    }
}

#[async_trait]
impl ScanProvider for UrlscanClient {
    async fn submit(&self, url: &str) -> Result<ScanJob, SubmitError> {
        let mut request = self
            .http_client
            .post(self.scan_endpoint())
            .header(reqwest::header::REFERER, &self.referer)
            .json(&SubmitScanBody { url });

        if let Some(key) = &self.api_key {
            request = request.header("API-Key", key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            // Error bodies are JSON with a "message"; tolerate anything else
            let body: SubmitScanResponse = response.json().await.unwrap_or_default();
            let message = body.message.or(body.description);
            warn!(
                "Scan API error (status {}): {}",
                status.as_u16(),
                message.as_deref().unwrap_or("<no message>")
            );
            return Err(SubmitError::from_provider_message(status.as_u16(), message));
        }

        let body: SubmitScanResponse = response
            .json()
            .await
            .map_err(|e| SubmitError::MalformedResponse(e.to_string()))?;

        let uuid = body
            .uuid
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| SubmitError::MalformedResponse("missing scan uuid".to_string()))?;

        info!("Scan submitted for {}, UUID: {}", url, uuid);
        Ok(ScanJob::new(uuid))
    }

    async fn fetch_result(&self, job: &ScanJob) -> Result<Option<ScanResult>, PollError> {
        let response = self
            .http_client
            .get(self.result_endpoint(job))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            // urlscan answers 404 until the scan has finished
            return Ok(None);
        }
        if !status.is_success() {
            debug!("Result endpoint returned status {} for {}", status, job);
            return Ok(None);
        }

        match response.json::<ScanResultResponse>().await {
            Ok(body) => Ok(body.into_scan_result()),
            Err(e) => {
                debug!("Result body for {} not usable yet: {}", job, e);
                Ok(None)
            },
        }
    }
}
