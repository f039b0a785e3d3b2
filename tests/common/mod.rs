// Common test utilities and helper structs
// Shared across all test files to avoid duplication
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    Router,
};
use link_checker::{
    create_router, AppConfig, AppState, PollError, ScanJob, ScanProvider, ScanResult, SubmitError,
};
use serde::Serialize;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

// =============================================================================
// MOCK PROVIDER
// =============================================================================

#[derive(Clone)]
pub enum MockSubmit {
    Accept(&'static str),
    Reject { status: u16, message: &'static str },
}

/// In-memory scan provider with call counters
pub struct MockProvider {
    submit: MockSubmit,
    /// Result returned from this 1-based poll attempt onwards; None never completes
    ready_on_attempt: Option<u32>,
    result: ScanResult,
    /// Poll attempt (1-based, counted across requests) that panics
    panic_on_poll: Option<u32>,
    pub submit_calls: AtomicU32,
    pub poll_calls: AtomicU32,
    pub submitted_urls: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn completing_with(result: ScanResult) -> Self {
        Self {
            submit: MockSubmit::Accept("mock-uuid"),
            ready_on_attempt: Some(1),
            result,
            panic_on_poll: None,
            submit_calls: AtomicU32::new(0),
            poll_calls: AtomicU32::new(0),
            submitted_urls: Mutex::new(Vec::new()),
        }
    }

    pub fn never_completing() -> Self {
        Self {
            ready_on_attempt: None,
            ..Self::completing_with(ScanResult::default())
        }
    }

    pub fn rejecting(status: u16, message: &'static str) -> Self {
        Self {
            submit: MockSubmit::Reject { status, message },
            ..Self::completing_with(ScanResult::default())
        }
    }

    pub fn ready_on(mut self, attempt: u32) -> Self {
        self.ready_on_attempt = Some(attempt);
        self
    }

    pub fn panicking_on_poll(mut self, attempt: u32) -> Self {
        self.panic_on_poll = Some(attempt);
        self
    }

    pub fn submits(&self) -> u32 {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn polls(&self) -> u32 {
        self.poll_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> u32 {
        self.submits() + self.polls()
    }
}

#[async_trait]
impl ScanProvider for MockProvider {
    async fn submit(&self, url: &str) -> Result<ScanJob, SubmitError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted_urls.lock().unwrap().push(url.to_string());

        match &self.submit {
            MockSubmit::Accept(uuid) => Ok(ScanJob::new(*uuid)),
            MockSubmit::Reject { status, message } => Err(SubmitError::from_provider_message(
                *status,
                Some(message.to_string()),
            )),
        }
    }

    async fn fetch_result(&self, _job: &ScanJob) -> Result<Option<ScanResult>, PollError> {
        let attempt = self.poll_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.panic_on_poll == Some(attempt) {
            panic!("mock provider failure on poll {}", attempt);
        }
        Ok(match self.ready_on_attempt {
            Some(ready) if attempt >= ready => Some(self.result.clone()),
            _ => None,
        })
    }
}

pub fn malicious() -> ScanResult {
    ScanResult {
        malicious: Some(true),
        score: None,
    }
}

pub fn clean() -> ScanResult {
    ScanResult {
        malicious: Some(false),
        score: Some(0.0),
    }
}

// =============================================================================
// TEST APP
// =============================================================================

/// Test configuration: default allow-list, 5 attempts, 2s delay
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.scanner.api_key = Some("test-key".to_string());
    config.scanner.poll_attempts = 5;
    config.scanner.poll_delay_ms = 2000;
    config
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub provider: Arc<MockProvider>,
}

impl TestApp {
    pub fn new(provider: MockProvider) -> Self {
        Self::with_config(test_config(), provider)
    }

    pub fn with_config(config: AppConfig, provider: MockProvider) -> Self {
        let provider = Arc::new(provider);
        let state = AppState::new(config, provider.clone());

        Self {
            app: create_router(state),
            provider,
        }
    }

    /// Send a POST request
    pub fn post(&self, uri: &str) -> TestRequest {
        TestRequest::new(self, "POST", uri)
    }

    /// Send a GET request
    pub fn get(&self, uri: &str) -> TestRequest {
        TestRequest::new(self, "GET", uri)
    }

    /// Send an OPTIONS (preflight) request
    pub fn options(&self, uri: &str) -> TestRequest {
        TestRequest::new(self, "OPTIONS", uri)
    }

    /// POST /check-link with the given url field
    pub async fn check(&self, url: &str) -> TestResponse {
        self.post("/check-link")
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await
    }
}

/// Test request builder
pub struct TestRequest<'a> {
    app: &'a TestApp,
    method: &'static str,
    uri: String,
    headers: Vec<(&'static str, String)>,
    body: Body,
}

impl<'a> TestRequest<'a> {
    fn new(app: &'a TestApp, method: &'static str, uri: &str) -> Self {
        Self {
            app,
            method,
            uri: uri.to_string(),
            headers: Vec::new(),
            body: Body::empty(),
        }
    }

    /// Add JSON body to request
    pub fn json<T: Serialize>(mut self, body: &T) -> Self {
        let body_bytes = serde_json::to_vec(body).unwrap();
        self.headers
            .push(("content-type", "application/json".to_string()));
        self.body = Body::from(body_bytes);
        self
    }

    /// Raw body with a JSON content type
    pub fn raw_json(mut self, body: &'static str) -> Self {
        self.headers
            .push(("content-type", "application/json".to_string()));
        self.body = Body::from(body);
        self
    }

    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }

    /// Send the request
    pub async fn send(self) -> TestResponse {
        let mut builder = Request::builder().method(self.method).uri(&self.uri);
        for (name, value) in &self.headers {
            builder = builder.header(*name, value);
        }
        let request = builder.body(self.body).unwrap();

        let response = self.app.app.clone().oneshot(request).await.unwrap();

        TestResponse { response }
    }
}

/// Test response wrapper
pub struct TestResponse {
    response: Response<Body>,
}

impl TestResponse {
    /// Get status code
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn header(&self, name: &str) -> Option<String> {
        self.response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    }

    /// Parse JSON response
    pub async fn json<T: serde::de::DeserializeOwned>(self) -> T {
        let body = axum::body::to_bytes(self.response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    /// The `verdict` field of the response body
    pub async fn verdict(self) -> String {
        let body: link_checker::VerdictResponse = self.json().await;
        body.verdict
    }
}
