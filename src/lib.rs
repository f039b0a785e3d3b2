// Library exports for the Link Checker
// Exposes the pipeline pieces so tests and embedders can swap the scan provider

pub mod app;
pub mod app_config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use app::{create_router, AppState};
pub use app_config::{AppConfig, ConfigError};
pub use models::{CheckLinkRequest, ScanJob, ScanResult, Verdict, VerdictCategory, VerdictResponse};
pub use services::{LinkChecker, PollOutcome, PollPolicy, ScanProvider};
pub use utils::{
    normalize_url, AllowList, CheckError, NormalizeError, NormalizedUrl, PollError, SubmitError,
    UrlscanClient,
};
