// Narrow seam between the verdict pipeline and the external scanning service

use async_trait::async_trait;

use crate::{
    models::scan::{ScanJob, ScanResult},
    utils::scan_errors::{PollError, SubmitError},
};

#[async_trait]
pub trait ScanProvider: Send + Sync {
    /// Submit a normalized URL for scanning. Called at most once per request.
    async fn submit(&self, url: &str) -> Result<ScanJob, SubmitError>;

    /// Fetch the job's result; `Ok(None)` while the scan is still running
    async fn fetch_result(&self, job: &ScanJob) -> Result<Option<ScanResult>, PollError>;
}
