// Link check pipeline
// normalize -> allow-list -> submit -> poll -> verdict

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    app_config::AppConfig,
    models::{
        scan::{ScanJob, ScanResult},
        verdict::Verdict,
    },
    services::{
        poller::{poll_until_complete, PollOutcome, PollPolicy},
        scan_provider::ScanProvider,
    },
    utils::{
        allow_list::AllowList,
        scan_errors::{CheckError, CheckResult},
        url_normalizer::{normalize_url, NormalizeError},
    },
};

pub struct LinkChecker {
    provider: Arc<dyn ScanProvider>,
    allow_list: AllowList,
    poll_policy: PollPolicy,
}

impl LinkChecker {
    pub fn new(
        provider: Arc<dyn ScanProvider>,
        allow_list: AllowList,
        poll_policy: PollPolicy,
    ) -> Self {
        Self {
            provider,
            allow_list,
            poll_policy,
        }
    }

    pub fn from_config(config: &AppConfig, provider: Arc<dyn ScanProvider>) -> Self {
        Self::new(
            provider,
            AllowList::from_config(&config.allow_list),
            PollPolicy::from_config(&config.scanner),
        )
    }

    pub fn poll_policy(&self) -> PollPolicy {
        self.poll_policy
    }

    /// Run the full pipeline. Never fails: every error becomes a cautionary verdict.
    pub async fn check(&self, raw_url: Option<&str>) -> Verdict {
        match self.run(raw_url).await {
            Ok(verdict) => {
                info!("Link check verdict: {}", verdict);
                verdict
            },
            Err(err) => {
                let verdict = err.verdict();
                match &err {
                    CheckError::Input(_) => info!("Rejected link check input: {}", err),
                    CheckError::Unexpected(_) => error!("Unexpected link check failure: {}", err),
                    CheckError::Submission(_) | CheckError::Timeout { .. } => {
                        warn!("Link check did not complete: {}", err)
                    },
                }
                verdict
            },
        }
    }

    async fn run(&self, raw_url: Option<&str>) -> CheckResult<Verdict> {
        let raw_url = raw_url.ok_or(NormalizeError::MissingInput)?;
        let normalized = normalize_url(raw_url)?;

        if self.allow_list.contains(&normalized.host) {
            info!("{} is allow-listed, skipping scan", normalized.host);
            return Ok(Verdict::Safe);
        }

        // Single attempt; submission failures end the request
        let job = self.provider.submit(&normalized.href).await?;

        match self.wait_for_result(&job).await {
            PollOutcome::Completed { value, attempts } => {
                info!("Scan {} completed after {} attempt(s)", job, attempts);
                Ok(Verdict::from_scan_result(&value))
            },
            PollOutcome::TimedOut { attempts } => {
                warn!("Result polling failed or scan {} not ready", job);
                Err(CheckError::Timeout { attempts })
            },
        }
    }

    async fn wait_for_result(&self, job: &ScanJob) -> PollOutcome<ScanResult> {
        let provider = self.provider.as_ref();
        let max_attempts = self.poll_policy.max_attempts;

        poll_until_complete(self.poll_policy, move |attempt| async move {
            match provider.fetch_result(job).await {
                Ok(result) => result,
                Err(e) => {
                    warn!(
                        "Poll attempt {}/{} for scan {} failed: {}",
                        attempt, max_attempts, job, e
                    );
                    None
                },
            }
        })
        .await
    }
}
