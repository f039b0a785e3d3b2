// Error handling for the link-check pipeline
// Every error resolves to a cautionary Verdict; none escape the handler

use thiserror::Error;

use crate::{models::verdict::Verdict, utils::url_normalizer::NormalizeError};

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Failure of the single scan submission call
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Provider could not resolve the domain: {0}")]
    DomainUnresolvable(String),

    #[error("Provider rejected the scan (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Failure of one result-poll attempt
#[derive(Error, Debug)]
pub enum PollError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Input(#[from] NormalizeError),

    #[error("Scan submission failed: {0}")]
    Submission(#[from] SubmitError),

    #[error("Scan did not complete after {attempts} attempts")]
    Timeout { attempts: u32 },

    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

// =============================================================================
// ERROR CONVERSIONS
// =============================================================================

/// Provider error messages that indicate DNS resolution failure
pub fn is_resolution_failure(message: &str) -> bool {
    message.to_lowercase().contains("resolve")
}

impl SubmitError {
    pub fn from_provider_message(status: u16, message: Option<String>) -> Self {
        match message {
            Some(msg) if is_resolution_failure(&msg) => SubmitError::DomainUnresolvable(msg),
            Some(msg) => SubmitError::Rejected {
                status,
                message: msg,
            },
            None => SubmitError::Rejected {
                status,
                message: "no error message".to_string(),
            },
        }
    }
}

impl CheckError {
    pub fn verdict(&self) -> Verdict {
        match self {
            CheckError::Input(NormalizeError::MissingInput) => Verdict::MissingUrl,
            CheckError::Input(NormalizeError::InvalidFormat(_)) => Verdict::InvalidFormat,
            CheckError::Submission(SubmitError::DomainUnresolvable(_)) => Verdict::DomainNotFound,
            CheckError::Submission(SubmitError::Rejected { .. })
            | CheckError::Submission(SubmitError::Network(_)) => Verdict::ScanNotStarted,
            CheckError::Submission(SubmitError::MalformedResponse(_)) => Verdict::InternalError,
            CheckError::Timeout { .. } => Verdict::TimedOut,
            CheckError::Unexpected(_) => Verdict::InternalError,
        }
    }
}

impl From<CheckError> for Verdict {
    fn from(err: CheckError) -> Self {
        err.verdict()
    }
}

// =============================================================================
// RESULT TYPE
// =============================================================================

pub type CheckResult<T> = Result<T, CheckError>;

// =============================================================================
// TESTS
// =============================================================================
