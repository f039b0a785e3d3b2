// URL normalization for inbound link checks
// Accepts full URLs and bare domains ("example.com")

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

// =============================================================================
// ERROR TYPES
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("No URL provided")]
    MissingInput,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),
}

// =============================================================================
// DATA STRUCTURES
// =============================================================================

/// Canonical form of a submitted URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedUrl {
    /// Parser-serialized href, e.g. `http://example.com/`
    pub href: String,
    /// Lowercase hostname, e.g. `example.com`
    pub host: String,
}

const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// True when the input already starts with `http://` or `https://`, ignoring case
fn has_http_scheme(input: &str) -> bool {
    let lower = input
        .get(..8)
        .unwrap_or(input)
        .to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Normalize raw caller input into a canonical URL and its host.
///
/// Only the empty string counts as missing. Anything else is trimmed and gets
/// `http://` prepended when no http(s) scheme is present, so whitespace-only
/// input fails to parse. The result is the `url` crate's serialization, so normalizing an
/// already-normalized href returns it unchanged.
pub fn normalize_url(raw: &str) -> Result<NormalizedUrl, NormalizeError> {
    if raw.is_empty() {
        return Err(NormalizeError::MissingInput);
    }

    let trimmed = raw.trim();
    let candidate = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, trimmed)
    };

    let url = Url::parse(&candidate)
        .map_err(|e| NormalizeError::InvalidFormat(format!("{}: {}", trimmed, e)))?;

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| NormalizeError::InvalidFormat(format!("{}: missing host", trimmed)))?
        .to_lowercase();

    Ok(NormalizedUrl {
        href: url.to_string(),
        host,
    })
}
