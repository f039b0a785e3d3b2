// Static allow-list of pre-trusted hostnames
// A hit skips the external scan entirely; a miss implies nothing

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::app_config::AllowListConfig;

/// Hostnames trusted without a scan. Exact matches only, no subdomain wildcarding.
const DEFAULT_ALLOWED_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "youtu.be",
    "google.com",
    "www.google.com",
    "github.com",
    "www.github.com",
    "wikipedia.org",
    "en.wikipedia.org",
    "stackoverflow.com",
    "www.stackoverflow.com",
    "microsoft.com",
    "www.microsoft.com",
    "apple.com",
    "www.apple.com",
    "amazon.com",
    "www.amazon.com",
    "linkedin.com",
    "www.linkedin.com",
];

static DEFAULT_SET: Lazy<HashSet<String>> = Lazy::new(|| {
    DEFAULT_ALLOWED_HOSTS
        .iter()
        .map(|h| h.to_string())
        .collect()
});

#[derive(Debug, Clone)]
pub struct AllowList {
    hosts: HashSet<String>,
    enabled: bool,
}

impl AllowList {
    /// Built-in hosts only
    pub fn with_defaults() -> Self {
        Self {
            hosts: DEFAULT_SET.clone(),
            enabled: true,
        }
    }

    /// Built-in hosts plus any configured extras
    pub fn from_config(config: &AllowListConfig) -> Self {
        let mut list = Self::with_defaults();
        list.enabled = config.enabled;
        list.extend(config.extra_hosts.iter().map(String::as_str));
        list
    }

    pub fn extend<'a>(&mut self, hosts: impl IntoIterator<Item = &'a str>) {
        self.hosts.extend(
            hosts
                .into_iter()
                .map(|h| h.trim().trim_end_matches('.').to_lowercase())
                .filter(|h| !h.is_empty()),
        );
    }

    pub fn contains(&self, host: &str) -> bool {
        if !self.enabled {
            return false;
        }
        let host = host.trim().trim_end_matches('.');
        self.hosts.contains(&host.to_lowercase())
    }

    pub fn len(&self) -> usize {
        if self.enabled {
            self.hosts.len()
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::with_defaults()
    }
}
