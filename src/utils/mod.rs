// Utility modules for the Link Checker

pub mod allow_list;
pub mod scan_errors;
pub mod url_normalizer;
pub mod urlscan_client;

pub use allow_list::AllowList;
pub use scan_errors::{CheckError, CheckResult, PollError, SubmitError};
pub use url_normalizer::{normalize_url, NormalizeError, NormalizedUrl};
pub use urlscan_client::UrlscanClient;
