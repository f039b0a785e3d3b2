pub mod scan;
pub mod verdict;

pub use scan::{ScanJob, ScanResult};
pub use verdict::{CheckLinkRequest, Verdict, VerdictCategory, VerdictResponse};
