// Link check services

pub mod link_checker;
pub mod poller;
pub mod scan_provider;

pub use link_checker::LinkChecker;
pub use poller::{poll_until_complete, PollOutcome, PollPolicy};
pub use scan_provider::ScanProvider;
