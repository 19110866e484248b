//! Library crate for ssl-checker: SSL Labs API client, poll loop and report.
pub mod client;
pub mod logging;
pub mod poller;
pub mod report;
pub mod types;
