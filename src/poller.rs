use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

use reqwest::Url;
use tracing::{debug, info};

use crate::client::{AnalyzeError, SslLabsClient, DEFAULT_API_URL};
use crate::report::write_report;
use crate::types::{AssessmentResponse, AssessmentStatus};

/// Explicit configuration for one assessment run.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Analyze endpoint, overridable to point at a mock service.
    pub api_url: Url,
    /// Wait before every status poll, including the first.
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            interval: Duration::from_secs(10),
        }
    }
}

/// Source of the pause between polls.
pub trait Delay {
    fn sleep(&self, period: Duration) -> impl Future<Output = ()>;
}

/// Wall-clock delay backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

impl Delay for TokioDelay {
    fn sleep(&self, period: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(period)
    }
}

impl<T: Delay + ?Sized> Delay for &T {
    fn sleep(&self, period: Duration) -> impl Future<Output = ()> {
        (**self).sleep(period)
    }
}

/// How a run ended when no transport-level error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The service finished; the report has been printed.
    Ready(AssessmentResponse),
    /// The service reported `ERROR`. Not a process failure.
    Failed { host: String, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Drives one assessment: start a scan, then poll on a fixed interval until
/// the service reports a terminal status.
#[derive(Debug, Clone)]
pub struct Poller<D = TokioDelay> {
    client: SslLabsClient,
    interval: Duration,
    delay: D,
}

impl Poller<TokioDelay> {
    pub fn new(config: PollConfig) -> Self {
        Self::with_delay(config, TokioDelay)
    }
}

impl<D: Delay> Poller<D> {
    pub fn with_delay(config: PollConfig, delay: D) -> Self {
        Self {
            client: SslLabsClient::new(config.api_url),
            interval: config.interval,
            delay,
        }
    }

    /// Run to completion, writing progress and the final report to `out`.
    ///
    /// Any analyze error, on the start call or on a poll, ends the run
    /// immediately. There is no retry and no overall deadline.
    pub async fn run<W: Write>(&self, domain: &str, out: &mut W) -> Result<Outcome, RunError> {
        writeln!(out, "Starting SSL Labs analysis for: {domain}")?;

        // Only acceptance matters here; the body is not used.
        let _ = self.client.analyze(domain, true).await?;
        info!(domain, api_url = %self.client.api_url(), "assessment started");

        let mut polls = 0u64;
        loop {
            self.delay.sleep(self.interval).await;
            polls += 1;

            let response = self.client.analyze(domain, false).await?;
            writeln!(out, "Current status: {}", response.status)?;
            for ep in &response.endpoints {
                debug!(
                    poll = polls,
                    ip = %ep.ip_address,
                    progress = ep.progress,
                    status = %ep.status_message,
                    "endpoint progress"
                );
            }
            if !response.status.is_terminal() {
                continue;
            }

            if response.status == AssessmentStatus::Ready {
                info!(polls, endpoints = response.endpoints.len(), "assessment ready");
                write_report(out, &response)?;
                return Ok(Outcome::Ready(response));
            }

            info!(polls, message = %response.status_message, "assessment failed remotely");
            writeln!(out, "Analysis failed: {}", response.status_message)?;
            return Ok(Outcome::Failed {
                host: response.host,
                message: response.status_message,
            });
        }
    }
}
