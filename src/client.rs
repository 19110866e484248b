use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::types::AssessmentResponse;

/// Public SSL Labs analyze endpoint.
pub const DEFAULT_API_URL: &str = "https://api.ssllabs.com/api/v2/analyze";

/// Failure of a single analyze call. No partial response is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    #[error("failed to read response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Thin client for the analyze endpoint.
///
/// Uses reqwest defaults: no request timeout and no extra headers. Pacing is
/// left to the caller.
#[derive(Debug, Clone)]
pub struct SslLabsClient {
    http: Client,
    api_url: Url,
}

impl SslLabsClient {
    pub fn new(api_url: Url) -> Self {
        Self {
            http: Client::new(),
            api_url,
        }
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Fetch the current assessment for `domain`. With `start_new` the service
    /// discards any cached result and begins a fresh scan.
    pub async fn analyze(
        &self,
        domain: &str,
        start_new: bool,
    ) -> Result<AssessmentResponse, AnalyzeError> {
        let url = analyze_url(&self.api_url, domain, start_new);
        debug!(%url, start_new, "GET analyze");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(AnalyzeError::Transport)?;

        if resp.status() != StatusCode::OK {
            return Err(AnalyzeError::HttpStatus(resp.status().as_u16()));
        }

        let body = resp.bytes().await.map_err(AnalyzeError::BodyRead)?;
        debug!(bytes = body.len(), "analyze response received");
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Build the analyze URL: `host`, `publish=off`, then `startNew=on&all=done`
/// when a new scan is requested. Existing query pairs on `base` are kept.
pub fn analyze_url(base: &Url, domain: &str, start_new: bool) -> Url {
    let mut url = base.clone();
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("host", domain).append_pair("publish", "off");
        if start_new {
            query.append_pair("startNew", "on").append_pair("all", "done");
        }
    }
    url
}
