use crate::error::{ClientError, Result};
use kestrel_core::lighthouse::PagespeedResponse;
use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

const PSI_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// Device strategy for the Lighthouse run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    Mobile,
    Desktop,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Mobile => "mobile",
            Strategy::Desktop => "desktop",
        }
    }
}

/// Client for the PageSpeed Insights v5 API. One blocking GET per audit,
/// no retries; the caller owns the timeout.
pub struct PsiClient {
    http: Client,
    endpoint: String,
    categories: Vec<String>,
}

impl PsiClient {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("kestrel/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: PSI_ENDPOINT.to_string(),
            categories: Vec::new(),
        })
    }

    /// Point the client at a different endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Request additional Lighthouse categories beyond the default
    /// (performance) one.
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Run one audit for the target URL. The API key, when present, goes
    /// into the query string and nowhere else; it is never logged.
    pub fn fetch(
        &self,
        target: &str,
        strategy: Strategy,
        api_key: Option<&str>,
    ) -> Result<PagespeedResponse> {
        let target = normalize_target(target);
        Url::parse(&target).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", target, e)))?;

        tracing::info!("Requesting PageSpeed audit for {} ({})", target, strategy.as_str());

        let mut query: Vec<(&str, &str)> = vec![("url", &target), ("strategy", strategy.as_str())];
        for category in &self.categories {
            query.push(("category", category));
        }
        if let Some(key) = api_key {
            query.push(("key", key));
        }

        let response = self.http.get(&self.endpoint).query(&query).send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::warn!("Upstream returned HTTP {}", status.as_u16());
            return Err(upstream_error(status.as_u16(), &body));
        }

        let body = response.text()?;
        let parsed: PagespeedResponse = serde_json::from_str(&body)?;

        tracing::info!(
            "Audit complete: {} audits returned",
            parsed.lighthouse_result.audits.len()
        );

        Ok(parsed)
    }
}

/// Users paste bare hostnames; the API wants a scheme.
fn normalize_target(target: &str) -> String {
    let target = target.trim();
    if target.contains("://") {
        target.to_string()
    } else {
        format!("https://{}", target)
    }
}

/// Non-200 responses carry `{"error": {"message": ...}}` when the API
/// itself rejected the request; surface that message verbatim, else the
/// status code.
fn upstream_error(status: u16, body: &str) -> ClientError {
    let message = extract_error_message(body)
        .unwrap_or_else(|| format!("HTTP error {}", status));
    ClientError::Upstream { status, message }
}

fn extract_error_message(body: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
    parsed
        .get("error")?
        .get("message")?
        .as_str()
        .map(|s| s.to_string())
}
