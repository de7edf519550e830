use std::time::Duration;

use filing_logging::{filing_debug, filing_warn};
use reqwest::Url;
use serde::Deserialize;

use crate::{FailureKind, SearchError, SearchQuery, SearchResponse};

/// Path of the backend search endpoint.
pub const SEARCH_PATH: &str = "/api/reports";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// Whole-request timeout. `None` lets a hung request wait for the
    /// transport to give up on its own.
    pub request_timeout: Option<Duration>,
}

impl ClientSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }

    pub(crate) fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder().connect_timeout(self.connect_timeout);
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

#[async_trait::async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSearchClient {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ReqwestSearchClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, SearchError> {
        let client = settings
            .build_client()
            .map_err(|err| SearchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }

    fn search_url(&self, query: &SearchQuery) -> Result<Url, SearchError> {
        let mut url = self
            .base_url
            .join(SEARCH_PATH)
            .map_err(|err| SearchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("query", &query.query)
                .append_pair("report_type", &query.report_type);
            if let Some(year) = query.year.as_deref().filter(|year| !year.is_empty()) {
                pairs.append_pair("year", year);
            }
        }
        Ok(url)
    }
}

#[async_trait::async_trait]
impl SearchClient for ReqwestSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError> {
        let url = self.search_url(query)?;
        filing_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let detail = error_detail(&body);
            filing_warn!("Search returned {} detail={:?}", status, detail);
            return Err(
                SearchError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
                    .with_detail(detail),
            );
        }

        serde_json::from_slice(&body)
            .map_err(|err| SearchError::new(FailureKind::Decode, err.to_string()))
    }
}

/// Extracts a string `detail` from an error body; anything else yields `None`.
fn error_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        return SearchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return SearchError::new(FailureKind::Decode, err.to_string());
    }
    SearchError::new(FailureKind::Network, err.to_string())
}
