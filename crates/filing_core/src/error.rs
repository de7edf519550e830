use thiserror::Error;

use crate::status::Severity;

/// Shown when the backend gives no usable `detail`.
pub const GENERIC_SEARCH_FAILURE: &str = "抓取失败";

/// Every failure the client surfaces. None of them are fatal; each one is
/// written to the status line and the UI stays re-submittable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Query trimmed to empty; no request is made.
    #[error("请输入股票代码或名称。")]
    Validation,
    /// Non-2xx response or transport failure.
    #[error("{0}")]
    SearchRequest(String),
    /// Batch download requested with nothing checked.
    #[error("请先勾选要下载的报告。")]
    NoSelection,
}

impl ClientError {
    pub(crate) fn search_request(detail: Option<String>) -> Self {
        let message = detail
            .map(|detail| detail.trim().to_string())
            .filter(|detail| !detail.is_empty())
            .unwrap_or_else(|| GENERIC_SEARCH_FAILURE.to_string());
        ClientError::SearchRequest(message)
    }

    pub fn severity(&self) -> Severity {
        match self {
            ClientError::Validation | ClientError::NoSelection => Severity::Warn,
            ClientError::SearchRequest(_) => Severity::Error,
        }
    }
}
