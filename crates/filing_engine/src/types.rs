use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

pub type SearchGeneration = u64;
pub type BatchId = u64;

/// Parameters of `GET /api/reports`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub report_type: String,
    /// Four-digit year; `None` searches every year.
    pub year: Option<String>,
}

/// Success body of `GET /api/reports`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchResponse {
    pub stock_id: String,
    #[serde(default)]
    pub stock_name: String,
    #[serde(default)]
    pub report_type_label: Option<String>,
    #[serde(default)]
    reports: Option<Vec<ReportEntry>>,
}

impl SearchResponse {
    /// Reports in server order; an absent or null array is empty.
    pub fn reports(&self) -> &[ReportEntry] {
        self.reports.as_deref().unwrap_or_default()
    }

    pub fn into_reports(self) -> Vec<ReportEntry> {
        self.reports.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportEntry {
    pub id: String,
    pub date: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchError {
    pub kind: FailureKind,
    /// Message taken from the backend's `detail` field, if it sent one.
    pub detail: Option<String>,
    pub message: String,
}

impl SearchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            detail: None,
            message: message.into(),
        }
    }

    pub(crate) fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail;
        self
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {detail}", self.kind),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for SearchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "malformed response"),
        }
    }
}

/// One document to fetch: a server-relative or absolute URL plus the title
/// used to name the saved file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchReport {
    pub total: usize,
    pub triggered: usize,
    pub failed: usize,
    pub cancelled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SearchCompleted {
        generation: SearchGeneration,
        result: Result<SearchResponse, SearchError>,
    },
    /// Item `index` (1-based) is about to be triggered.
    BatchProgress {
        batch_id: BatchId,
        index: usize,
        total: usize,
        title: String,
    },
    BatchItemFailed {
        batch_id: BatchId,
        index: usize,
        title: String,
        reason: String,
    },
    BatchFinished {
        batch_id: BatchId,
        report: BatchReport,
    },
    /// A background download finished writing its file.
    DownloadSaved { title: String, path: PathBuf },
    DownloadFailed { title: String, reason: String },
}
