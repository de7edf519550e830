use url::form_urlencoded;

/// Path of the backend document-retrieval endpoint.
pub const REPORT_PDF_PATH: &str = "/api/report/pdf";

pub type BatchId = u64;

/// One outbound download request. Built on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
    pub stock_id: String,
    pub report_id: String,
    pub title: String,
}

impl DownloadJob {
    /// Server-relative download URL with percent-encoded query values.
    pub fn relative_url(&self) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("stock_id", &self.stock_id)
            .append_pair("bulletin_id", &self.report_id)
            .append_pair("title", &self.title)
            .finish();
        format!("{REPORT_PDF_PATH}?{query}")
    }
}

/// How a paced batch ended, as reported by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub triggered: usize,
    pub failed: usize,
    pub cancelled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunningBatch {
    pub(crate) batch_id: BatchId,
}
