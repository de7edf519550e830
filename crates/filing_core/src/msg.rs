use crate::{BatchId, BatchSummary, ReportType, SearchGeneration, SearchOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the query text field.
    QueryChanged(String),
    ReportTypeChanged(ReportType),
    /// `None` selects "all years".
    YearChanged(Option<u16>),
    /// User submitted the search form.
    SearchSubmitted,
    /// Backend answered (or failed) a search.
    SearchCompleted {
        generation: SearchGeneration,
        outcome: SearchOutcome,
    },
    /// A row checkbox changed.
    RowToggled { report_id: String, checked: bool },
    /// The select-all checkbox changed.
    SelectAllToggled(bool),
    /// Per-row download action.
    RowDownloadClicked { report_id: String },
    DownloadSelectedClicked,
    StopBatchClicked,
    /// Dispatcher is about to trigger item `index` (1-based) of `total`.
    BatchProgress {
        batch_id: BatchId,
        index: usize,
        total: usize,
        title: String,
    },
    /// Triggering item `index` failed; the batch continues.
    BatchItemFailed {
        batch_id: BatchId,
        index: usize,
        title: String,
        reason: String,
    },
    BatchFinished {
        batch_id: BatchId,
        summary: BatchSummary,
    },
    /// A triggered download could not be completed.
    DownloadFailed { title: String, reason: String },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Input that changes nothing; the state comes back untouched.
    NoOp,
}
