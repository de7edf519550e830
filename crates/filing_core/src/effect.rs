use crate::{BatchId, DownloadJob, SearchGeneration, SearchRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one backend search; the answer comes back as `Msg::SearchCompleted`.
    Search {
        generation: SearchGeneration,
        request: SearchRequest,
    },
    /// Fire a single download without waiting for it.
    TriggerDownload(DownloadJob),
    /// Trigger every job in order, paced.
    StartBatch { batch_id: BatchId, jobs: Vec<DownloadJob> },
    CancelBatch { batch_id: BatchId },
}
