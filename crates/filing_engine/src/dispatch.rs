use std::time::Duration;

use filing_logging::{filing_debug, filing_info, filing_warn};
use tokio_util::sync::CancellationToken;

use crate::trigger::DownloadTrigger;
use crate::{BatchId, BatchReport, DownloadRequest, EngineEvent, ProgressSink};

/// Default gap between two download triggers of one batch.
pub const DEFAULT_PACING: Duration = Duration::from_millis(400);

/// Triggers a batch of downloads strictly one after another with a fixed gap.
///
/// Browsers and download managers drop or merge near-simultaneous download
/// starts, so item `i + 1` is never triggered earlier than `pacing` after
/// item `i`. A failing trigger is reported and skipped; the batch goes on.
#[derive(Debug, Clone, Copy)]
pub struct PacedDispatcher {
    pacing: Duration,
}

impl Default for PacedDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_PACING)
    }
}

impl PacedDispatcher {
    pub fn new(pacing: Duration) -> Self {
        Self { pacing }
    }

    pub async fn run(
        &self,
        batch_id: BatchId,
        requests: &[DownloadRequest],
        trigger: &dyn DownloadTrigger,
        cancel: &CancellationToken,
        sink: &dyn ProgressSink,
    ) -> BatchReport {
        let total = requests.len();
        let mut report = BatchReport {
            total,
            ..BatchReport::default()
        };
        filing_info!("Batch {} dispatching {} downloads", batch_id, total);

        for (offset, request) in requests.iter().enumerate() {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }
            let index = offset + 1;
            sink.emit(EngineEvent::BatchProgress {
                batch_id,
                index,
                total,
                title: request.title.clone(),
            });

            match trigger.trigger(request) {
                Ok(()) => report.triggered += 1,
                Err(err) => {
                    filing_warn!("Batch {} item {} failed: {}", batch_id, index, err);
                    report.failed += 1;
                    sink.emit(EngineEvent::BatchItemFailed {
                        batch_id,
                        index,
                        title: request.title.clone(),
                        reason: err.to_string(),
                    });
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    filing_debug!("Batch {} cancelled after item {}", batch_id, index);
                    report.cancelled = index < total;
                    if report.cancelled {
                        break;
                    }
                }
                _ = tokio::time::sleep(self.pacing) => {}
            }
        }

        sink.emit(EngineEvent::BatchFinished { batch_id, report });
        report
    }
}
