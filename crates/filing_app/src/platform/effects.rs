use std::sync::mpsc;
use std::thread;

use filing_core::{
    BatchSummary, DownloadJob, Effect, Msg, ReportRecord, SearchFailure, SearchPayload,
    SearchRequest,
};
use filing_engine::{
    BatchReport, DownloadRequest, EngineConfig, EngineError, EngineEvent, EngineEvents,
    EngineHandle, SearchQuery, SearchResponse,
};
use filing_logging::{filing_info, filing_warn};

use super::app::UiEvent;

/// Executes core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, ui_tx: mpsc::Sender<UiEvent>) -> Result<Self, EngineError> {
        let (engine, events) = EngineHandle::spawn(config)?;
        spawn_event_loop(events, ui_tx);
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Search {
                    generation,
                    request,
                } => {
                    self.engine.search(generation, search_query(&request));
                }
                Effect::TriggerDownload(job) => {
                    self.engine.download(download_request(&job));
                }
                Effect::StartBatch { batch_id, jobs } => {
                    filing_info!("StartBatch batch_id={} jobs={}", batch_id, jobs.len());
                    let requests = jobs.iter().map(download_request).collect();
                    self.engine.start_batch(batch_id, requests);
                }
                Effect::CancelBatch { batch_id } => {
                    self.engine.cancel_batch(batch_id);
                }
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, ui_tx: mpsc::Sender<UiEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            let Some(msg) = map_event(event) else {
                continue;
            };
            if ui_tx.send(UiEvent::Msg(msg)).is_err() {
                break;
            }
        }
    });
}

fn map_event(event: EngineEvent) -> Option<Msg> {
    let msg = match event {
        EngineEvent::SearchCompleted { generation, result } => Msg::SearchCompleted {
            generation,
            outcome: result.map(search_payload).map_err(|err| {
                filing_warn!("Search generation={} failed: {}", generation, err);
                SearchFailure { detail: err.detail }
            }),
        },
        EngineEvent::BatchProgress {
            batch_id,
            index,
            total,
            title,
        } => Msg::BatchProgress {
            batch_id,
            index,
            total,
            title,
        },
        EngineEvent::BatchItemFailed {
            batch_id,
            index,
            title,
            reason,
        } => Msg::BatchItemFailed {
            batch_id,
            index,
            title,
            reason,
        },
        EngineEvent::BatchFinished { batch_id, report } => Msg::BatchFinished {
            batch_id,
            summary: batch_summary(report),
        },
        EngineEvent::DownloadSaved { title, path } => {
            filing_info!("Download {:?} saved to {:?}", title, path);
            return None;
        }
        EngineEvent::DownloadFailed { title, reason } => Msg::DownloadFailed { title, reason },
    };
    Some(msg)
}

fn search_query(request: &SearchRequest) -> SearchQuery {
    SearchQuery {
        query: request.query.clone(),
        report_type: request.report_type.token().to_string(),
        year: request.year.map(|year| year.to_string()),
    }
}

fn search_payload(response: SearchResponse) -> SearchPayload {
    let stock_id = response.stock_id.clone();
    let stock_name = response.stock_name.clone();
    let report_type_label = response.report_type_label.clone();
    let reports = response
        .into_reports()
        .into_iter()
        .map(|entry| ReportRecord::new(entry.id, entry.date, entry.title))
        .collect();
    SearchPayload {
        stock_id,
        stock_name,
        report_type_label,
        reports,
    }
}

fn download_request(job: &DownloadJob) -> DownloadRequest {
    DownloadRequest {
        url: job.relative_url(),
        title: job.title.clone(),
    }
}

fn batch_summary(report: BatchReport) -> BatchSummary {
    BatchSummary {
        total: report.total,
        triggered: report.triggered,
        failed: report.failed,
        cancelled: report.cancelled,
    }
}
