use filing_logging::{filing_debug, filing_info, filing_warn};

use crate::status::Severity;
use crate::{
    AppState, BatchSummary, ClientError, Effect, Msg, SearchOutcome, SearchRequest, SearchSession,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryChanged(text) => {
            state.form_mut().query = text;
            state.mark_dirty();
            Vec::new()
        }
        Msg::ReportTypeChanged(report_type) => {
            state.form_mut().report_type = report_type;
            state.mark_dirty();
            Vec::new()
        }
        Msg::YearChanged(year) => {
            state.form_mut().year = year;
            state.mark_dirty();
            Vec::new()
        }
        Msg::SearchSubmitted => submit_search(&mut state),
        Msg::SearchCompleted {
            generation,
            outcome,
        } => {
            let Some(request) = state.take_pending(generation) else {
                filing_debug!("Dropping stale search response generation={}", generation);
                return (state, Vec::new());
            };
            complete_search(&mut state, &request, outcome);
            Vec::new()
        }
        Msg::RowToggled { report_id, checked } => {
            if state.table_mut().toggle_row(&report_id, checked) {
                state.mark_dirty();
            } else {
                filing_debug!("Toggle for unknown row {:?} ignored", report_id);
            }
            Vec::new()
        }
        Msg::SelectAllToggled(checked) => {
            if state.table_mut().row_count() > 0 {
                state.table_mut().set_all(checked);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RowDownloadClicked { report_id } => {
            // Only rows on screen can be downloaded; a pending search hides them.
            let job = state
                .session()
                .filter(|_| state.table().contains(&report_id))
                .and_then(|session| session.find(&report_id))
                .and_then(|report| state.download_job(report));
            match job {
                Some(job) => {
                    state.status_mut().info(format!("正在下载：{}", job.title));
                    state.mark_dirty();
                    filing_info!("Download report_id={} title={:?}", job.report_id, job.title);
                    vec![Effect::TriggerDownload(job)]
                }
                None => {
                    filing_debug!("Download for unknown report {:?} ignored", report_id);
                    Vec::new()
                }
            }
        }
        Msg::DownloadSelectedClicked => start_batch(&mut state),
        Msg::StopBatchClicked => match state.running_batch() {
            Some(batch) => {
                filing_info!("Stop requested for batch {}", batch.batch_id);
                vec![Effect::CancelBatch {
                    batch_id: batch.batch_id,
                }]
            }
            None => Vec::new(),
        },
        Msg::BatchProgress {
            batch_id,
            index,
            total,
            title,
        } => {
            if is_running(&state, batch_id) {
                state
                    .status_mut()
                    .info(format!("正在下载 {index}/{total}：{title}"));
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::BatchItemFailed {
            batch_id,
            index,
            title,
            reason,
        } => {
            if is_running(&state, batch_id) {
                state.status_mut().set(
                    format!("第 {index} 条触发失败：{title}（{reason}）"),
                    Severity::Warn,
                );
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::BatchFinished { batch_id, summary } => {
            if is_running(&state, batch_id) {
                state.end_batch();
                let (message, severity) = batch_advisory(&summary);
                state.status_mut().set(message, severity);
                state.mark_dirty();
                filing_info!(
                    "Batch {} finished: triggered={} failed={} cancelled={}",
                    batch_id,
                    summary.triggered,
                    summary.failed,
                    summary.cancelled
                );
            }
            Vec::new()
        }
        Msg::DownloadFailed { title, reason } => {
            state
                .status_mut()
                .set(format!("下载失败：{title}（{reason}）"), Severity::Warn);
            state.mark_dirty();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit_search(state: &mut AppState) -> Vec<Effect> {
    let form = state.form();
    let query = form.query.trim().to_string();
    if query.is_empty() {
        state.status_mut().report(&ClientError::Validation);
        state.mark_dirty();
        return Vec::new();
    }

    let request = SearchRequest {
        query,
        report_type: form.report_type,
        year: form.year,
    };
    let generation = state.begin_search(request.clone());
    state.status_mut().info("正在抓取报告列表...");
    state.mark_dirty();
    filing_info!(
        "Search generation={} query={:?} report_type={} year={:?}",
        generation,
        request.query,
        request.report_type,
        request.year
    );
    vec![Effect::Search {
        generation,
        request,
    }]
}

fn complete_search(state: &mut AppState, request: &SearchRequest, outcome: SearchOutcome) {
    // Loading ends on every exit path of a current-generation response.
    state.finish_loading();
    state.mark_dirty();

    match outcome {
        Ok(payload) => {
            let session = SearchSession::from_payload(request, payload);
            let count = session.reports().len();
            state.replace_session(Some(session));
            state.status_mut().info(format!("已抓取 {count} 条报告。"));
            filing_info!("Search returned {} reports", count);
        }
        Err(failure) => {
            let error = ClientError::search_request(failure.detail);
            filing_warn!("Search failed: {}", error);
            state.status_mut().report(&error);
            state.replace_session(None);
        }
    }
}

fn start_batch(state: &mut AppState) -> Vec<Effect> {
    if let Some(batch) = state.running_batch() {
        filing_debug!("Batch {} still running; request ignored", batch.batch_id);
        return Vec::new();
    }

    let jobs: Vec<_> = state
        .selected()
        .into_iter()
        .filter_map(|report| state.download_job(report))
        .collect();
    if jobs.is_empty() {
        state.status_mut().report(&ClientError::NoSelection);
        state.mark_dirty();
        return Vec::new();
    }

    let batch_id = state.start_batch();
    state.mark_dirty();
    filing_info!("Batch {} started with {} reports", batch_id, jobs.len());
    vec![Effect::StartBatch { batch_id, jobs }]
}

fn is_running(state: &AppState, batch_id: crate::BatchId) -> bool {
    state
        .running_batch()
        .is_some_and(|batch| batch.batch_id == batch_id)
}

fn batch_advisory(summary: &BatchSummary) -> (String, Severity) {
    if summary.cancelled {
        return (
            format!(
                "批量下载已停止（已触发 {}/{}）。",
                summary.triggered, summary.total
            ),
            Severity::Warn,
        );
    }
    if summary.failed > 0 {
        return (
            format!(
                "批量下载已触发（{} 条失败），请留意下载提示。",
                summary.failed
            ),
            Severity::Warn,
        );
    }
    (
        "批量下载已触发，请留意下载提示。".to_string(),
        Severity::Info,
    )
}
