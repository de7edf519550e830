use crate::download::RunningBatch;
use crate::selection::ResultsTable;
use crate::view_model::{AppViewModel, ResultRowView};
use crate::{
    BatchId, DownloadJob, ReportRecord, ReportType, SearchGeneration, SearchRequest,
    SearchSession, StatusReporter,
};

const NO_SEARCH_YET: &str = "请先查询报告。";

/// Contents of the search form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryForm {
    pub query: String,
    pub report_type: ReportType,
    pub year: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingSearch {
    generation: SearchGeneration,
    request: SearchRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    form: QueryForm,
    session: Option<SearchSession>,
    table: ResultsTable,
    status: StatusReporter,
    loading: bool,
    empty_visible: bool,
    last_generation: SearchGeneration,
    pending: Option<PendingSearch>,
    batch: Option<RunningBatch>,
    last_batch_id: BatchId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let rows = match &self.session {
            Some(session) => self
                .table
                .rows()
                .filter_map(|(report_id, checked)| {
                    session.find(report_id).map(|report| ResultRowView {
                        report_id: report.id.clone(),
                        date: report.date.clone(),
                        title: report.title.clone(),
                        checked,
                    })
                })
                .collect(),
            None => Vec::new(),
        };
        let summary = match &self.session {
            Some(session) => session.summary(),
            None => NO_SEARCH_YET.to_string(),
        };
        AppViewModel {
            form: self.form.clone(),
            loading: self.loading,
            status: self.status.current().cloned(),
            summary,
            rows,
            empty_state_visible: self.empty_visible,
            select_all_checked: self.table.select_all_checked(),
            select_all_enabled: self.table.row_count() > 0,
            download_selected_enabled: self.batch.is_none() && self.table.has_selection(),
            batch_running: self.batch.is_some(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn session(&self) -> Option<&SearchSession> {
        self.session.as_ref()
    }

    pub fn table(&self) -> &ResultsTable {
        &self.table
    }

    pub fn reports(&self) -> &[ReportRecord] {
        self.session
            .as_ref()
            .map(SearchSession::reports)
            .unwrap_or_default()
    }

    /// Checked reports in result order.
    pub fn selected(&self) -> Vec<&ReportRecord> {
        self.table.selected(self.reports())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn form_mut(&mut self) -> &mut QueryForm {
        &mut self.form
    }

    pub(crate) fn form(&self) -> &QueryForm {
        &self.form
    }

    pub(crate) fn table_mut(&mut self) -> &mut ResultsTable {
        &mut self.table
    }

    pub(crate) fn status_mut(&mut self) -> &mut StatusReporter {
        &mut self.status
    }

    /// Marks a new search in flight and returns its generation.
    pub(crate) fn begin_search(&mut self, request: SearchRequest) -> SearchGeneration {
        self.last_generation += 1;
        let generation = self.last_generation;
        self.pending = Some(PendingSearch {
            generation,
            request,
        });
        self.loading = true;
        self.empty_visible = false;
        self.table.clear();
        generation
    }

    /// Takes the request for `generation` if it is the latest submission.
    pub(crate) fn take_pending(&mut self, generation: SearchGeneration) -> Option<SearchRequest> {
        match &self.pending {
            Some(pending) if pending.generation == generation => {
                self.pending.take().map(|pending| pending.request)
            }
            _ => None,
        }
    }

    pub(crate) fn finish_loading(&mut self) {
        self.loading = false;
    }

    /// Replaces the session wholesale (`None` discards it) and re-renders the table.
    pub(crate) fn replace_session(&mut self, session: Option<SearchSession>) {
        self.session = session;
        self.table = ResultsTable::full_render(self.reports());
        self.empty_visible = self.table.row_count() == 0;
    }

    pub(crate) fn download_job(&self, report: &ReportRecord) -> Option<DownloadJob> {
        self.session.as_ref().map(|session| DownloadJob {
            stock_id: session.target_id().to_string(),
            report_id: report.id.clone(),
            title: report.title.clone(),
        })
    }

    pub(crate) fn running_batch(&self) -> Option<RunningBatch> {
        self.batch
    }

    pub(crate) fn start_batch(&mut self) -> BatchId {
        self.last_batch_id += 1;
        self.batch = Some(RunningBatch {
            batch_id: self.last_batch_id,
        });
        self.last_batch_id
    }

    pub(crate) fn end_batch(&mut self) {
        self.batch = None;
    }
}
