use crate::{QueryForm, StatusLine};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub form: QueryForm,
    pub loading: bool,
    pub status: Option<StatusLine>,
    pub summary: String,
    pub rows: Vec<ResultRowView>,
    pub empty_state_visible: bool,
    pub select_all_checked: bool,
    pub select_all_enabled: bool,
    pub download_selected_enabled: bool,
    pub batch_running: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub report_id: String,
    pub date: String,
    pub title: String,
    pub checked: bool,
}
