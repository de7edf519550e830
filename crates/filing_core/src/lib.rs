//! Filing client core: pure search/selection/download state machine and
//! view-model helpers.
mod download;
mod effect;
mod error;
mod msg;
mod record;
mod selection;
mod session;
mod state;
mod status;
mod update;
mod view_model;

pub use download::{BatchId, BatchSummary, DownloadJob, REPORT_PDF_PATH};
pub use effect::Effect;
pub use error::{ClientError, GENERIC_SEARCH_FAILURE};
pub use msg::Msg;
pub use record::{year_options, ReportRecord, ReportType, UnknownReportType, YearOption, EARLIEST_YEAR};
pub use selection::ResultsTable;
pub use session::{
    SearchFailure, SearchGeneration, SearchOutcome, SearchPayload, SearchRequest, SearchSession,
};
pub use state::{AppState, QueryForm};
pub use status::{Severity, StatusLine, StatusReporter};
pub use update::update;
pub use view_model::{AppViewModel, ResultRowView};
