//! Filing engine: backend search client, download trigger and paced batch
//! dispatch.
mod dispatch;
mod engine;
mod filename;
mod persist;
mod search;
mod sink;
mod trigger;
mod types;

pub use dispatch::{PacedDispatcher, DEFAULT_PACING};
pub use engine::{EngineConfig, EngineError, EngineEvents, EngineHandle};
pub use filename::{report_filename, sanitize_title};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use search::{ClientSettings, ReqwestSearchClient, SearchClient, SEARCH_PATH};
pub use sink::{ChannelProgressSink, ProgressSink};
pub use trigger::{DownloadTrigger, HttpDownloadTrigger, TriggerError};
pub use types::{
    BatchId, BatchReport, DownloadRequest, EngineEvent, FailureKind, ReportEntry, SearchError,
    SearchGeneration, SearchQuery, SearchResponse,
};
pub use reqwest::Url;
pub use tokio_util::sync::CancellationToken;
