use std::sync::Arc;

use filing_logging::{filing_info, filing_warn};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use thiserror::Error;
use tokio::runtime::Handle;

use crate::filename::report_filename;
use crate::persist::{AtomicFileWriter, PersistError};
use crate::search::{map_reqwest_error, ClientSettings};
use crate::{DownloadRequest, EngineEvent, FailureKind, ProgressSink, SearchError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    #[error("invalid download url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Starts one download and returns as soon as it is under way.
///
/// Implementations must not wait for the transfer; completion is only
/// observable through whatever side channel they report to.
pub trait DownloadTrigger: Send + Sync {
    fn trigger(&self, request: &DownloadRequest) -> Result<(), TriggerError>;
}

#[derive(Debug, Error)]
enum DownloadError {
    #[error("{0}")]
    Request(SearchError),
    #[error("{0}")]
    Persist(#[from] PersistError),
}

/// Fetches documents in the background and saves them to an output directory.
pub struct HttpDownloadTrigger {
    client: reqwest::Client,
    base_url: Url,
    writer: Arc<AtomicFileWriter>,
    runtime: Handle,
    sink: Arc<dyn ProgressSink>,
}

impl HttpDownloadTrigger {
    pub fn new(
        settings: &ClientSettings,
        writer: AtomicFileWriter,
        runtime: Handle,
        sink: Arc<dyn ProgressSink>,
    ) -> Result<Self, SearchError> {
        let client = settings
            .build_client()
            .map_err(|err| SearchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            writer: Arc::new(writer),
            runtime,
            sink,
        })
    }

    fn resolve(&self, request: &DownloadRequest) -> Result<Url, TriggerError> {
        self.base_url
            .join(&request.url)
            .map_err(|err| TriggerError::InvalidUrl {
                url: request.url.clone(),
                reason: err.to_string(),
            })
    }
}

impl DownloadTrigger for HttpDownloadTrigger {
    fn trigger(&self, request: &DownloadRequest) -> Result<(), TriggerError> {
        let url = self.resolve(request)?;
        filing_info!("Triggering download {}", url);

        let client = self.client.clone();
        let writer = self.writer.clone();
        let sink = self.sink.clone();
        let title = request.title.clone();
        let name_key = request.url.clone();
        self.runtime.spawn(async move {
            let event = match download_to_file(&client, url, &title, &name_key, &writer).await {
                Ok(path) => {
                    filing_info!("Saved {:?}", path);
                    EngineEvent::DownloadSaved { title, path }
                }
                Err(err) => {
                    filing_warn!("Download of {:?} failed: {}", title, err);
                    EngineEvent::DownloadFailed {
                        title,
                        reason: err.to_string(),
                    }
                }
            };
            sink.emit(event);
        });
        Ok(())
    }
}

async fn download_to_file(
    client: &reqwest::Client,
    url: Url,
    title: &str,
    name_key: &str,
    writer: &AtomicFileWriter,
) -> Result<std::path::PathBuf, DownloadError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| DownloadError::Request(map_reqwest_error(err)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::Request(SearchError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        )));
    }

    // The backend falls back to the filing's HTML detail page when it
    // cannot locate the PDF.
    let is_html = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().starts_with("text/html"));
    let extension = if is_html { "html" } else { "pdf" };

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|err| DownloadError::Request(map_reqwest_error(err)))?;
        bytes.extend_from_slice(&chunk);
    }

    let filename = report_filename(title, name_key, extension);
    Ok(writer.write(&filename, &bytes)?)
}
