use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use filing_logging::{filing_debug, filing_info};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::dispatch::{PacedDispatcher, DEFAULT_PACING};
use crate::persist::AtomicFileWriter;
use crate::search::{ClientSettings, ReqwestSearchClient, SearchClient};
use crate::sink::ChannelProgressSink;
use crate::trigger::{DownloadTrigger, HttpDownloadTrigger};
use crate::{
    BatchId, DownloadRequest, EngineEvent, ProgressSink, SearchError, SearchGeneration, SearchQuery,
};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub client: ClientSettings,
    pub output_dir: PathBuf,
    pub pacing: Duration,
}

impl EngineConfig {
    pub fn new(client: ClientSettings, output_dir: PathBuf) -> Self {
        Self {
            client,
            output_dir,
            pacing: DEFAULT_PACING,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] SearchError),
}

enum EngineCommand {
    Search {
        generation: SearchGeneration,
        query: SearchQuery,
    },
    Download(DownloadRequest),
    StartBatch {
        batch_id: BatchId,
        requests: Vec<DownloadRequest>,
    },
    CancelBatch {
        batch_id: BatchId,
    },
}

/// Sends commands to the background IO thread.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving end for everything the engine reports.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineEvents {
    /// Blocks until the next event; `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

struct Workers {
    search: Arc<dyn SearchClient>,
    trigger: Arc<dyn DownloadTrigger>,
    dispatcher: PacedDispatcher,
    sink: Arc<ChannelProgressSink>,
}

impl EngineHandle {
    pub fn spawn(config: EngineConfig) -> Result<(Self, EngineEvents), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let runtime = tokio::runtime::Runtime::new()?;
        let sink = Arc::new(ChannelProgressSink::new(event_tx));
        let search = Arc::new(ReqwestSearchClient::new(&config.client)?);
        let trigger = Arc::new(HttpDownloadTrigger::new(
            &config.client,
            AtomicFileWriter::new(config.output_dir.clone()),
            runtime.handle().clone(),
            sink.clone(),
        )?);
        let workers = Workers {
            search,
            trigger,
            dispatcher: PacedDispatcher::new(config.pacing),
            sink,
        };

        thread::spawn(move || run_command_loop(runtime, workers, cmd_rx));

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn search(&self, generation: SearchGeneration, query: SearchQuery) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Search { generation, query });
    }

    pub fn download(&self, request: DownloadRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Download(request));
    }

    pub fn start_batch(&self, batch_id: BatchId, requests: Vec<DownloadRequest>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::StartBatch { batch_id, requests });
    }

    pub fn cancel_batch(&self, batch_id: BatchId) {
        let _ = self.cmd_tx.send(EngineCommand::CancelBatch { batch_id });
    }
}

fn run_command_loop(
    runtime: tokio::runtime::Runtime,
    workers: Workers,
    cmd_rx: mpsc::Receiver<EngineCommand>,
) {
    let mut active_batch: Option<(BatchId, CancellationToken)> = None;

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::Search { generation, query } => {
                let search = workers.search.clone();
                let sink = workers.sink.clone();
                runtime.spawn(async move {
                    let result = search.search(&query).await;
                    sink.emit(EngineEvent::SearchCompleted { generation, result });
                });
            }
            EngineCommand::Download(request) => {
                if let Err(err) = workers.trigger.trigger(&request) {
                    sink_failure(&workers, &request, err.to_string());
                }
            }
            EngineCommand::StartBatch { batch_id, requests } => {
                let cancel = CancellationToken::new();
                active_batch = Some((batch_id, cancel.clone()));
                let trigger = workers.trigger.clone();
                let sink = workers.sink.clone();
                let dispatcher = workers.dispatcher;
                runtime.spawn(async move {
                    dispatcher
                        .run(batch_id, &requests, trigger.as_ref(), &cancel, sink.as_ref())
                        .await;
                });
            }
            EngineCommand::CancelBatch { batch_id } => match &active_batch {
                Some((active_id, cancel)) if *active_id == batch_id => {
                    filing_info!("Cancelling batch {}", batch_id);
                    cancel.cancel();
                }
                _ => filing_debug!("No running batch {} to cancel", batch_id),
            },
        }
    }
    filing_debug!("Engine command channel closed");
}

fn sink_failure(workers: &Workers, request: &DownloadRequest, reason: String) {
    workers.sink.emit(EngineEvent::DownloadFailed {
        title: request.title.clone(),
        reason,
    });
}
