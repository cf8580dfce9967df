use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use collector_core::{CrawlRequest, ExportOutcome, ResultSet, StatusSnapshot, TaskId};
use collector_logging::{collector_debug, collector_info, collector_warn};
use tokio_util::sync::CancellationToken;

use crate::api::{ApiSettings, CrawlApi, ReqwestApi};
use crate::export::export_filename;
use crate::persist::AtomicFileWriter;
use crate::types::Result;

/// Configuration for the client driver.
#[derive(Clone)]
pub struct ClientConfig {
    pub settings: ApiSettings,
    /// Directory where export downloads land.
    pub export_dir: PathBuf,
    /// Clock for the export filename; injectable so tests stay
    /// deterministic.
    pub today: Arc<dyn Fn() -> NaiveDate + Send + Sync>,
}

impl ClientConfig {
    pub fn default_with_export_dir(export_dir: PathBuf) -> Self {
        Self {
            settings: ApiSettings::from_env(),
            export_dir,
            today: Arc::new(|| Utc::now().date_naive()),
        }
    }
}

enum ClientCommand {
    Submit { request: CrawlRequest },
    StartPolling { task_id: TaskId },
    StopPolling,
    FetchResult { task_id: TaskId },
    DownloadExport { task_id: TaskId },
}

/// Events emitted back to the shell, mirrored into core messages there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    SubmitAccepted { task_id: TaskId },
    SubmitRejected { error: String },
    Status { snapshot: StatusSnapshot },
    PollFailed { error: String },
    ResultFetched { result: ResultSet },
    ResultFetchFailed { error: String },
    ExportFinished { outcome: ExportOutcome },
}

/// Handle to the client worker: a dedicated thread owning a tokio runtime,
/// commands in and events out over std channels. At most one polling loop
/// runs at a time; starting a new one or stopping cancels the previous.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ClientEvent>>>,
}

impl ClientHandle {
    /// Spawns the worker against the real HTTP API.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api = Arc::new(ReqwestApi::new(config.settings.clone())?);
        Ok(Self::with_api(api, config))
    }

    /// Spawns the worker against any [`CrawlApi`] implementation.
    pub fn with_api(api: Arc<dyn CrawlApi>, config: ClientConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let mut poll_token: Option<CancellationToken> = None;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    ClientCommand::Submit { request } => {
                        let api = api.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            collector_info!("submitting crawl for {}", request.post_url);
                            let event = match api.submit(request).await {
                                Ok(task_id) => {
                                    collector_info!("submission accepted as task {task_id}");
                                    ClientEvent::SubmitAccepted { task_id }
                                }
                                Err(err) => ClientEvent::SubmitRejected {
                                    error: err.to_string(),
                                },
                            };
                            let _ = event_tx.send(event);
                        });
                    }
                    ClientCommand::StartPolling { task_id } => {
                        if let Some(token) = poll_token.take() {
                            token.cancel();
                        }
                        let token = CancellationToken::new();
                        poll_token = Some(token.clone());
                        runtime.spawn(poll_loop(
                            api.clone(),
                            task_id,
                            config.settings.poll_interval,
                            token,
                            event_tx.clone(),
                        ));
                    }
                    ClientCommand::StopPolling => {
                        if let Some(token) = poll_token.take() {
                            token.cancel();
                        }
                    }
                    ClientCommand::FetchResult { task_id } => {
                        let api = api.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let event = match api.result(&task_id).await {
                                Ok(result) => ClientEvent::ResultFetched { result },
                                Err(err) => ClientEvent::ResultFetchFailed {
                                    error: err.to_string(),
                                },
                            };
                            let _ = event_tx.send(event);
                        });
                    }
                    ClientCommand::DownloadExport { task_id } => {
                        let api = api.clone();
                        let event_tx = event_tx.clone();
                        let export_dir = config.export_dir.clone();
                        let filename = export_filename((config.today)());
                        runtime.spawn(async move {
                            let outcome = match api.export(&task_id).await {
                                Ok(blob) => {
                                    let writer = AtomicFileWriter::new(export_dir);
                                    match writer.write(&filename, &blob) {
                                        Ok(path) => ExportOutcome::Saved {
                                            path: path.display().to_string(),
                                        },
                                        Err(err) => ExportOutcome::Failed {
                                            error: err.to_string(),
                                        },
                                    }
                                }
                                Err(err) => ExportOutcome::Failed {
                                    error: err.to_string(),
                                },
                            };
                            let _ = event_tx.send(ClientEvent::ExportFinished { outcome });
                        });
                    }
                }
            }
            // Channel closed: the handle was dropped. Outstanding tasks die
            // with the runtime.
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn submit(&self, request: CrawlRequest) {
        let _ = self.cmd_tx.send(ClientCommand::Submit { request });
    }

    pub fn start_polling(&self, task_id: impl Into<TaskId>) {
        let _ = self.cmd_tx.send(ClientCommand::StartPolling {
            task_id: task_id.into(),
        });
    }

    /// Idempotent; safe to call in any state.
    pub fn stop_polling(&self) {
        let _ = self.cmd_tx.send(ClientCommand::StopPolling);
    }

    pub fn fetch_result(&self, task_id: impl Into<TaskId>) {
        let _ = self.cmd_tx.send(ClientCommand::FetchResult {
            task_id: task_id.into(),
        });
    }

    pub fn download_export(&self, task_id: impl Into<TaskId>) {
        let _ = self.cmd_tx.send(ClientCommand::DownloadExport {
            task_id: task_id.into(),
        });
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

/// Fixed-interval status polling. One request is in flight at a time; the
/// loop awaits each round trip before the next tick. Ends on cancellation
/// or on a terminal status tag.
async fn poll_loop(
    api: Arc<dyn CrawlApi>,
    task_id: TaskId,
    period: Duration,
    token: CancellationToken,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    let mut ticks = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => return,
            _ = ticks.tick() => {}
        }

        let outcome = api.status(&task_id).await;
        // Nothing is delivered after cancellation, even for a response that
        // was already in flight when it happened.
        if token.is_cancelled() {
            return;
        }

        match outcome {
            Ok(snapshot) => {
                collector_debug!(
                    "task {task_id}: {} at {}%",
                    snapshot.phase,
                    snapshot.progress
                );
                let terminal = snapshot.phase.is_terminal();
                if event_tx.send(ClientEvent::Status { snapshot }).is_err() {
                    return;
                }
                if terminal {
                    return;
                }
            }
            Err(err) => {
                // Transient; the next tick retries. The state machine owns
                // the give-up policy.
                collector_warn!("status poll for task {task_id} failed: {err}");
                let sent = event_tx.send(ClientEvent::PollFailed {
                    error: err.to_string(),
                });
                if sent.is_err() {
                    return;
                }
            }
        }
    }
}
