use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use collector_client::{ClientEvent, ClientHandle};
use collector_core::{Effect, Msg};
use collector_logging::collector_info;

use crate::app::AppMsg;

/// Bridges core effects to the client worker and client events back into
/// core messages.
pub struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub fn new(client: ClientHandle, msg_tx: mpsc::Sender<AppMsg>) -> Self {
        let runner = Self { client };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitJob { request } => {
                    collector_info!("SubmitJob for post {}", request.post_url);
                    self.client.submit(request);
                }
                Effect::StartPolling { task_id } => {
                    collector_info!("StartPolling task {}", task_id);
                    self.client.start_polling(task_id);
                }
                Effect::StopPolling => {
                    self.client.stop_polling();
                }
                Effect::FetchResult { task_id } => {
                    collector_info!("FetchResult task {}", task_id);
                    self.client.fetch_result(task_id);
                }
                Effect::DownloadExport { task_id } => {
                    collector_info!("DownloadExport task {}", task_id);
                    self.client.download_export(task_id);
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<AppMsg>) {
        let client = self.client.clone();
        thread::spawn(move || loop {
            if let Some(event) = client.try_recv() {
                if msg_tx.send(AppMsg::Core(map_event(event))).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::SubmitAccepted { task_id } => Msg::SubmitAccepted { task_id },
        ClientEvent::SubmitRejected { error } => Msg::SubmitRejected { error },
        ClientEvent::Status { snapshot } => Msg::StatusReported { snapshot },
        ClientEvent::PollFailed { error } => Msg::PollRequestFailed { error },
        ClientEvent::ResultFetched { result } => Msg::ResultFetched { result },
        ClientEvent::ResultFetchFailed { error } => Msg::ResultFetchFailed { error },
        ClientEvent::ExportFinished { outcome } => Msg::ExportFinished { outcome },
    }
}
