use crate::{CrawlRequest, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the one submission call. This effect is the only place the
    /// credential secret travels; it is never stored in state.
    SubmitJob { request: CrawlRequest },
    /// Begin the fixed-interval status polling loop for a task.
    StartPolling { task_id: TaskId },
    /// Cancel the polling loop. Idempotent and safe in any state.
    StopPolling,
    /// Issue the single post-completion result fetch.
    FetchResult { task_id: TaskId },
    /// Download the spreadsheet export for a finished task.
    DownloadExport { task_id: TaskId },
}
