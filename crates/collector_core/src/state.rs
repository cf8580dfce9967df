use crate::view_model::AppViewModel;
use crate::{CrawlForm, ExportOutcome, ResultSet, StatusSnapshot, TableQuery, TaskId};

/// Consecutive transient poll failures tolerated before the task is
/// declared lost (about a minute at the 2 s cadence).
pub const MAX_POLL_FAILURES: u32 = 30;

/// Lifecycle of the single tracked task. Only the transitions encoded in
/// `update` are reachable; illegal combinations (a handle without polling,
/// a result alongside an error) cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskState {
    #[default]
    Idle,
    /// Submission call in flight; no handle yet.
    Submitting,
    /// Fixed-interval polling against the status endpoint.
    Polling {
        task_id: TaskId,
        snapshot: StatusSnapshot,
        poll_failures: u32,
    },
    /// The job reported `completed`; the single result fetch is in flight.
    FetchingResult {
        task_id: TaskId,
        snapshot: StatusSnapshot,
    },
    /// Terminal. `result` is `None` when the job succeeded but the result
    /// fetch did not; `notice` carries that non-fatal explanation.
    Succeeded {
        task_id: TaskId,
        result: Option<ResultSet>,
        notice: Option<String>,
    },
    /// Terminal.
    Failed { error: String },
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Succeeded { .. } | TaskState::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) form: CrawlForm,
    pub(crate) form_error: Option<String>,
    pub(crate) task: TaskState,
    pub(crate) table: TableQuery,
    pub(crate) last_export: Option<ExportOutcome>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore non-secret form defaults persisted by the app shell.
    pub fn with_form(form: CrawlForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn task(&self) -> &TaskState {
        &self.task
    }

    pub fn form(&self) -> &CrawlForm {
        &self.form
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::project(self)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
