use crate::{ExportOutcome, Filter, ResultSet, SortKey, StatusSnapshot, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the post URL field (may auto-fill the author).
    PostUrlChanged(String),
    /// User edited the post author field.
    PostAuthorChanged(String),
    /// User edited the login id field.
    LoginIdChanged(String),
    /// User edited the password field.
    PasswordChanged(String),
    /// User toggled the follower cross-reference option.
    CheckFollowersToggled(bool),
    /// User asked to submit the current form.
    SubmitClicked,
    /// The service accepted the submission and issued a task handle.
    SubmitAccepted { task_id: TaskId },
    /// The service rejected the submission.
    SubmitRejected { error: String },
    /// One status poll round trip succeeded.
    StatusReported { snapshot: StatusSnapshot },
    /// One status poll round trip failed (transport-level).
    PollRequestFailed { error: String },
    /// The single post-completion result fetch succeeded.
    ResultFetched { result: ResultSet },
    /// The single post-completion result fetch failed.
    ResultFetchFailed { error: String },
    /// User asked for the spreadsheet export.
    ExportClicked,
    /// The export download finished, one way or the other.
    ExportFinished { outcome: ExportOutcome },
    /// User switched the results filter.
    FilterChanged(Filter),
    /// User edited the results search box.
    SearchChanged(String),
    /// User clicked a sortable column header.
    SortClicked(SortKey),
    /// User navigated the results pager.
    PageChanged(usize),
    /// User asked to abandon the current task and start over.
    ResetClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
