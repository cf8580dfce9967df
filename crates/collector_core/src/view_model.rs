use crate::{dataset, AppState, ExportOutcome, TableView, TaskPhase, TaskState};

/// Everything the shell needs to render the form. The password itself is
/// deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub post_url: String,
    pub post_author: String,
    pub instagram_id: String,
    pub password_present: bool,
    pub check_followers: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleView {
    Idle,
    Submitting,
    /// Polling, or (`loading_result`) waiting for the single result fetch
    /// after a `completed` status.
    Running {
        phase: TaskPhase,
        message: String,
        progress: u8,
        comments_count: usize,
        loading_result: bool,
    },
    /// Counters are the server-provided ones; `table` is the current page
    /// of the dataset view, absent when the result fetch failed.
    Succeeded {
        total_comments: usize,
        follower_count: usize,
        non_follower_count: usize,
        notice: Option<String>,
        table: Option<TableView>,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub form: FormView,
    pub form_error: Option<String>,
    pub lifecycle: LifecycleView,
    pub last_export: Option<ExportOutcome>,
    pub dirty: bool,
}

impl AppViewModel {
    pub(crate) fn project(state: &AppState) -> Self {
        let form = FormView {
            post_url: state.form.post_url.clone(),
            post_author: state.form.post_author.clone(),
            instagram_id: state.form.instagram_id.clone(),
            password_present: !state.form.instagram_password.is_empty(),
            check_followers: state.form.check_followers,
        };

        let lifecycle = match &state.task {
            TaskState::Idle => LifecycleView::Idle,
            TaskState::Submitting => LifecycleView::Submitting,
            TaskState::Polling { snapshot, .. } => LifecycleView::Running {
                phase: snapshot.phase,
                message: snapshot.message.clone(),
                progress: snapshot.progress,
                comments_count: snapshot.comments_count,
                loading_result: false,
            },
            TaskState::FetchingResult { snapshot, .. } => LifecycleView::Running {
                phase: snapshot.phase,
                message: snapshot.message.clone(),
                progress: snapshot.progress,
                comments_count: snapshot.comments_count,
                loading_result: true,
            },
            TaskState::Succeeded { result, notice, .. } => LifecycleView::Succeeded {
                total_comments: result.as_ref().map_or(0, |r| r.comments.len()),
                follower_count: result.as_ref().map_or(0, |r| r.follower_count),
                non_follower_count: result.as_ref().map_or(0, |r| r.non_follower_count),
                notice: notice.clone(),
                table: result
                    .as_ref()
                    .map(|r| dataset::view(&r.comments, &state.table)),
            },
            TaskState::Failed { error } => LifecycleView::Failed {
                error: error.clone(),
            },
        };

        Self {
            form,
            form_error: state.form_error.clone(),
            lifecycle,
            last_export: state.last_export.clone(),
            dirty: state.is_dirty(),
        }
    }
}
