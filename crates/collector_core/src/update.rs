use crate::{
    AppState, Effect, Msg, StatusSnapshot, TaskPhase, TaskState, MAX_POLL_FAILURES,
};

const GENERIC_CRAWL_ERROR: &str = "The crawl failed for an unknown reason.";
const LOST_CONTACT_ERROR: &str = "Lost contact with the collection service.";
const INCOMPLETE_FORM_ERROR: &str = "Fill in every field before starting.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PostUrlChanged(url) => {
            state.form.set_post_url(url);
            state.form_error = None;
            state.mark_dirty();
            Vec::new()
        }
        Msg::PostAuthorChanged(author) => {
            state.form.post_author = author;
            state.form_error = None;
            state.mark_dirty();
            Vec::new()
        }
        Msg::LoginIdChanged(id) => {
            state.form.instagram_id = id;
            state.form_error = None;
            state.mark_dirty();
            Vec::new()
        }
        Msg::PasswordChanged(password) => {
            state.form.instagram_password = password;
            state.form_error = None;
            state.mark_dirty();
            Vec::new()
        }
        Msg::CheckFollowersToggled(enabled) => {
            state.form.check_followers = enabled;
            state.mark_dirty();
            Vec::new()
        }
        Msg::SubmitClicked => {
            if !matches!(state.task, TaskState::Idle) {
                // A task is already tracked; re-entrant submit is rejected
                // without touching it.
                return (state, Vec::new());
            }
            match state.form.build_request() {
                Some(request) => {
                    state.task = TaskState::Submitting;
                    state.form_error = None;
                    state.last_export = None;
                    state.mark_dirty();
                    vec![Effect::SubmitJob { request }]
                }
                None => {
                    state.form_error = Some(INCOMPLETE_FORM_ERROR.to_string());
                    state.mark_dirty();
                    Vec::new()
                }
            }
        }
        Msg::SubmitAccepted { task_id } => {
            if !matches!(state.task, TaskState::Submitting) {
                return (state, Vec::new());
            }
            state.task = TaskState::Polling {
                task_id: task_id.clone(),
                snapshot: StatusSnapshot::initial(),
                poll_failures: 0,
            };
            state.mark_dirty();
            vec![Effect::StartPolling { task_id }]
        }
        Msg::SubmitRejected { error } => {
            if !matches!(state.task, TaskState::Submitting) {
                return (state, Vec::new());
            }
            state.task = TaskState::Failed { error };
            state.mark_dirty();
            Vec::new()
        }
        Msg::StatusReported { snapshot } => apply_status(&mut state, snapshot),
        Msg::PollRequestFailed { error: _ } => {
            let TaskState::Polling { poll_failures, .. } = &mut state.task else {
                return (state, Vec::new());
            };
            *poll_failures += 1;
            if *poll_failures >= MAX_POLL_FAILURES {
                state.task = TaskState::Failed {
                    error: LOST_CONTACT_ERROR.to_string(),
                };
                state.mark_dirty();
                vec![Effect::StopPolling]
            } else {
                // Transient; retried on the next tick.
                Vec::new()
            }
        }
        Msg::ResultFetched { result } => {
            let TaskState::FetchingResult { task_id, .. } = &state.task else {
                return (state, Vec::new());
            };
            state.task = TaskState::Succeeded {
                task_id: task_id.clone(),
                result: Some(result),
                notice: None,
            };
            state.table = crate::TableQuery::default();
            state.mark_dirty();
            Vec::new()
        }
        Msg::ResultFetchFailed { error } => {
            let TaskState::FetchingResult { task_id, .. } = &state.task else {
                return (state, Vec::new());
            };
            // The remote job itself succeeded; a failed result fetch does
            // not demote it. The table is simply absent.
            state.task = TaskState::Succeeded {
                task_id: task_id.clone(),
                result: None,
                notice: Some(error),
            };
            state.mark_dirty();
            Vec::new()
        }
        Msg::ExportClicked => {
            let TaskState::Succeeded { task_id, .. } = &state.task else {
                return (state, Vec::new());
            };
            let task_id = task_id.clone();
            state.last_export = None;
            state.mark_dirty();
            vec![Effect::DownloadExport { task_id }]
        }
        Msg::ExportFinished { outcome } => {
            state.last_export = Some(outcome);
            state.mark_dirty();
            Vec::new()
        }
        Msg::FilterChanged(filter) => {
            state.table.filter = filter;
            state.table.page = 1;
            state.mark_dirty();
            Vec::new()
        }
        Msg::SearchChanged(search) => {
            state.table.search = search;
            state.table.page = 1;
            state.mark_dirty();
            Vec::new()
        }
        Msg::SortClicked(key) => {
            state.table.toggle_sort(key);
            state.mark_dirty();
            Vec::new()
        }
        Msg::PageChanged(page) => {
            state.table.page = page.max(1);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ResetClicked => {
            state.task = TaskState::Idle;
            state.table = crate::TableQuery::default();
            state.form_error = None;
            state.last_export = None;
            state.mark_dirty();
            // Always emitted; cancellation is idempotent in any state.
            vec![Effect::StopPolling]
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn apply_status(state: &mut AppState, snapshot: StatusSnapshot) -> Vec<Effect> {
    let TaskState::Polling {
        task_id,
        snapshot: previous,
        ..
    } = &state.task
    else {
        // Late arrival after reset, terminal state, or the result fetch leg;
        // terminal processing happens at most once.
        return Vec::new();
    };
    let task_id = task_id.clone();

    match snapshot.phase {
        TaskPhase::Completed => {
            let mut snapshot = snapshot;
            snapshot.progress = 100;
            state.task = TaskState::FetchingResult { task_id: task_id.clone(), snapshot };
            state.mark_dirty();
            vec![Effect::StopPolling, Effect::FetchResult { task_id }]
        }
        TaskPhase::Failed => {
            let error = snapshot
                .error
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| GENERIC_CRAWL_ERROR.to_string());
            state.task = TaskState::Failed { error };
            state.mark_dirty();
            vec![Effect::StopPolling]
        }
        _ => {
            // Replace wholesale; progress is clamped and never decreases
            // while non-terminal.
            let mut snapshot = snapshot;
            snapshot.progress = snapshot.progress.clamp(previous.progress, 100);
            state.task = TaskState::Polling {
                task_id,
                snapshot,
                poll_failures: 0,
            };
            state.mark_dirty();
            Vec::new()
        }
    }
}
