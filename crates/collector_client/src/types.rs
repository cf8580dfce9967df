use collector_core::{CommentRecord, ResultSet, StatusSnapshot, TaskPhase};
use collector_logging::collector_warn;
use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response; `detail` is the service's explanation when it
    /// sent one, otherwise the HTTP status line.
    #[error("{detail}")]
    Api { status: u16, detail: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    if err.is_decode() {
        return ApiError::InvalidPayload(err.to_string());
    }
    ApiError::Network(err.to_string())
}

/// `{detail}` body attached to non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    pub task_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    #[allow(dead_code)]
    pub task_id: String,
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub comments_count: usize,
    #[serde(default)]
    pub current_step: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusResponse {
    pub fn into_snapshot(self) -> Result<StatusSnapshot> {
        let phase = parse_phase(&self.status)?;
        let message = match self.current_step {
            Some(step) if !step.is_empty() => format!("{} ({step})", self.message),
            _ => self.message,
        };
        Ok(StatusSnapshot {
            phase,
            message,
            progress: self.progress.clamp(0, 100) as u8,
            comments_count: self.comments_count,
            error: self.error,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentPayload {
    pub username: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub is_reply: bool,
    #[serde(default)]
    pub is_follower: Option<bool>,
}

impl From<CommentPayload> for CommentRecord {
    fn from(payload: CommentPayload) -> Self {
        CommentRecord {
            username: payload.username,
            content: payload.content,
            timestamp: payload.datetime,
            is_reply: payload.is_reply,
            follower: payload.is_follower,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultResponse {
    pub task_id: String,
    #[allow(dead_code)]
    pub status: String,
    #[serde(default)]
    pub comments: Vec<CommentPayload>,
    #[serde(default)]
    pub follower_count: usize,
    #[serde(default)]
    pub non_follower_count: usize,
}

impl ResultResponse {
    pub fn into_result_set(self) -> ResultSet {
        let result = ResultSet {
            comments: self.comments.into_iter().map(Into::into).collect(),
            follower_count: self.follower_count,
            non_follower_count: self.non_follower_count,
        };
        // The service's counters are trusted for display, but a mismatch
        // against the record partition is worth knowing about.
        if !result.counts_match() {
            let (followers, non_followers) = result.recomputed_counts();
            collector_warn!(
                "result counters disagree with records for task {}: \
                 reported {}/{}, recomputed {}/{}",
                self.task_id,
                result.follower_count,
                result.non_follower_count,
                followers,
                non_followers
            );
        }
        result
    }
}

pub(crate) fn parse_phase(tag: &str) -> Result<TaskPhase> {
    match tag {
        "pending" => Ok(TaskPhase::Pending),
        "logging_in" => Ok(TaskPhase::LoggingIn),
        "scrolling" => Ok(TaskPhase::Scrolling),
        "extracting" => Ok(TaskPhase::Extracting),
        "checking_followers" => Ok(TaskPhase::CheckingFollowers),
        "completed" => Ok(TaskPhase::Completed),
        "failed" => Ok(TaskPhase::Failed),
        other => Err(ApiError::InvalidPayload(format!(
            "unknown status tag {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped_into_percentage_range() {
        let response = StatusResponse {
            task_id: "t".to_string(),
            status: "scrolling".to_string(),
            message: "loading".to_string(),
            progress: 250,
            comments_count: 3,
            current_step: None,
            error: None,
        };
        let snapshot = response.into_snapshot().unwrap();
        assert_eq!(snapshot.progress, 100);
        assert_eq!(snapshot.phase, TaskPhase::Scrolling);
    }

    #[test]
    fn unknown_status_tag_is_rejected() {
        assert!(matches!(
            parse_phase("exploding"),
            Err(ApiError::InvalidPayload(_))
        ));
    }

    #[test]
    fn current_step_is_folded_into_the_message() {
        let response = StatusResponse {
            task_id: "t".to_string(),
            status: "extracting".to_string(),
            message: "extracting comments".to_string(),
            progress: 60,
            comments_count: 40,
            current_step: Some("batch 3".to_string()),
            error: None,
        };
        let snapshot = response.into_snapshot().unwrap();
        assert_eq!(snapshot.message, "extracting comments (batch 3)");
    }
}
