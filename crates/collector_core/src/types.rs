use std::fmt;

/// Opaque handle for one remote crawl task, issued by the collection service.
pub type TaskId = String;

/// Phase of a remote crawl task as reported by the status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPhase {
    Pending,
    LoggingIn,
    Scrolling,
    Extracting,
    CheckingFollowers,
    Completed,
    Failed,
}

impl TaskPhase {
    /// Terminal phases end polling; no further transitions occur.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskPhase::Completed | TaskPhase::Failed)
    }

    /// Short human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            TaskPhase::Pending => "waiting",
            TaskPhase::LoggingIn => "logging in",
            TaskPhase::Scrolling => "loading comments",
            TaskPhase::Extracting => "extracting comments",
            TaskPhase::CheckingFollowers => "checking followers",
            TaskPhase::Completed => "completed",
            TaskPhase::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One status poll response, replacing the previous snapshot wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub phase: TaskPhase,
    pub message: String,
    /// Progress percentage, clamped to 0..=100.
    pub progress: u8,
    /// Comments collected so far.
    pub comments_count: usize,
    pub error: Option<String>,
}

impl StatusSnapshot {
    /// Snapshot shown between submit acceptance and the first poll.
    pub fn initial() -> Self {
        Self {
            phase: TaskPhase::Pending,
            message: "Waiting for the crawl to start...".to_string(),
            progress: 0,
            comments_count: 0,
            error: None,
        }
    }
}

/// One collected comment. Immutable once received; views only reorder
/// and filter, never mutate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub username: String,
    pub content: String,
    /// Sortable lexical timestamp as delivered by the service, if any.
    pub timestamp: Option<String>,
    pub is_reply: bool,
    /// `None` means follower status was not checked or unknown.
    pub follower: Option<bool>,
}

/// The finalized output of a completed crawl.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultSet {
    pub comments: Vec<CommentRecord>,
    /// Follower/non-follower counters as provided by the service.
    pub follower_count: usize,
    pub non_follower_count: usize,
}

impl ResultSet {
    /// Recomputes the counters from the record list. A follower is a record
    /// whose flag is exactly `Some(true)`; everything else, including
    /// unknown, counts as non-follower.
    pub fn recomputed_counts(&self) -> (usize, usize) {
        let followers = self
            .comments
            .iter()
            .filter(|c| c.follower == Some(true))
            .count();
        (followers, self.comments.len() - followers)
    }

    /// True when the server-provided counters match the record partition.
    pub fn counts_match(&self) -> bool {
        self.recomputed_counts() == (self.follower_count, self.non_follower_count)
    }
}

/// A validated, fully populated crawl submission. The password travels
/// inside this value into the submit effect and is never stored in the
/// lifecycle state.
#[derive(Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    pub post_url: String,
    pub post_author: String,
    pub instagram_id: String,
    pub instagram_password: String,
    pub check_followers: bool,
}

// The password must never leak through logs or debug output.
impl fmt::Debug for CrawlRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrawlRequest")
            .field("post_url", &self.post_url)
            .field("post_author", &self.post_author)
            .field("instagram_id", &self.instagram_id)
            .field("instagram_password", &"<redacted>")
            .field("check_followers", &self.check_followers)
            .finish()
    }
}

/// Outcome of one export download, reported back to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved { path: String },
    Failed { error: String },
}
