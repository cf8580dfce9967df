//! Collector core: pure state machine, dataset view and form helpers.
mod author;
mod dataset;
mod effect;
mod form;
mod msg;
mod state;
mod types;
mod update;
mod view_model;

pub use author::derive_post_author;
pub use dataset::{view, Filter, SortKey, SortOrder, TableQuery, TableView, PAGE_SIZE};
pub use effect::Effect;
pub use form::CrawlForm;
pub use msg::Msg;
pub use state::{AppState, TaskState, MAX_POLL_FAILURES};
pub use types::{
    CommentRecord, CrawlRequest, ExportOutcome, ResultSet, StatusSnapshot, TaskId, TaskPhase,
};
pub use update::update;
pub use view_model::{AppViewModel, FormView, LifecycleView};
