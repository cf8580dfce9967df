//! Collector client: the Remote Job API boundary and the polling driver.
mod api;
mod export;
mod persist;
mod poller;
mod types;

pub use api::{ApiSettings, CrawlApi, ReqwestApi};
pub use export::export_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use poller::{ClientConfig, ClientEvent, ClientHandle};
pub use types::{ApiError, Result};
