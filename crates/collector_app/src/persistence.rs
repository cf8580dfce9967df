use std::fs;
use std::path::Path;

use collector_client::AtomicFileWriter;
use collector_core::CrawlForm;
use collector_logging::{collector_error, collector_info, collector_warn};
use serde::{Deserialize, Serialize};

const STATE_FILENAME: &str = ".collector_state.ron";

/// Non-secret form defaults carried across sessions. The password is
/// deliberately not part of this.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedForm {
    post_url: String,
    post_author: String,
    instagram_id: String,
    check_followers: bool,
}

pub(crate) fn load_form(dir: &Path) -> CrawlForm {
    let path = dir.join(STATE_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return CrawlForm::default();
        }
        Err(err) => {
            collector_warn!("Failed to read persisted form from {:?}: {}", path, err);
            return CrawlForm::default();
        }
    };

    let persisted: PersistedForm = match ron::from_str(&content) {
        Ok(form) => form,
        Err(err) => {
            collector_warn!("Failed to parse persisted form from {:?}: {}", path, err);
            return CrawlForm::default();
        }
    };

    collector_info!("Loaded persisted form defaults from {:?}", path);
    CrawlForm {
        post_url: persisted.post_url,
        post_author: persisted.post_author,
        instagram_id: persisted.instagram_id,
        instagram_password: String::new(),
        check_followers: persisted.check_followers,
    }
}

/// Saved once the service accepts a submission, so the next session starts
/// from the last working defaults. The password is left out.
pub(crate) fn save_form(dir: &Path, form: &CrawlForm) {
    let persisted = PersistedForm {
        post_url: form.post_url.clone(),
        post_author: form.post_author.clone(),
        instagram_id: form.instagram_id.clone(),
        check_followers: form.check_followers,
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&persisted, pretty) {
        Ok(text) => text,
        Err(err) => {
            collector_error!("Failed to serialize persisted form: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(dir.to_path_buf());
    if let Err(err) = writer.write(STATE_FILENAME, content.as_bytes()) {
        collector_error!("Failed to write persisted form to {:?}: {}", dir, err);
    }
}
