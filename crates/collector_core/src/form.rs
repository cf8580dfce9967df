use crate::{author, CrawlRequest};

/// The crawl submission form. Owned by the state machine; the password is
/// only ever copied out into a [`CrawlRequest`] on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlForm {
    pub post_url: String,
    pub post_author: String,
    pub instagram_id: String,
    pub instagram_password: String,
    pub check_followers: bool,
}

impl Default for CrawlForm {
    fn default() -> Self {
        Self {
            post_url: String::new(),
            post_author: String::new(),
            instagram_id: String::new(),
            instagram_password: String::new(),
            check_followers: true,
        }
    }
}

impl CrawlForm {
    /// Applies a URL edit, auto-filling the author field when it is still
    /// empty and the URL encodes the owner directly.
    pub fn set_post_url(&mut self, url: String) {
        if self.post_author.is_empty() {
            self.post_author = author::derive_post_author(&url);
        }
        self.post_url = url;
    }

    /// All four text fields must be non-empty before submission.
    pub fn is_complete(&self) -> bool {
        !self.post_url.is_empty()
            && !self.post_author.is_empty()
            && !self.instagram_id.is_empty()
            && !self.instagram_password.is_empty()
    }

    /// Builds the submission value, or `None` while incomplete.
    pub fn build_request(&self) -> Option<CrawlRequest> {
        if !self.is_complete() {
            return None;
        }
        Some(CrawlRequest {
            post_url: self.post_url.clone(),
            post_author: self.post_author.clone(),
            instagram_id: self.instagram_id.clone(),
            instagram_password: self.instagram_password.clone(),
            check_followers: self.check_followers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::CrawlForm;

    #[test]
    fn url_edit_autofills_empty_author_only() {
        let mut form = CrawlForm::default();
        form.set_post_url("https://instagram.com/natgeo/p/ABC/".to_string());
        assert_eq!(form.post_author, "natgeo");

        form.post_author = "typed_by_hand".to_string();
        form.set_post_url("https://instagram.com/other/p/DEF/".to_string());
        assert_eq!(form.post_author, "typed_by_hand");
    }

    #[test]
    fn completeness_requires_all_four_text_fields() {
        let mut form = CrawlForm {
            post_url: "https://instagram.com/p/ABC/".to_string(),
            post_author: String::new(),
            instagram_id: "user1".to_string(),
            instagram_password: "pw".to_string(),
            check_followers: true,
        };
        assert!(!form.is_complete());
        assert!(form.build_request().is_none());

        form.post_author = "owner".to_string();
        assert!(form.is_complete());
        let request = form.build_request().unwrap();
        assert_eq!(request.post_author, "owner");
        assert!(request.check_followers);
    }
}
