use std::time::Duration;

use bytes::Bytes;
use collector_core::{CrawlRequest, ResultSet, StatusSnapshot, TaskId};
use futures_util::StreamExt;
use serde_json::json;

use crate::types::{
    map_reqwest_error, ApiError, ErrorBody, Result, ResultResponse, StatusResponse,
    SubmitResponse,
};

/// Environment variable overriding the service base URL.
pub const BASE_URL_ENV: &str = "COLLECTOR_API_URL";
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Fixed cadence of the status polling loop.
    pub poll_interval: Duration,
    /// Upper bound on the export download size.
    pub max_export_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(2000),
            max_export_bytes: 20 * 1024 * 1024,
        }
    }
}

impl ApiSettings {
    /// Defaults with the base URL taken from `COLLECTOR_API_URL` when set.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.is_empty() {
                settings.base_url = url;
            }
        }
        settings
    }
}

/// The Remote Job API at its boundary. One implementation talks HTTP; tests
/// substitute their own.
#[async_trait::async_trait]
pub trait CrawlApi: Send + Sync {
    /// Submit a crawl job. The request (and the secret inside it) is
    /// consumed here and goes no further than the wire call.
    async fn submit(&self, request: CrawlRequest) -> Result<TaskId>;
    /// One status query for a tracked task.
    async fn status(&self, task_id: &str) -> Result<StatusSnapshot>;
    /// Fetch the full result set of a completed task.
    async fn result(&self, task_id: &str) -> Result<ResultSet>;
    /// Download the spreadsheet export blob.
    async fn export(&self, task_id: &str) -> Result<Bytes>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.settings.base_url.trim_end_matches('/'))
    }
}

/// Turns a non-2xx response into `ApiError::Api`, preferring the `detail`
/// field of the error body over the bare status line.
async fn error_from_response(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail)
        .filter(|detail| !detail.is_empty())
        .unwrap_or_else(|| status.to_string());
    ApiError::Api {
        status: status.as_u16(),
        detail,
    }
}

#[async_trait::async_trait]
impl CrawlApi for ReqwestApi {
    async fn submit(&self, request: CrawlRequest) -> Result<TaskId> {
        let body = json!({
            "post_url": request.post_url,
            "post_author": request.post_author,
            "instagram_id": request.instagram_id,
            "instagram_password": request.instagram_password,
            "check_followers": request.check_followers,
        });
        let response = self
            .client
            .post(self.endpoint("/api/crawl"))
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        let accepted: SubmitResponse = response.json().await.map_err(map_reqwest_error)?;
        Ok(accepted.task_id)
    }

    async fn status(&self, task_id: &str) -> Result<StatusSnapshot> {
        let response = self
            .client
            .get(self.endpoint(&format!("/api/status/{task_id}")))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        let status: StatusResponse = response.json().await.map_err(map_reqwest_error)?;
        status.into_snapshot()
    }

    async fn result(&self, task_id: &str) -> Result<ResultSet> {
        let response = self
            .client
            .get(self.endpoint(&format!("/api/result/{task_id}")))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        let result: ResultResponse = response.json().await.map_err(map_reqwest_error)?;
        Ok(result.into_result_set())
    }

    async fn export(&self, task_id: &str) -> Result<Bytes> {
        let response = self
            .client
            .get(self.endpoint(&format!("/api/result/{task_id}/excel")))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        if let Some(length) = response.content_length() {
            if length > self.settings.max_export_bytes {
                return Err(ApiError::InvalidPayload(format!(
                    "export larger than the {} byte limit",
                    self.settings.max_export_bytes
                )));
            }
        }

        let mut blob = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = blob.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_export_bytes {
                return Err(ApiError::InvalidPayload(format!(
                    "export larger than the {} byte limit",
                    self.settings.max_export_bytes
                )));
            }
            blob.extend_from_slice(&chunk);
        }
        Ok(Bytes::from(blob))
    }
}
