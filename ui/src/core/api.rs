//! HTTP client for the marks API.
//!
//! Every call is a single attempt: no retry, no timeout beyond the transport's
//! own, no cancellation. The [`Backend`] trait is what the controller talks to,
//! so the state machine can be exercised against an in-memory backend.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::core::config::AppConfig;
use crate::core::error::ApiError;
use crate::core::model::{
    IdentityPayload, IngestSummary, Record, RecordPatch, SummaryStats, TokenResponse, User,
};
use crate::core::platform;

/// The two charts the server renders itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartImage {
    Histogram,
    BarChart,
}

impl ChartImage {
    pub fn path(self) -> &'static str {
        match self {
            ChartImage::Histogram => "/marks/histogram",
            ChartImage::BarChart => "/marks/bar-chart",
        }
    }
}

/// Backend capabilities, one method per endpoint. All but `login` carry the bearer token.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// `POST /auth/login`; resolves to the access token.
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError>;
    /// `GET /auth/me`.
    async fn me(&self, token: &str) -> Result<User, ApiError>;
    /// `GET /marks/`.
    async fn list_records(&self, token: &str) -> Result<Vec<Record>, ApiError>;
    /// `GET /marks/average`.
    async fn summary_stats(&self, token: &str) -> Result<SummaryStats, ApiError>;
    /// `GET /marks/histogram` or `/marks/bar-chart` with `?t=<cache_bust>`; raw PNG bytes.
    async fn chart_image(
        &self,
        token: &str,
        chart: ChartImage,
        cache_bust: i64,
    ) -> Result<Vec<u8>, ApiError>;
    /// `POST /marks/load-csv`.
    async fn reload_from_source(&self, token: &str) -> Result<IngestSummary, ApiError>;
    /// `POST /marks/upload` as multipart field `file`.
    async fn upload_csv(
        &self,
        token: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<IngestSummary, ApiError>;
    /// `PATCH /marks/{id}`.
    async fn patch_record(
        &self,
        token: &str,
        student_id: &str,
        patch: &RecordPatch,
    ) -> Result<Record, ApiError>;
}

/// Fetch a chart image and turn it into a displayable handle.
pub async fn fetch_image_handle<B: Backend>(
    backend: &B,
    token: &str,
    chart: ChartImage,
    cache_bust: i64,
) -> Result<String, ApiError> {
    let bytes = backend.chart_image(token, chart, cache_bust).await?;
    platform::image_handle(&bytes, "image/png").map_err(ApiError::Decode)
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: AppConfig,
    http: Client,
}

impl ApiClient {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn image_url(&self, chart: ChartImage, cache_bust: i64) -> String {
        format!("{}?t={cache_bust}", self.config.endpoint(chart.path()))
    }

    fn record_url(&self, student_id: &str) -> String {
        self.config
            .endpoint(&format!("/marks/{}", encode_path_segment(student_id)))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(AppConfig::load())
    }
}

impl Backend for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.config.endpoint("/auth/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        let token: TokenResponse = read_json(ensure_success(response).await?).await?;
        Ok(token.access_token)
    }

    async fn me(&self, token: &str) -> Result<User, ApiError> {
        let response = self
            .http
            .get(self.config.endpoint("/auth/me"))
            .bearer_auth(token)
            .send()
            .await?;
        let payload: IdentityPayload = read_json(ensure_success(response).await?).await?;
        Ok(payload.into())
    }

    async fn list_records(&self, token: &str) -> Result<Vec<Record>, ApiError> {
        let response = self
            .http
            .get(self.config.endpoint("/marks/"))
            .bearer_auth(token)
            .send()
            .await?;
        read_json(ensure_success(response).await?).await
    }

    async fn summary_stats(&self, token: &str) -> Result<SummaryStats, ApiError> {
        let response = self
            .http
            .get(self.config.endpoint("/marks/average"))
            .bearer_auth(token)
            .send()
            .await?;
        read_json(ensure_success(response).await?).await
    }

    async fn chart_image(
        &self,
        token: &str,
        chart: ChartImage,
        cache_bust: i64,
    ) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http
            .get(self.image_url(chart, cache_bust))
            .bearer_auth(token)
            .send()
            .await?;
        let bytes = ensure_success(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn reload_from_source(&self, token: &str) -> Result<IngestSummary, ApiError> {
        let response = self
            .http
            .post(self.config.endpoint("/marks/load-csv"))
            .bearer_auth(token)
            .send()
            .await?;
        read_ingest(ensure_success(response).await?).await
    }

    async fn upload_csv(
        &self,
        token: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<IngestSummary, ApiError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(upload_mime(file_name))?;
        let form = Form::new().part("file", part);
        let response = self
            .http
            .post(self.config.endpoint("/marks/upload"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        read_ingest(ensure_success(response).await?).await
    }

    async fn patch_record(
        &self,
        token: &str,
        student_id: &str,
        patch: &RecordPatch,
    ) -> Result<Record, ApiError> {
        let response = self
            .http
            .patch(self.record_url(student_id))
            .bearer_auth(token)
            .json(patch)
            .send()
            .await?;
        read_json(ensure_success(response).await?).await
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(status.as_u16(), &body))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Ingest responses are informational; an unreadable body still counts as success.
async fn read_ingest(response: Response) -> Result<IngestSummary, ApiError> {
    let body = response.text().await.unwrap_or_default();
    Ok(serde_json::from_str(&body).unwrap_or_default())
}

fn upload_mime(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".xlsx") {
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    } else if lower.ends_with(".xls") {
        "application/vnd.ms-excel"
    } else {
        "text/csv"
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_path_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}
