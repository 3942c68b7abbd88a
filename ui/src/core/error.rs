//! Error types for API calls and token persistence.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 401/403: the token (or credentials) were not accepted.
    #[error("not authorized: {0}")]
    Unauthorized(String),
    /// Any other non-success HTTP status.
    #[error("server rejected request ({status}): {detail}")]
    Rejected { status: u16, detail: String },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build the error for a non-success status, keeping the server's `detail` text when present.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = extract_detail(body).unwrap_or_else(|| format!("status {status}"));
        if status == 401 || status == 403 {
            ApiError::Unauthorized(detail)
        } else {
            ApiError::Rejected { status, detail }
        }
    }

    /// Text the server supplied with the failure, if it supplied any.
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized(detail) | ApiError::Rejected { detail, .. } => {
                if detail.starts_with("status ") {
                    None
                } else {
                    Some(detail.as_str())
                }
            }
            ApiError::Network(_) | ApiError::Decode(_) => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// FastAPI reports failures as `{"detail": "..."}`; validation errors carry a list instead.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
