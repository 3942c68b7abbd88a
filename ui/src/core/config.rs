//! Backend location. Fixed at build time, with a per-platform override.

/// Used when `MARKSBOARD_API_BASE` was not set at build time.
pub const DEFAULT_API_BASE: &str = "https://student-marks-analyzer-fp4y.onrender.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base: String,
}

impl AppConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        let raw: String = api_base.into();
        Self {
            api_base: raw.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Build-time base, optionally replaced by the platform override.
    pub fn load() -> Self {
        let compiled = option_env!("MARKSBOARD_API_BASE").unwrap_or(DEFAULT_API_BASE);
        match runtime_override() {
            Some(base) => Self::new(base),
            None => Self::new(compiled),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

/// Web: a non-empty `data-api-url` attribute on `<html>`.
#[cfg(target_arch = "wasm32")]
fn runtime_override() -> Option<String> {
    web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.document_element())
        .and_then(|root| root.get_attribute("data-api-url"))
        .filter(|url| !url.trim().is_empty())
}

/// Desktop: the `MARKSBOARD_API_BASE` environment variable at launch.
#[cfg(not(target_arch = "wasm32"))]
fn runtime_override() -> Option<String> {
    std::env::var("MARKSBOARD_API_BASE")
        .ok()
        .filter(|url| !url.trim().is_empty())
}
