//! Client configuration. Values come from the CLI (with environment fallbacks)
//! and are public; secrets never live here.

use std::time::Duration;
use url::Url;

use super::error::ApiError;

/// Default ceiling for image uploads, in megabytes.
pub const DEFAULT_UPLOAD_MAX_MB: u64 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: Url,
    /// `None` leaves timeouts to the transport.
    pub request_timeout: Option<Duration>,
    pub upload_max_mb: u64,
}

impl ClientConfig {
    /// Validates `api_base_url` and applies defaults.
    ///
    /// # Errors
    /// Returns `ApiError::Config` when the URL is empty, unparsable, or not
    /// http(s).
    pub fn new(api_base_url: &str) -> Result<Self, ApiError> {
        let trimmed = api_base_url.trim();
        if trimmed.is_empty() {
            return Err(ApiError::Config("API base URL is not configured.".to_string()));
        }

        let url = Url::parse(trimmed)
            .map_err(|err| ApiError::Config(format!("Invalid API base URL {trimmed}: {err}")))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ApiError::Config(format!(
                    "Unsupported API base URL scheme: {scheme}"
                )));
            }
        }

        Ok(Self {
            api_base_url: url,
            request_timeout: None,
            upload_max_mb: DEFAULT_UPLOAD_MAX_MB,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_upload_max_mb(mut self, megabytes: u64) -> Self {
        self.upload_max_mb = megabytes;
        self
    }

    /// Full URL for a backend `path`.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        build_url_with_base(self.api_base_url.as_str(), path)
    }
}

/// Joins a base URL and a path with exactly one `/` between them.
#[must_use]
pub fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
