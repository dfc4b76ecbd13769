//! Request descriptors handed to the dispatcher. A descriptor is plain data so
//! the cache can keep it and replay it when a subscribed query goes stale.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use url::form_urlencoded;

use super::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

/// File carried in a multipart upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    Json(Value),
    Multipart(FilePart),
}

/// Path, method, query and body of one backend call.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
}

impl RequestDescriptor {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Adds a query parameter; empty values are skipped.
    #[must_use]
    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.query.push((key.to_string(), value));
        }
        self
    }

    /// Serializes `body` as the JSON payload.
    ///
    /// # Errors
    /// Returns `ApiError::Serialization` if the body cannot be encoded.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|err| ApiError::Serialization(format!("Failed to encode request: {err}")))?;
        self.body = Body::Json(value);
        Ok(self)
    }

    #[must_use]
    pub fn multipart(mut self, part: FilePart) -> Self {
        self.body = Body::Multipart(part);
        self
    }

    /// Stable identity used as the cache key: method, path and sorted query.
    #[must_use]
    pub fn cache_key(&self) -> String {
        let mut query = self.query.clone();
        query.sort();
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&query)
            .finish();

        if query.is_empty() {
            format!("{} {}", self.method, self.path.trim_matches('/'))
        } else {
            format!("{} {}?{query}", self.method, self.path.trim_matches('/'))
        }
    }
}
