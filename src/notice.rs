//! Transient notices returned by screen operations.

use serde::Serialize;
use std::fmt;

use crate::api::ApiError;

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";
pub const SERVER_NOT_REACHABLE: &str = "Server not reachable!";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Server `message` when the backend sent one, `fallback` otherwise.
    /// Failures that never reached the request stage get the generic text.
    #[must_use]
    pub fn from_error(err: &ApiError, fallback: &str) -> Self {
        match err {
            ApiError::Serialization(_) | ApiError::Config(_) => Self::error(UNEXPECTED_ERROR),
            _ => Self::error(err.message_or(fallback)),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.level == NoticeLevel::Success
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
