//! Image upload shared by the school logo, profile avatar and student/teacher
//! photo fields. Files are checked locally before anything is sent.

use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    api::{ApiClient, ApiError, FilePart, Mutation, RequestDescriptor},
    cache::Tag,
    notice::Notice,
    session::{StorageError, profile::update_profile_field},
    validation::{UploadError, image_mime_for, validate_image},
};

pub const UPLOAD_ENDPOINT: &str = "api/v1/uploadImage";
pub const UPLOAD_FIELD: &str = "file";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UploadData {
    #[serde(default)]
    pub url: Option<String>,
}

/// The backend has answered with the URL both at the top level and under
/// `data`, so both are read.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub data: Option<UploadData>,
    #[serde(default)]
    pub message: Option<String>,
}

impl UploadResponse {
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .or_else(|| self.data.as_ref().and_then(|data| data.url.as_deref()))
            .filter(|url| !url.is_empty())
    }
}

pub struct UploadImage(pub FilePart);

impl Mutation for UploadImage {
    type Output = UploadResponse;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        Ok(RequestDescriptor::post(UPLOAD_ENDPOINT).multipart(self.0.clone()))
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        Vec::new()
    }
}

#[derive(Debug, Error)]
pub enum UploadFailure {
    #[error(transparent)]
    Rejected(#[from] UploadError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl UploadFailure {
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Api(err) => Notice::from_error(err, "Upload failed"),
            other => Notice::error(other.to_string()),
        }
    }
}

/// Validates and uploads in-memory image bytes, returning the stored URL.
///
/// # Errors
/// Returns `UploadFailure::Rejected` for non-images, oversize files or a
/// response without a URL, and `UploadFailure::Api` for request errors.
#[instrument(skip(api, bytes), fields(size = bytes.len()))]
pub async fn upload_bytes(
    api: &ApiClient,
    file_name: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<String, UploadFailure> {
    let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
    validate_image(mime, size, api.config().upload_max_mb)?;

    let part = FilePart {
        field: UPLOAD_FIELD.to_string(),
        file_name: file_name.to_string(),
        mime: mime.to_string(),
        bytes,
    };
    let response = api.mutate(&UploadImage(part)).await?;
    let url = response.url().ok_or(UploadError::MissingUrl)?;
    debug!(url, "image stored");
    Ok(url.to_string())
}

/// Reads `path` and uploads it. The content type comes from the extension.
///
/// # Errors
/// See [`upload_bytes`]; unreadable files give `UploadFailure::Read`.
pub async fn upload_file(api: &ApiClient, path: &Path) -> Result<String, UploadFailure> {
    let mime = image_mime_for(path).ok_or(UploadError::NotImage)?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| UploadFailure::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("image");
    upload_bytes(api, file_name, mime, bytes).await
}

/// Upload widget result: the notice to show and the URL on success.
pub async fn upload_image(api: &ApiClient, path: &Path) -> (Notice, Option<String>) {
    match upload_file(api, path).await {
        Ok(url) => (Notice::success("Image uploaded successfully!"), Some(url)),
        Err(err) => (err.notice(), None),
    }
}

/// Records an uploaded avatar in the locally stored profile.
///
/// # Errors
/// Returns `StorageError` if the profile blob cannot be written.
pub fn remember_avatar(api: &ApiClient, url: &str) -> Result<(), StorageError> {
    update_profile_field(
        api.session().storage().as_ref(),
        "avatar_url",
        Value::String(url.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_is_read_from_either_place() -> Result<(), serde_json::Error> {
        let top: UploadResponse = serde_json::from_value(json!({"url": "https://cdn/a.png"}))?;
        assert_eq!(top.url(), Some("https://cdn/a.png"));

        let nested: UploadResponse =
            serde_json::from_value(json!({"data": {"url": "https://cdn/b.png"}}))?;
        assert_eq!(nested.url(), Some("https://cdn/b.png"));

        let missing: UploadResponse = serde_json::from_value(json!({"message": "ok"}))?;
        assert_eq!(missing.url(), None);
        Ok(())
    }

    #[test]
    fn rejected_upload_notice_uses_local_message() {
        let failure = UploadFailure::from(UploadError::TooLarge { max_mb: 5 });
        assert_eq!(failure.notice().message, "Image must be smaller than 5MB!");
        let failure = UploadFailure::from(UploadError::MissingUrl);
        assert_eq!(failure.notice().message, "No URL returned from server");
    }
}
