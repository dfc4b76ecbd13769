//! Checks run on an image before it is uploaded.

use thiserror::Error;

const BYTES_PER_MB: u64 = 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("You can only upload image files!")]
    NotImage,
    #[error("Image must be smaller than {max_mb}MB!")]
    TooLarge { max_mb: u64 },
    #[error("No URL returned from server")]
    MissingUrl,
}

/// Accepts `image/*` content strictly smaller than `max_mb` megabytes.
///
/// # Errors
/// Returns `UploadError::NotImage` or `UploadError::TooLarge`.
pub fn validate_image(mime: &str, size_bytes: u64, max_mb: u64) -> Result<(), UploadError> {
    if !mime.trim().to_ascii_lowercase().starts_with("image/") {
        return Err(UploadError::NotImage);
    }
    if size_bytes >= max_mb.saturating_mul(BYTES_PER_MB) {
        return Err(UploadError::TooLarge { max_mb });
    }
    Ok(())
}

/// Content type for an image path, from its extension.
#[must_use]
pub fn image_mime_for(path: &std::path::Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn only_images_are_accepted() {
        assert_eq!(validate_image("application/pdf", 10, 5), Err(UploadError::NotImage));
        assert_eq!(validate_image("image/png", 10, 5), Ok(()));
        assert_eq!(validate_image("IMAGE/JPEG", 10, 5), Ok(()));
    }

    #[test]
    fn size_limit_is_exclusive() {
        let limit = 5 * BYTES_PER_MB;
        assert_eq!(validate_image("image/png", limit - 1, 5), Ok(()));
        let err = validate_image("image/png", limit, 5).unwrap_err();
        assert_eq!(err.to_string(), "Image must be smaller than 5MB!");
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(image_mime_for(Path::new("logo.PNG")), Some("image/png"));
        assert_eq!(image_mime_for(Path::new("a/b/photo.jpeg")), Some("image/jpeg"));
        assert_eq!(image_mime_for(Path::new("notes.txt")), None);
        assert_eq!(image_mime_for(Path::new("README")), None);
    }
}
