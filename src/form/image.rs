//! Image attachment checks for the new-project form

use std::path::Path;

use crate::error::{AppError, ImageRejection};

const ACCEPTED_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// 10 MiB
pub(crate) const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// What the validator needs to know about a candidate attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImageDescriptor {
    pub(crate) mime_type: String,
    pub(crate) size: u64,
}

impl ImageDescriptor {
    pub(crate) fn new(mime_type: impl Into<String>, size: u64) -> Self {
        ImageDescriptor {
            mime_type: mime_type.into(),
            size,
        }
    }

    /// Describe a local file: size from metadata, type from the extension
    pub(crate) fn from_path(path: &Path) -> Result<Self, AppError> {
        let meta = std::fs::metadata(path).map_err(|source| AppError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let mime_type = match ext.as_deref() {
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            Some("txt") => "text/plain",
            _ => "application/octet-stream",
        };
        Ok(ImageDescriptor::new(mime_type, meta.len()))
    }
}

/// Accept JPEG, PNG, or WebP images of at most 10 MiB.
///
/// The type is checked before the size.
pub(crate) fn validate_image(image: &ImageDescriptor) -> Result<(), ImageRejection> {
    if !ACCEPTED_TYPES.contains(&image.mime_type.as_str()) {
        return Err(ImageRejection::UnsupportedType);
    }
    if image.size > MAX_IMAGE_BYTES {
        return Err(ImageRejection::TooLarge);
    }
    Ok(())
}
