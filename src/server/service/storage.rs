//! Upload storage for photos.
//!
//! The original upload is written as `<name>.<ext>` and a resized copy as
//! `<name>_<width>_<height>.<ext>` in the upload directory. Both are served under
//! `/uploads`.

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use image::{imageops::FilterType, DynamicImage};
use rand::Rng;

use crate::server::{
    error::{internal::InternalError, AppError},
    model::photo::Photo,
};

pub const MAX_UPLOAD_BYTES: usize = 2_000_000;
pub const DEFAULT_WIDTH: u32 = 320;
pub const DEFAULT_HEIGHT: u32 = 240;
const MAX_DIMENSION: u32 = 2048;
const ALLOWED_TYPES: [&str; 3] = ["jpeg", "jpg", "png"];

pub const FILE_TYPE_ERROR: &str =
    "File upload only supports the following file types - /jpeg|jpg|png/";
pub const FILE_SIZE_ERROR: &str = "File size > 2MB";
pub const PHOTO_REQUIRED_ERROR: &str = "Photo field is required.";

/// A photo received in a multipart request.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
    pub width: u32,
    pub height: u32,
}

impl PhotoUpload {
    /// Reads a requested dimension; missing, non numeric, zero or oversized values use `default`.
    pub fn dimension(value: Option<&str>, default: u32) -> u32 {
        value
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|v| (1..=MAX_DIMENSION).contains(v))
            .unwrap_or(default)
    }

    /// Checks type and size, returning the lowercased file extension.
    ///
    /// Both the mimetype and the extension must name an allowed type.
    pub fn validate(&self) -> Result<String, AppError> {
        if self.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::BadRequest(FILE_SIZE_ERROR.to_string()));
        }

        let extension = Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        let mimetype = self.content_type.as_deref().unwrap_or("").to_lowercase();

        let allowed = |value: &str| ALLOWED_TYPES.iter().any(|kind| value.contains(kind));
        if !allowed(&mimetype) || !allowed(&extension) {
            return Err(AppError::BadRequest(FILE_TYPE_ERROR.to_string()));
        }

        Ok(extension)
    }
}

/// Public URLs of a stored upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    pub photo_url: String,
    pub highres_url: String,
    pub base_url: String,
}

/// Writes and removes photo files.
#[derive(Clone, Debug)]
pub struct PhotoStorage {
    upload_dir: PathBuf,
    base_url: String,
}

impl PhotoStorage {
    pub fn new(upload_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            base_url: base_url.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Validates, stores and resizes an upload.
    ///
    /// # Returns
    /// - `Ok(StoredPhoto)` - URLs of the resized copy and the original
    /// - `Err(AppError::BadRequest)` - Type or size rejected
    /// - `Err(AppError::InternalErr)` - Image could not be decoded or resized
    /// - `Err(AppError::IoErr)` - Writing a file failed
    pub async fn store(&self, upload: PhotoUpload) -> Result<StoredPhoto, AppError> {
        let extension = upload.validate()?;

        let name = format!("{:032x}", rand::rng().random::<u128>());
        let original_name = format!("{}.{}", name, extension);
        let resized_name = format!("{}_{}_{}.{}", name, upload.width, upload.height, extension);

        let original_path = self.upload_dir.join(&original_name);
        let resized_path = self.upload_dir.join(&resized_name);

        tokio::fs::write(&original_path, &upload.bytes).await?;

        let (width, height) = (upload.width, upload.height);
        let bytes = upload.bytes;
        let resized = tokio::task::spawn_blocking(move || {
            resize(&bytes, width, height, &extension)?.save(&resized_path)
        })
        .await
        .map_err(InternalError::from)?;

        if let Err(e) = resized {
            let _ = tokio::fs::remove_file(&original_path).await;
            return Err(InternalError::from(e).into());
        }

        Ok(StoredPhoto {
            photo_url: format!("{}/uploads/{}", self.base_url, resized_name),
            highres_url: format!("{}/uploads/{}", self.base_url, original_name),
            base_url: self.base_url.clone(),
        })
    }

    /// Removes both files of a photo. Files that are already gone are ignored.
    pub async fn remove(&self, photo: &Photo) -> Result<(), AppError> {
        for file_name in photo.file_names().into_iter().flatten() {
            if file_name.is_empty() || file_name.contains("..") {
                continue;
            }

            match tokio::fs::remove_file(self.upload_dir.join(file_name)).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!("Photo file {} already removed", file_name);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(())
    }

    /// Removes the files of photos whose rows are already deleted.
    ///
    /// Failures are logged and skipped.
    pub async fn discard(&self, photos: &[Photo]) {
        for photo in photos {
            if let Err(e) = self.remove(photo).await {
                tracing::warn!("Failed to remove files of photo {}: {}", photo.id, e);
            }
        }
    }
}

/// Scales and crops to exactly `width`x`height`, dropping alpha for JPEG output.
fn resize(
    bytes: &[u8],
    width: u32,
    height: u32,
    extension: &str,
) -> Result<DynamicImage, image::ImageError> {
    let resized = image::load_from_memory(bytes)?.resize_to_fill(width, height, FilterType::Lanczos3);

    if extension == "png" {
        Ok(resized)
    } else {
        Ok(DynamicImage::ImageRgb8(resized.to_rgb8()))
    }
}
