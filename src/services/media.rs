// SPDX-License-Identifier: MIT

//! Media upload service.
//!
//! Validates, reads, and transfers image files to backend blob storage.
//! Handles:
//! - Size and extension validation before any network call
//! - Storage path derivation with a random collision-avoidance token
//! - Concurrent multi-file fan-out with all-complete-then-collect joins
//! - Deletion by public URL (reverse-parsing the storage path)

use anyhow::anyhow;
use futures_util::future::join_all;
use ring::rand::{SecureRandom, SystemRandom};

use crate::backend::SupabaseClient;
use crate::error::{AppError, Result};

/// Maximum accepted file size (5 MiB).
const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;
/// Accepted file extensions, matched case-insensitively against the URI.
const VALID_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];
/// All uploads are stored as JPEG regardless of source extension.
const UPLOAD_CONTENT_TYPE: &str = "image/jpeg";
/// Bytes of randomness in the storage path token.
const PATH_TOKEN_BYTES: usize = 8;

/// Typed access to climb image storage.
#[derive(Clone)]
pub struct MediaService {
    storage: SupabaseClient,
    bucket: String,
    rng: SystemRandom,
}

/// Result of a batch upload: successful URLs and the errors of failed items.
///
/// Failures are not correlated back to their source path; with a partial
/// failure both sequences are non-empty and callers reconcile by count.
#[derive(Debug, Default)]
pub struct UploadBatchOutcome {
    pub urls: Vec<String>,
    pub errors: Vec<AppError>,
}

/// Outcome of a local file validation. Never an error; internal failures map
/// to an invalid result with a generic reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileValidation {
    pub is_valid: bool,
    pub reason: Option<String>,
}

impl FileValidation {
    fn ok() -> Self {
        Self {
            is_valid: true,
            reason: None,
        }
    }

    fn invalid(reason: &str) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason.to_string()),
        }
    }
}

/// Options for a transformed image URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageTransform {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u8>,
}

impl MediaService {
    pub fn new(storage: SupabaseClient, bucket: String) -> Self {
        Self {
            storage,
            bucket,
            rng: SystemRandom::new(),
        }
    }

    /// Upload one image file and return its public URL.
    ///
    /// Files over 5 MiB are rejected locally before any network call. The
    /// object path is `{user_id}/{climb_id or "profile"}/{millis}_{token}.jpg`
    /// and the upload is non-overwriting, so a path collision is a hard
    /// backend failure.
    pub async fn upload(
        &self,
        local_path: &str,
        user_id: &str,
        climb_id: Option<&str>,
    ) -> Result<String> {
        let meta = tokio::fs::metadata(local_path)
            .await
            .map_err(|e| AppError::Internal(anyhow!("Failed to stat {}: {}", local_path, e)))?;

        if meta.len() > MAX_FILE_SIZE {
            return Err(AppError::Validation(AppError::FILE_TOO_LARGE.to_string()));
        }

        let bytes = tokio::fs::read(local_path)
            .await
            .map_err(|e| AppError::Internal(anyhow!("Failed to read {}: {}", local_path, e)))?;

        let object_path = derive_object_path(
            user_id,
            climb_id,
            chrono::Utc::now().timestamp_millis(),
            &self.random_token()?,
        );

        self.storage
            .upload_object(&self.bucket, &object_path, bytes, UPLOAD_CONTENT_TYPE, false)
            .await?;

        let url = self.storage.public_url(&self.bucket, &object_path);
        tracing::info!(path = %object_path, size = meta.len(), "Image uploaded");
        Ok(url)
    }

    /// Upload several images concurrently and collect the outcomes.
    ///
    /// Every upload runs to completion; one slow or failing file does not
    /// cancel its siblings.
    pub async fn upload_batch(
        &self,
        local_paths: &[String],
        user_id: &str,
        climb_id: Option<&str>,
    ) -> UploadBatchOutcome {
        let uploads = local_paths
            .iter()
            .map(|path| self.upload(path, user_id, climb_id));

        let mut outcome = UploadBatchOutcome::default();
        for result in join_all(uploads).await {
            match result {
                Ok(url) => outcome.urls.push(url),
                Err(e) => outcome.errors.push(e),
            }
        }

        if !outcome.errors.is_empty() {
            tracing::warn!(
                ok = outcome.urls.len(),
                failed = outcome.errors.len(),
                "Batch upload completed with failures"
            );
        }
        outcome
    }

    /// Delete an image by its public URL.
    ///
    /// The storage path is recovered from the URL by locating the bucket
    /// segment; a URL without it is rejected with no remove call issued.
    /// The backend absorbs double-deletes as success.
    pub async fn delete_by_url(&self, image_url: &str) -> Result<()> {
        let object_path = storage_path_from_url(image_url, &self.bucket).ok_or_else(|| {
            AppError::Validation(AppError::INVALID_IMAGE_URL.to_string())
        })?;

        self.storage
            .remove_objects(&self.bucket, &[object_path])
            .await
    }

    /// Delete several images concurrently, collecting only the errors.
    pub async fn delete_batch(&self, image_urls: &[String]) -> Vec<AppError> {
        let deletes = image_urls.iter().map(|url| self.delete_by_url(url));

        join_all(deletes)
            .await
            .into_iter()
            .filter_map(|result| result.err())
            .collect()
    }

    /// Validate a local image file: existence, size limit, and extension
    /// whitelist. Extension-based only, no content sniffing.
    pub async fn validate(&self, local_path: &str) -> FileValidation {
        let meta = match tokio::fs::metadata(local_path).await {
            Ok(meta) => meta,
            Err(_) => return FileValidation::invalid("File does not exist"),
        };

        if meta.len() > MAX_FILE_SIZE {
            return FileValidation::invalid("File size too large");
        }

        if !has_valid_extension(local_path) {
            return FileValidation::invalid("Invalid file type");
        }

        FileValidation::ok()
    }

    /// Transformed image URL. Identity today; placeholder for a future image
    /// transformation integration, kept because removing it changes the
    /// public contract.
    pub fn optimized_url(&self, original_url: &str, _options: ImageTransform) -> String {
        original_url.to_string()
    }

    /// Thumbnail-sized variant of [`optimized_url`](Self::optimized_url).
    pub fn thumbnail_url(&self, original_url: &str) -> String {
        self.optimized_url(
            original_url,
            ImageTransform {
                width: Some(200),
                height: Some(200),
                quality: Some(60),
            },
        )
    }

    /// Random hex token for storage path uniqueness.
    fn random_token(&self) -> Result<String> {
        let mut buf = [0u8; PATH_TOKEN_BYTES];
        self.rng
            .fill(&mut buf)
            .map_err(|_| AppError::Internal(anyhow!("System RNG failure")))?;
        Ok(hex::encode(buf))
    }
}

/// Build the storage object path for an upload.
fn derive_object_path(
    user_id: &str,
    climb_id: Option<&str>,
    timestamp_millis: i64,
    token: &str,
) -> String {
    format!(
        "{}/{}/{}_{}.jpg",
        user_id,
        climb_id.unwrap_or("profile"),
        timestamp_millis,
        token
    )
}

/// Recover a storage object path from a public URL by locating the bucket
/// segment and taking everything after it. Returns None if the bucket name
/// does not appear as a path segment.
fn storage_path_from_url(url: &str, bucket: &str) -> Option<String> {
    let parts: Vec<&str> = url.split('/').collect();
    let bucket_index = parts.iter().position(|part| *part == bucket)?;

    let path_parts: Vec<String> = parts[bucket_index + 1..]
        .iter()
        .map(|segment| match urlencoding::decode(segment) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => (*segment).to_string(),
        })
        .collect();

    if path_parts.is_empty() {
        return None;
    }
    Some(path_parts.join("/"))
}

/// URI suffix check against the extension whitelist, case-insensitive.
fn has_valid_extension(local_path: &str) -> bool {
    let lowered = local_path.to_lowercase();
    match lowered.rsplit_once('.') {
        Some((_, ext)) => VALID_EXTENSIONS.contains(&ext),
        None => false,
    }
}
