use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::modules::images::ImageStore;

/// Writes images under an uploads root; the returned URL is path-based and
/// served by the static file route.
pub struct DiskImageStore {
    upload_dir: PathBuf,
}

impl DiskImageStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    /// Creates the uploads directory if it does not exist yet
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| {
                AppError::Internal(format!(
                    "Failed to create upload directory {}: {}",
                    self.upload_dir.display(),
                    e
                ))
            })
    }
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn store(&self, data: &[u8], extension: &str, _content_type: &str) -> Result<String> {
        // Timestamp plus a random suffix keeps concurrent uploads from
        // colliding without any coordination
        let filename = format!(
            "image-{}-{}.{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            extension
        );

        let path = self.upload_dir.join(&filename);
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write image file: {}", e)))?;

        debug!("Image written to {}", path.display());

        Ok(format!("/uploads/{}", filename))
    }
}
