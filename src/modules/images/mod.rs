//! Image asset storage for design submissions.
//!
//! Uploaded bytes either land as files under an uploads root served back at
//! `/uploads/<name>`, or get embedded as base64 data URIs directly in the
//! design record. Both produce an `image_url` that resolves to renderable
//! image bytes.

mod data_uri;
mod disk;

use async_trait::async_trait;

use crate::core::error::Result;

pub use data_uri::DataUriImageStore;
pub use disk::DiskImageStore;

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persists the image bytes and returns the address to record as
    /// `image_url`
    async fn store(&self, data: &[u8], extension: &str, content_type: &str) -> Result<String>;
}
