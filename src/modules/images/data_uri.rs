use async_trait::async_trait;
use base64::prelude::*;

use crate::core::error::Result;
use crate::modules::images::ImageStore;

/// Embeds the image as a base64 data URI, so the whole record is
/// self-contained and no file serving is needed.
pub struct DataUriImageStore;

#[async_trait]
impl ImageStore for DataUriImageStore {
    async fn store(&self, data: &[u8], _extension: &str, content_type: &str) -> Result<String> {
        let encoded = BASE64_STANDARD.encode(data);
        Ok(format!("data:{};base64,{}", content_type, encoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn produces_a_data_uri_with_the_declared_mime_type() {
        let store = DataUriImageStore;
        let url = store.store(b"abc", "png", "image/png").await.unwrap();
        assert_eq!(url, format!("data:image/png;base64,{}", BASE64_STANDARD.encode(b"abc")));
    }
}
