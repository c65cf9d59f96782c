use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::designs::models::{Design, DesignStatus};

/// Response DTO for a design, joined with its category name.
///
/// `category_name` falls back to "Unknown" when the category no longer
/// resolves; a dangling reference is never an error at read time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DesignResponseDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub category_id: i64,
    pub category_name: String,
    pub username: String,
    pub status: DesignStatus,
    pub votes_count: i64,
    pub created_at: DateTime<Utc>,
}

impl DesignResponseDto {
    pub fn from_design(design: Design, category_name: String) -> Self {
        Self {
            id: design.id,
            title: design.title,
            description: design.description,
            image_url: design.image_url,
            category_id: design.category_id,
            category_name,
            username: design.username,
            status: design.status,
            votes_count: design.votes_count,
            created_at: design.created_at,
        }
    }
}

/// Query params for listing designs
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListDesignsQuery {
    /// Filter by category id
    pub category: Option<i64>,
    /// Filter by moderation status
    pub status: Option<DesignStatus>,
    /// Truncate the result sequence
    pub limit: Option<usize>,
}

/// Query params for the top-designs listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct TopDesignsQuery {
    /// Number of designs to return (default 10)
    pub limit: Option<usize>,
}

/// Multipart form schema for design submission (OpenAPI documentation only;
/// the handler reads the fields straight from the multipart stream)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct SubmitDesignForm {
    /// Design title
    pub title: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Id of an existing category
    pub category_id: i64,
    /// Display name, defaults to "Anonymous"
    pub username: Option<String>,
    /// Image file (jpeg/jpg/png/gif/webp, at most 10 MiB)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: String,
}

/// Fields collected from the submission form before validation
#[derive(Debug, Default)]
pub struct SubmitDesignFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub username: Option<String>,
    pub image: Option<UploadedImage>,
}

/// The raw uploaded image as read from the multipart stream
#[derive(Debug)]
pub struct UploadedImage {
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

/// Lowercased extension of the uploaded filename, if it has one
pub fn image_extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Both the file extension and the declared MIME type must name an
/// accepted image format
pub fn is_allowed_image(extension: &str, content_type: &str) -> bool {
    use crate::shared::constants::ALLOWED_IMAGE_EXTENSIONS;

    let subtype = match content_type.strip_prefix("image/") {
        Some(s) => s.to_lowercase(),
        None => return false,
    };

    ALLOWED_IMAGE_EXTENSIONS.contains(&extension)
        && ALLOWED_IMAGE_EXTENSIONS.contains(&subtype.as_str())
}
