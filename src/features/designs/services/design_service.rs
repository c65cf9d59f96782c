use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::designs::dtos::{
    image_extension, is_allowed_image, DesignResponseDto, ListDesignsQuery, SubmitDesignFields,
};
use crate::features::designs::models::{Design, NewDesign};
use crate::modules::images::ImageStore;
use crate::modules::store::{DesignFilter, GalleryStore};
use crate::shared::constants::{
    ANONYMOUS_USERNAME, DEFAULT_TOP_LIMIT, MAX_IMAGE_SIZE, UNKNOWN_CATEGORY_NAME,
};

/// Service for design listing, submission, voting and the top ranking
pub struct DesignService {
    store: Arc<dyn GalleryStore>,
    images: Arc<dyn ImageStore>,
}

impl DesignService {
    pub fn new(store: Arc<dyn GalleryStore>, images: Arc<dyn ImageStore>) -> Self {
        Self { store, images }
    }

    /// List designs with optional equality filters, newest first
    pub async fn list(&self, query: ListDesignsQuery) -> Result<Vec<DesignResponseDto>> {
        let filter = DesignFilter {
            category_id: query.category,
            status: query.status,
            limit: query.limit,
        };
        let designs = self.store.list_designs(&filter).await?;
        self.with_category_names(designs).await
    }

    /// Approved designs ranked by vote count, ties broken newest first
    pub async fn top(&self, limit: Option<usize>) -> Result<Vec<DesignResponseDto>> {
        let designs = self
            .store
            .top_designs(limit.unwrap_or(DEFAULT_TOP_LIMIT))
            .await?;
        self.with_category_names(designs).await
    }

    /// Validate and persist a submission.
    ///
    /// Nothing is persisted on failure: the image bytes are only written
    /// after every check has passed, and the record insert follows the
    /// image write.
    pub async fn submit(&self, fields: SubmitDesignFields) -> Result<DesignResponseDto> {
        let (title, category_id, image) = match (
            fields.title.filter(|t| !t.is_empty()),
            fields.category_id.filter(|c| !c.is_empty()),
            fields.image,
        ) {
            (Some(title), Some(category_id), Some(image)) => (title, category_id, image),
            _ => {
                return Err(AppError::Validation(
                    "Title, category, and image are required".to_string(),
                ))
            }
        };

        let category_id: i64 = category_id
            .parse()
            .map_err(|_| AppError::Validation("category_id must be an integer".to_string()))?;

        let extension = image_extension(&image.filename)
            .filter(|ext| is_allowed_image(ext, &image.content_type))
            .ok_or_else(|| {
                AppError::UnsupportedMedia("Only image files are allowed".to_string())
            })?;

        if image.data.len() > MAX_IMAGE_SIZE {
            return Err(AppError::PayloadTooLarge("File too large".to_string()));
        }

        let image_url = self
            .images
            .store(&image.data, &extension, &image.content_type)
            .await?;

        let username = fields
            .username
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| ANONYMOUS_USERNAME.to_string());

        let design = self
            .store
            .insert_design(NewDesign {
                title,
                description: fields.description,
                image_url,
                category_id,
                username,
            })
            .await?;

        tracing::info!(
            "Design submitted: id={}, title={}, category_id={}",
            design.id,
            design.title,
            design.category_id
        );

        let category_name = self.category_name(design.category_id).await?;
        Ok(DesignResponseDto::from_design(design, category_name))
    }

    /// Record one anonymous vote. Unauthenticated and unbounded on purpose:
    /// repeat calls from the same caller keep counting.
    pub async fn vote(&self, design_id: i64) -> Result<()> {
        let found = self.store.increment_votes(design_id).await?;
        if !found {
            return Err(AppError::NotFound("Design not found".to_string()));
        }

        tracing::debug!("Vote recorded for design id={}", design_id);
        Ok(())
    }

    async fn category_name(&self, category_id: i64) -> Result<String> {
        Ok(self
            .store
            .find_category(category_id)
            .await?
            .map(|c| c.name)
            .unwrap_or_else(|| UNKNOWN_CATEGORY_NAME.to_string()))
    }

    async fn with_category_names(&self, designs: Vec<Design>) -> Result<Vec<DesignResponseDto>> {
        let names: HashMap<i64, String> = self
            .store
            .list_categories()
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        Ok(designs
            .into_iter()
            .map(|design| {
                let name = names
                    .get(&design.category_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_CATEGORY_NAME.to_string());
                DesignResponseDto::from_design(design, name)
            })
            .collect())
    }
}
