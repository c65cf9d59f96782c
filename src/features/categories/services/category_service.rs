use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::dtos::{CategoryResponseDto, CreateCategoryDto};
use crate::modules::store::GalleryStore;
use crate::shared::constants::DEFAULT_CATEGORIES;

/// Service for category operations
pub struct CategoryService {
    store: Arc<dyn GalleryStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn GalleryStore>) -> Self {
        Self { store }
    }

    /// List all categories ordered by name
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.store.list_categories().await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Create a new category; duplicate names conflict
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let category = self
            .store
            .insert_category(&dto.name, dto.description.as_deref())
            .await?;

        tracing::info!("Category created: id={}, name={}", category.id, category.name);

        Ok(category.into())
    }

    /// Seed the default category list; names that already exist are kept as-is
    pub async fn seed_defaults(&self) -> Result<()> {
        self.store.seed_categories(DEFAULT_CATEGORIES).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::modules::store::MemoryStore;

    fn service() -> CategoryService {
        CategoryService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let service = service();
        service.seed_defaults().await.unwrap();

        let names: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), DEFAULT_CATEGORIES.len());
    }

    #[tokio::test]
    async fn create_rejects_duplicate_names() {
        let service = service();
        let dto = CreateCategoryDto {
            name: "Mugs".to_string(),
            description: None,
        };
        service.create(dto.clone()).await.unwrap();

        let err = service.create(dto).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn seeding_twice_creates_no_duplicates() {
        let service = service();
        service.seed_defaults().await.unwrap();
        service.seed_defaults().await.unwrap();

        assert_eq!(service.list().await.unwrap().len(), DEFAULT_CATEGORIES.len());
    }
}
