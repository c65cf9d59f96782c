use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::StatsResponseDto;
use crate::features::designs::dtos::DesignResponseDto;
use crate::features::designs::models::{Design, DesignStatus};
use crate::modules::store::{DesignFilter, GalleryStore};
use crate::shared::constants::UNKNOWN_CATEGORY_NAME;

/// Service for moderation actions and the admin stats view
pub struct AdminService {
    store: Arc<dyn GalleryStore>,
}

impl AdminService {
    pub fn new(store: Arc<dyn GalleryStore>) -> Self {
        Self { store }
    }

    /// Set a design's moderation status.
    ///
    /// Any status may replace any other; there is no transition table.
    /// `pending` is an initial value only and is rejected as a target.
    pub async fn set_status(
        &self,
        design_id: i64,
        status: DesignStatus,
    ) -> Result<DesignResponseDto> {
        if status == DesignStatus::Pending {
            return Err(AppError::Validation(
                "Status must be one of: approved, rejected, selected".to_string(),
            ));
        }

        let design = self
            .store
            .set_design_status(design_id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Design not found".to_string()))?;

        tracing::info!(
            "Design status updated: id={}, status={}",
            design.id,
            design.status
        );

        let category_name = self
            .store
            .find_category(design.category_id)
            .await?
            .map(|c| c.name)
            .unwrap_or_else(|| UNKNOWN_CATEGORY_NAME.to_string());

        Ok(DesignResponseDto::from_design(design, category_name))
    }

    /// Aggregate counters over the full design collection, recomputed per call
    pub async fn stats(&self) -> Result<StatsResponseDto> {
        let designs = self.store.list_designs(&DesignFilter::default()).await?;
        Ok(compute_stats(&designs))
    }
}

/// Pure aggregation: counts by status plus the vote sum
fn compute_stats(designs: &[Design]) -> StatsResponseDto {
    StatsResponseDto {
        total_designs: designs.len() as i64,
        pending_designs: designs
            .iter()
            .filter(|d| d.status == DesignStatus::Pending)
            .count() as i64,
        approved_designs: designs
            .iter()
            .filter(|d| d.status == DesignStatus::Approved)
            .count() as i64,
        total_votes: designs.iter().map(|d| d.votes_count).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::designs::models::NewDesign;
    use crate::modules::store::MemoryStore;
    use chrono::Utc;

    fn design(status: DesignStatus, votes: i64) -> Design {
        Design {
            id: 1,
            title: "Logo".to_string(),
            description: None,
            image_url: "/uploads/logo.png".to_string(),
            category_id: 1,
            username: "Ana".to_string(),
            status,
            votes_count: votes,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn stats_count_by_status_and_sum_votes() {
        let designs = vec![
            design(DesignStatus::Approved, 3),
            design(DesignStatus::Approved, 2),
            design(DesignStatus::Pending, 0),
            design(DesignStatus::Rejected, 7),
        ];

        let stats = compute_stats(&designs);
        assert_eq!(
            stats,
            StatsResponseDto {
                total_designs: 4,
                pending_designs: 1,
                approved_designs: 2,
                total_votes: 12,
            }
        );
    }

    #[test]
    fn stats_of_empty_collection_are_zero() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_designs, 0);
        assert_eq!(stats.total_votes, 0);
    }

    async fn store_with_design() -> (Arc<MemoryStore>, i64) {
        let store = Arc::new(MemoryStore::new());
        let design = store
            .insert_design(NewDesign {
                title: "Logo".to_string(),
                description: None,
                image_url: "/uploads/logo.png".to_string(),
                category_id: 1,
                username: "Ana".to_string(),
            })
            .await
            .unwrap();
        (store, design.id)
    }

    #[tokio::test]
    async fn any_status_can_replace_any_other() {
        let (store, id) = store_with_design().await;
        let service = AdminService::new(store);

        let updated = service.set_status(id, DesignStatus::Rejected).await.unwrap();
        assert_eq!(updated.status, DesignStatus::Rejected);

        // Straight from rejected to selected, no transition rules
        let updated = service.set_status(id, DesignStatus::Selected).await.unwrap();
        assert_eq!(updated.status, DesignStatus::Selected);
    }

    #[tokio::test]
    async fn pending_is_not_a_valid_target() {
        let (store, id) = store_with_design().await;
        let service = AdminService::new(store);

        let err = service.set_status(id, DesignStatus::Pending).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_design_is_not_found() {
        let service = AdminService::new(Arc::new(MemoryStore::new()));
        let err = service
            .set_status(99, DesignStatus::Approved)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
