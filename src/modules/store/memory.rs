use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::designs::models::{Design, DesignStatus, NewDesign};
use crate::modules::store::{DesignFilter, GalleryStore};

/// In-process store backed by `RwLock`-guarded vectors.
///
/// State is lost on restart. Ids come from a single incrementing counter
/// shared by both collections, which keeps them unique and stable for the
/// lifetime of the process.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

struct Inner {
    categories: Vec<Category>,
    designs: Vec<Design>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                categories: Vec::new(),
                designs: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[async_trait]
impl GalleryStore for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let inner = self.inner.read().await;
        let mut categories = inner.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_category(&self, id: i64) -> Result<Option<Category>> {
        let inner = self.inner.read().await;
        Ok(inner.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_category(&self, name: &str, description: Option<&str>) -> Result<Category> {
        let mut inner = self.inner.write().await;

        if inner.categories.iter().any(|c| c.name == name) {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                name
            )));
        }

        let category = Category {
            id: inner.allocate_id(),
            name: name.to_string(),
            description: description.map(|d| d.to_string()),
            created_at: Utc::now(),
        };
        inner.categories.push(category.clone());
        Ok(category)
    }

    async fn seed_categories(&self, names: &[&str]) -> Result<()> {
        let mut inner = self.inner.write().await;

        for name in names {
            if inner.categories.iter().any(|c| c.name == *name) {
                continue;
            }
            let category = Category {
                id: inner.allocate_id(),
                name: name.to_string(),
                description: None,
                created_at: Utc::now(),
            };
            inner.categories.push(category);
        }
        Ok(())
    }

    async fn list_designs(&self, filter: &DesignFilter) -> Result<Vec<Design>> {
        let inner = self.inner.read().await;

        let mut designs: Vec<Design> = inner
            .designs
            .iter()
            .filter(|d| filter.category_id.is_none_or(|c| d.category_id == c))
            .filter(|d| filter.status.is_none_or(|s| d.status == s))
            .cloned()
            .collect();

        // Newest first; ids break ties for designs created within the
        // same timestamp tick
        designs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        if let Some(limit) = filter.limit {
            designs.truncate(limit);
        }
        Ok(designs)
    }

    async fn get_design(&self, id: i64) -> Result<Option<Design>> {
        let inner = self.inner.read().await;
        Ok(inner.designs.iter().find(|d| d.id == id).cloned())
    }

    async fn insert_design(&self, new: NewDesign) -> Result<Design> {
        let mut inner = self.inner.write().await;

        let design = Design {
            id: inner.allocate_id(),
            title: new.title,
            description: new.description,
            image_url: new.image_url,
            category_id: new.category_id,
            username: new.username,
            status: DesignStatus::Approved,
            votes_count: 0,
            created_at: Utc::now(),
        };
        inner.designs.push(design.clone());
        Ok(design)
    }

    async fn increment_votes(&self, id: i64) -> Result<bool> {
        let mut inner = self.inner.write().await;

        match inner.designs.iter_mut().find(|d| d.id == id) {
            Some(design) => {
                design.votes_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_design_status(&self, id: i64, status: DesignStatus) -> Result<Option<Design>> {
        let mut inner = self.inner.write().await;

        match inner.designs.iter_mut().find(|d| d.id == id) {
            Some(design) => {
                design.status = status;
                Ok(Some(design.clone()))
            }
            None => Ok(None),
        }
    }

    async fn top_designs(&self, limit: usize) -> Result<Vec<Design>> {
        let inner = self.inner.read().await;

        let mut designs: Vec<Design> = inner
            .designs
            .iter()
            .filter(|d| d.status == DesignStatus::Approved)
            .cloned()
            .collect();

        designs.sort_by(|a, b| {
            b.votes_count
                .cmp(&a.votes_count)
                .then(b.created_at.cmp(&a.created_at))
        });
        designs.truncate(limit);
        Ok(designs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_design(category_id: i64) -> NewDesign {
        NewDesign {
            title: "Logo A".to_string(),
            description: None,
            image_url: "/uploads/image-1.png".to_string(),
            category_id,
            username: "Ana".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_design_defaults_to_approved_with_zero_votes() {
        let store = MemoryStore::new();
        let design = store.insert_design(sample_design(1)).await.unwrap();

        assert_eq!(design.status, DesignStatus::Approved);
        assert_eq!(design.votes_count, 0);
    }

    #[tokio::test]
    async fn votes_increment_one_per_call() {
        let store = MemoryStore::new();
        let design = store.insert_design(sample_design(1)).await.unwrap();

        for expected in 1..=3 {
            assert!(store.increment_votes(design.id).await.unwrap());
            let current = store.get_design(design.id).await.unwrap().unwrap();
            assert_eq!(current.votes_count, expected);
        }
    }

    #[tokio::test]
    async fn vote_on_unknown_id_changes_nothing() {
        let store = MemoryStore::new();
        let design = store.insert_design(sample_design(1)).await.unwrap();

        assert!(!store.increment_votes(9999).await.unwrap());
        let current = store.get_design(design.id).await.unwrap().unwrap();
        assert_eq!(current.votes_count, 0);
    }

    #[tokio::test]
    async fn duplicate_category_name_conflicts() {
        let store = MemoryStore::new();
        store.insert_category("T-Shirts", None).await.unwrap();

        let err = store.insert_category("T-Shirts", None).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let store = MemoryStore::new();
        store.seed_categories(&["T-Shirts", "Hoodies"]).await.unwrap();
        store.seed_categories(&["T-Shirts", "Hoodies"]).await.unwrap();

        assert_eq!(store.list_categories().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn list_filters_by_category_and_status() {
        let store = MemoryStore::new();
        let a = store.insert_design(sample_design(1)).await.unwrap();
        let b = store.insert_design(sample_design(2)).await.unwrap();
        store
            .set_design_status(b.id, DesignStatus::Rejected)
            .await
            .unwrap();

        let filter = DesignFilter {
            category_id: Some(1),
            ..Default::default()
        };
        let by_category = store.list_designs(&filter).await.unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].id, a.id);

        let filter = DesignFilter {
            status: Some(DesignStatus::Approved),
            ..Default::default()
        };
        let approved = store.list_designs(&filter).await.unwrap();
        assert!(approved.iter().all(|d| d.status == DesignStatus::Approved));
        assert_eq!(approved.len(), 1);
    }

    #[tokio::test]
    async fn top_designs_ranks_by_votes_and_excludes_unapproved() {
        let store = MemoryStore::new();
        let low = store.insert_design(sample_design(1)).await.unwrap();
        let high = store.insert_design(sample_design(1)).await.unwrap();
        let rejected = store.insert_design(sample_design(1)).await.unwrap();
        store
            .set_design_status(rejected.id, DesignStatus::Rejected)
            .await
            .unwrap();

        store.increment_votes(low.id).await.unwrap();
        for _ in 0..5 {
            store.increment_votes(high.id).await.unwrap();
        }
        for _ in 0..10 {
            store.increment_votes(rejected.id).await.unwrap();
        }

        let top = store.top_designs(2).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, high.id);
        assert_eq!(top[1].id, low.id);
    }
}
