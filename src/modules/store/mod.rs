//! Persistent store for categories and designs.
//!
//! Services depend on the [`GalleryStore`] trait only, so the backing store
//! can be swapped without touching business logic. Two backends exist: an
//! in-process memory store and a Postgres store.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::categories::models::Category;
use crate::features::designs::models::{Design, DesignStatus, NewDesign};

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Equality filter for design listings. Absent fields match everything.
#[derive(Debug, Clone, Default)]
pub struct DesignFilter {
    pub category_id: Option<i64>,
    pub status: Option<DesignStatus>,
    /// Plain truncation of the result sequence, not a cursor
    pub limit: Option<usize>,
}

#[async_trait]
pub trait GalleryStore: Send + Sync {
    /// All categories ordered by name
    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn find_category(&self, id: i64) -> Result<Option<Category>>;

    /// Inserts a category; fails with `AppError::Conflict` on a duplicate name
    async fn insert_category(&self, name: &str, description: Option<&str>) -> Result<Category>;

    /// Insert-or-ignore for the boot-time seed list; existing names are kept
    async fn seed_categories(&self, names: &[&str]) -> Result<()>;

    /// Designs matching the filter, ordered by `created_at` descending
    async fn list_designs(&self, filter: &DesignFilter) -> Result<Vec<Design>>;

    async fn get_design(&self, id: i64) -> Result<Option<Design>>;

    /// Persists a new design with status approved and zero votes
    async fn insert_design(&self, new: NewDesign) -> Result<Design>;

    /// Unconditionally adds one vote; returns false when the id is unknown.
    ///
    /// Atomicity is whatever the backend provides natively: the Postgres
    /// store issues a single in-place UPDATE, the memory store holds a
    /// write lock for the increment.
    async fn increment_votes(&self, id: i64) -> Result<bool>;

    /// Sets the moderation status; returns the updated design, or None for
    /// an unknown id. No transition validity is enforced.
    async fn set_design_status(&self, id: i64, status: DesignStatus) -> Result<Option<Design>>;

    /// Approved designs ordered by votes descending, then newest first
    async fn top_designs(&self, limit: usize) -> Result<Vec<Design>>;
}
