use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool, QueryBuilder};

use crate::core::config::DatabaseConfig;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::designs::models::{Design, DesignStatus, NewDesign};
use crate::modules::store::{DesignFilter, GalleryStore};

/// Postgres-backed store.
///
/// Queries are built at runtime so the crate compiles without a live
/// database; the schema lives in `migrations/`.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool sized from the database config and run pending
    /// migrations before handing the store out.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect(&config.url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::Internal(format!("Migration failed: {}", e)))?;

        Ok(Self::new(pool))
    }
}

/// LIMIT parameter for Postgres; values past i64 saturate instead of wrapping
fn pg_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// Raw row shape; `status` comes back as TEXT and is parsed into the enum
#[derive(Debug, FromRow)]
struct DesignRow {
    id: i64,
    title: String,
    description: Option<String>,
    image_url: String,
    category_id: i64,
    username: String,
    status: String,
    votes_count: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<DesignRow> for Design {
    type Error = AppError;

    fn try_from(row: DesignRow) -> Result<Design> {
        let status = row
            .status
            .parse::<DesignStatus>()
            .map_err(AppError::Internal)?;

        Ok(Design {
            id: row.id,
            title: row.title,
            description: row.description,
            image_url: row.image_url,
            category_id: row.category_id,
            username: row.username,
            status,
            votes_count: row.votes_count,
            created_at: row.created_at,
        })
    }
}

const DESIGN_COLUMNS: &str =
    "id, title, description, image_url, category_id, username, status, votes_count, created_at";

#[async_trait]
impl GalleryStore for PostgresStore {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, created_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories)
    }

    async fn find_category(&self, id: i64) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, created_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn insert_category(&self, name: &str, description: Option<&str>) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description) VALUES ($1, $2) \
             RETURNING id, name, description, created_at",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AppError::Conflict(format!("Category '{}' already exists", name))
            } else {
                tracing::error!("Failed to insert category: {:?}", e);
                AppError::Database(e)
            }
        })?;

        Ok(category)
    }

    async fn seed_categories(&self, names: &[&str]) -> Result<()> {
        for name in names {
            sqlx::query("INSERT INTO categories (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
                .bind(name)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    async fn list_designs(&self, filter: &DesignFilter) -> Result<Vec<Design>> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM designs WHERE TRUE", DESIGN_COLUMNS));

        if let Some(category_id) = filter.category_id {
            builder.push(" AND category_id = ");
            builder.push_bind(category_id);
        }
        if let Some(status) = filter.status {
            builder.push(" AND status = ");
            builder.push_bind(status.as_str());
        }
        builder.push(" ORDER BY created_at DESC, id DESC");
        if let Some(limit) = filter.limit {
            builder.push(" LIMIT ");
            builder.push_bind(pg_limit(limit));
        }

        let rows: Vec<DesignRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list designs: {:?}", e);
                AppError::Database(e)
            })?;

        rows.into_iter().map(Design::try_from).collect()
    }

    async fn get_design(&self, id: i64) -> Result<Option<Design>> {
        let row = sqlx::query_as::<_, DesignRow>(&format!(
            "SELECT {} FROM designs WHERE id = $1",
            DESIGN_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Design::try_from).transpose()
    }

    async fn insert_design(&self, new: NewDesign) -> Result<Design> {
        let row = sqlx::query_as::<_, DesignRow>(&format!(
            "INSERT INTO designs (title, description, image_url, category_id, username) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            DESIGN_COLUMNS
        ))
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.image_url)
        .bind(new.category_id)
        .bind(&new.username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert design: {:?}", e);
            AppError::Database(e)
        })?;

        Design::try_from(row)
    }

    async fn increment_votes(&self, id: i64) -> Result<bool> {
        // Single in-place UPDATE; the database serializes concurrent votes
        let result = sqlx::query("UPDATE designs SET votes_count = votes_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_design_status(&self, id: i64, status: DesignStatus) -> Result<Option<Design>> {
        let row = sqlx::query_as::<_, DesignRow>(&format!(
            "UPDATE designs SET status = $2 WHERE id = $1 RETURNING {}",
            DESIGN_COLUMNS
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Design::try_from).transpose()
    }

    async fn top_designs(&self, limit: usize) -> Result<Vec<Design>> {
        let rows = sqlx::query_as::<_, DesignRow>(&format!(
            "SELECT {} FROM designs WHERE status = 'approved' \
             ORDER BY votes_count DESC, created_at DESC LIMIT $1",
            DESIGN_COLUMNS
        ))
        .bind(pg_limit(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list top designs: {:?}", e);
            AppError::Database(e)
        })?;

        rows.into_iter().map(Design::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_saturates_instead_of_wrapping() {
        assert_eq!(pg_limit(10), 10);
        assert_eq!(pg_limit(usize::MAX), i64::MAX);
    }
}
