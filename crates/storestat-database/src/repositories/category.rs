//! Category tree repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use storestat_core::error::{AppError, ErrorKind};
use storestat_core::result::AppResult;
use storestat_core::types::{CategoryId, CourseId};
use storestat_entity::{Category, Course};

use crate::query::CategoryQueries;
use crate::source::CategoryTree;

/// PostgreSQL-backed [`CategoryTree`].
///
/// Recursion uses the materialised `path` column: a course belongs to a
/// category when its own category is that category or has it on its path.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
    queries: CategoryQueries,
}

impl CategoryRepository {
    /// Create a new category repository for tables named with `table_prefix`.
    pub fn new(pool: PgPool, table_prefix: &str) -> Self {
        Self {
            pool,
            queries: CategoryQueries::new(table_prefix),
        }
    }
}

#[async_trait]
impl CategoryTree for CategoryRepository {
    async fn find_category(&self, id: CategoryId) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>(&self.queries.find_category())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find category", e))
    }

    async fn find_course(&self, id: CourseId) -> AppResult<Option<Course>> {
        sqlx::query_as::<_, Course>(&self.queries.find_course())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find course", e))
    }

    async fn category_courses(&self, id: CategoryId) -> AppResult<Vec<Course>> {
        sqlx::query_as::<_, Course>(&self.queries.category_courses())
            .bind(id)
            .bind(Category::descendant_pattern(id))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list category courses", e)
            })
    }

    async fn count_category_courses(&self, id: CategoryId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(&self.queries.count_category_courses())
            .bind(id)
            .bind(Category::descendant_pattern(id))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count category courses", e)
            })?;
        Ok(count.max(0) as u64)
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>(&self.queries.list_categories())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list categories", e))
    }
}
