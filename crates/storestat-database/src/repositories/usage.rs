//! Usage aggregation repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use storestat_core::error::{AppError, ErrorKind};
use storestat_core::result::AppResult;
use storestat_core::types::{CountedRows, CourseFilter};
use storestat_entity::{ContextLevel, CourseFileRow, CourseUsageRow};

use crate::query::UsageQueries;
use crate::source::UsageSource;

/// PostgreSQL-backed [`UsageSource`].
#[derive(Debug, Clone)]
pub struct UsageRepository {
    pool: PgPool,
    queries: UsageQueries,
}

impl UsageRepository {
    /// Create a new usage repository for tables named with `table_prefix`.
    pub fn new(pool: PgPool, table_prefix: &str) -> Self {
        Self {
            pool,
            queries: UsageQueries::new(table_prefix),
        }
    }

    /// Run a single-value `SUM` statement at the given context level.
    async fn level_sum(
        &self,
        sql: &str,
        level: ContextLevel,
        filter: &CourseFilter,
        what: &str,
    ) -> AppResult<i64> {
        let mut query = sqlx::query_scalar::<_, i64>(sql).bind(level.as_i64());
        if let Some(ids) = filter.raw_ids() {
            query = query.bind(ids);
        }

        query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, format!("Failed to sum {what}"), e))
    }
}

#[async_trait]
impl UsageSource for UsageRepository {
    async fn course_files_bytes(&self, filter: &CourseFilter) -> AppResult<i64> {
        let sql = self.queries.course_files_sum(filter.is_restricted());
        self.level_sum(&sql, ContextLevel::Course, filter, "course files")
            .await
    }

    async fn module_files_bytes(&self, filter: &CourseFilter) -> AppResult<i64> {
        let sql = self.queries.module_files_sum(filter.is_restricted());
        self.level_sum(&sql, ContextLevel::Module, filter, "module files")
            .await
    }

    async fn file_listing(
        &self,
        filter: &CourseFilter,
        offset: u64,
        limit: u64,
    ) -> AppResult<CountedRows<CourseFileRow>> {
        let restricted = filter.is_restricted();
        let ids = filter.raw_ids();

        let count_sql = self.queries.file_listing_count(restricted);
        let mut count = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(ContextLevel::Course.as_i64())
            .bind(ContextLevel::Module.as_i64());
        if let Some(ids) = &ids {
            count = count.bind(ids.clone());
        }
        let total = count.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count course files", e)
        })?;

        let page_sql = self.queries.file_listing_page(restricted);
        let mut page = sqlx::query_as::<_, CourseFileRow>(&page_sql)
            .bind(ContextLevel::Course.as_i64())
            .bind(ContextLevel::Module.as_i64());
        if let Some(ids) = ids {
            page = page.bind(ids);
        }
        let rows = page
            .bind(to_sql_int(limit))
            .bind(to_sql_int(offset))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list course files", e)
            })?;

        debug!(total, returned = rows.len(), offset, limit, "Listed course files");
        Ok(CountedRows::new(total.max(0) as u64, rows))
    }

    async fn course_breakdown(
        &self,
        filter: &CourseFilter,
        offset: u64,
        limit: u64,
    ) -> AppResult<CountedRows<CourseUsageRow>> {
        let restricted = filter.is_restricted();
        let ids = filter.raw_ids();

        let count_sql = self.queries.course_breakdown_count(restricted);
        let mut count = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(ContextLevel::Course.as_i64())
            .bind(ContextLevel::Module.as_i64());
        if let Some(ids) = &ids {
            count = count.bind(ids.clone());
        }
        let total = count.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count course subtotals", e)
        })?;

        let page_sql = self.queries.course_breakdown_page(restricted);
        let mut page = sqlx::query_as::<_, CourseUsageRow>(&page_sql)
            .bind(ContextLevel::Course.as_i64())
            .bind(ContextLevel::Module.as_i64());
        if let Some(ids) = ids {
            page = page.bind(ids);
        }
        let rows = page
            .bind(to_sql_int(limit))
            .bind(to_sql_int(offset))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list course subtotals", e)
            })?;

        debug!(total, returned = rows.len(), offset, limit, "Listed course subtotals");
        Ok(CountedRows::new(total.max(0) as u64, rows))
    }

    async fn total_bytes(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(&self.queries.total_bytes())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to sum stored files", e)
            })
    }

    async fn component_bytes(&self, component: &str) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(&self.queries.component_bytes())
            .bind(component)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to sum files of component '{component}'"),
                    e,
                )
            })
    }
}

/// Clamp a paging value into PostgreSQL's `BIGINT` range.
fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_sql_int_saturates() {
        assert_eq!(to_sql_int(25), 25);
        assert_eq!(to_sql_int(u64::MAX), i64::MAX);
    }
}
