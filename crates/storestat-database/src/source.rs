//! Collaborator traits consumed by the usage aggregator.
//!
//! Both traits are read-only. Implementations must treat a missing sum as
//! zero and never return an error for "no matching rows"; errors are
//! reserved for backing-store failures.

use async_trait::async_trait;

use storestat_core::result::AppResult;
use storestat_core::types::{CategoryId, CountedRows, CourseFilter, CourseId};
use storestat_entity::{Category, Course, CourseFileRow, CourseUsageRow};

/// Aggregation queries over stored files.
#[async_trait]
pub trait UsageSource: Send + Sync + std::fmt::Debug + 'static {
    /// Sum of sizes of files attached directly to the filtered courses.
    async fn course_files_bytes(&self, filter: &CourseFilter) -> AppResult<i64>;

    /// Sum of sizes of files attached to modules of the filtered courses.
    async fn module_files_bytes(&self, filter: &CourseFilter) -> AppResult<i64>;

    /// Union of course-level and module-level files of the filtered courses.
    ///
    /// Directory placeholders are excluded. The union is ordered by size
    /// descending then file id ascending before `offset`/`limit` apply;
    /// `total` counts the whole union.
    async fn file_listing(
        &self,
        filter: &CourseFilter,
        offset: u64,
        limit: u64,
    ) -> AppResult<CountedRows<CourseFileRow>>;

    /// Per-course sums of course-level plus module-level files.
    ///
    /// Ordered by summed size descending then course id ascending before
    /// `offset`/`limit` apply; `total` counts every contributing course.
    async fn course_breakdown(
        &self,
        filter: &CourseFilter,
        offset: u64,
        limit: u64,
    ) -> AppResult<CountedRows<CourseUsageRow>>;

    /// Sum of sizes of every stored file.
    async fn total_bytes(&self) -> AppResult<i64>;

    /// Sum of sizes of files owned by `component`.
    async fn component_bytes(&self, component: &str) -> AppResult<i64>;
}

/// Lookups over the course category tree.
#[async_trait]
pub trait CategoryTree: Send + Sync + std::fmt::Debug + 'static {
    /// Find a category by id.
    async fn find_category(&self, id: CategoryId) -> AppResult<Option<Category>>;

    /// Find a course by id.
    async fn find_course(&self, id: CourseId) -> AppResult<Option<Course>>;

    /// Every course in the category or any of its descendants.
    async fn category_courses(&self, id: CategoryId) -> AppResult<Vec<Course>>;

    /// Number of courses in the category or any of its descendants.
    async fn count_category_courses(&self, id: CategoryId) -> AppResult<u64>;

    /// Every category, in tree display order.
    async fn list_categories(&self) -> AppResult<Vec<Category>>;
}
