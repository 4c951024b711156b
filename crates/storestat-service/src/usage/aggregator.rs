//! Storage usage aggregation per course, per category, and system-wide.

use std::sync::Arc;

use tracing::debug;

use storestat_core::result::AppResult;
use storestat_core::types::{CategoryId, CountedRows, CourseFilter, CourseId};
use storestat_database::{CategoryTree, UsageSource};
use storestat_entity::{Course, CourseFileRow, CourseUsageRow};

use crate::context::RequestContext;

use super::access::AccessPolicy;

/// Computes storage usage figures for a scope.
///
/// Every figure is a raw byte count; unit formatting belongs to the caller.
/// An absent or zero id means "nothing selected" for courses and
/// "unfiltered" for categories.
#[derive(Debug, Clone)]
pub struct UsageAggregator {
    /// Aggregation queries over stored files.
    usage: Arc<dyn UsageSource>,
    /// Category and course lookups.
    tree: Arc<dyn CategoryTree>,
    /// Access checks.
    access: AccessPolicy,
    /// Component tag of personal user files.
    user_component: String,
}

impl UsageAggregator {
    /// Creates a new usage aggregator.
    pub fn new(
        usage: Arc<dyn UsageSource>,
        tree: Arc<dyn CategoryTree>,
        user_component: impl Into<String>,
    ) -> Self {
        Self {
            access: AccessPolicy::new(Arc::clone(&tree)),
            usage,
            tree,
            user_component: user_component.into(),
        }
    }

    /// Access policy shared with the report layer.
    pub fn access(&self) -> &AccessPolicy {
        &self.access
    }

    /// Bytes stored by a course and its activities.
    pub async fn course_usage(
        &self,
        ctx: &RequestContext,
        course_id: Option<CourseId>,
    ) -> AppResult<i64> {
        let Some(filter) = self.course_filter(ctx, course_id).await? else {
            return Ok(0);
        };

        self.filtered_usage(&filter).await
    }

    /// Bytes stored by a course the caller has already been authorized for.
    pub(crate) async fn authorized_course_usage(&self, course: &Course) -> AppResult<i64> {
        self.filtered_usage(&CourseFilter::course(course.id)).await
    }

    /// One page of a course's files, largest first.
    pub async fn course_file_listing(
        &self,
        ctx: &RequestContext,
        course_id: Option<CourseId>,
        offset: u64,
        limit: u64,
    ) -> AppResult<CountedRows<CourseFileRow>> {
        let Some(filter) = self.course_filter(ctx, course_id).await? else {
            return Ok(CountedRows::empty());
        };

        self.usage.file_listing(&filter, offset, limit).await
    }

    /// One page of files of a course the caller has already been authorized for.
    pub(crate) async fn authorized_course_files(
        &self,
        course: &Course,
        offset: u64,
        limit: u64,
    ) -> AppResult<CountedRows<CourseFileRow>> {
        self.usage
            .file_listing(&CourseFilter::course(course.id), offset, limit)
            .await
    }

    /// Bytes stored by every course in a category subtree, or by every
    /// course when no category is selected.
    pub async fn category_usage(
        &self,
        ctx: &RequestContext,
        category_id: Option<CategoryId>,
    ) -> AppResult<i64> {
        let Some(filter) = self.category_filter(ctx, category_id).await? else {
            return Ok(0);
        };

        self.filtered_usage(&filter).await
    }

    /// One page of per-course subtotals for a category scope, largest first.
    pub async fn category_course_breakdown(
        &self,
        ctx: &RequestContext,
        category_id: Option<CategoryId>,
        offset: u64,
        limit: u64,
    ) -> AppResult<CountedRows<CourseUsageRow>> {
        let Some(filter) = self.category_filter(ctx, category_id).await? else {
            return Ok(CountedRows::empty());
        };

        self.usage.course_breakdown(&filter, offset, limit).await
    }

    /// Bytes of every stored file on the platform.
    pub async fn system_total_usage(&self, ctx: &RequestContext) -> AppResult<i64> {
        self.access.require_site_admin(ctx, "total system usage")?;
        self.usage.total_bytes().await
    }

    /// Bytes of personal user files.
    pub async fn user_file_usage(&self, ctx: &RequestContext) -> AppResult<i64> {
        self.access.require_site_admin(ctx, "user file usage")?;
        self.usage.component_bytes(&self.user_component).await
    }

    /// Bytes of every course on the platform.
    pub async fn all_course_usage(&self, ctx: &RequestContext) -> AppResult<i64> {
        self.category_usage(ctx, None).await
    }

    async fn filtered_usage(&self, filter: &CourseFilter) -> AppResult<i64> {
        let course_bytes = self.usage.course_files_bytes(filter).await?;
        let module_bytes = self.usage.module_files_bytes(filter).await?;
        Ok(course_bytes + module_bytes)
    }

    /// Filter for a single course, or `None` when nothing is selected.
    ///
    /// Unknown courses still yield a filter so the sums come back as zero.
    async fn course_filter(
        &self,
        ctx: &RequestContext,
        course_id: Option<CourseId>,
    ) -> AppResult<Option<CourseFilter>> {
        let Some(course_id) = CourseId::selected(course_id) else {
            return Ok(None);
        };

        if !ctx.is_admin() {
            if let Some(course) = self.tree.find_course(course_id).await? {
                self.access.require_course(ctx, &course).await?;
            }
        }

        Ok(Some(CourseFilter::course(course_id)))
    }

    /// Course filter for a category scope.
    ///
    /// No category means every course and needs administrator rights. A
    /// selected category whose subtree holds no courses yields `None`.
    async fn category_filter(
        &self,
        ctx: &RequestContext,
        category_id: Option<CategoryId>,
    ) -> AppResult<Option<CourseFilter>> {
        let Some(category_id) = CategoryId::selected(category_id) else {
            self.access.require_site_admin(ctx, "usage of all courses")?;
            return Ok(Some(CourseFilter::All));
        };

        self.access.require_category_id(ctx, category_id).await?;

        let courses = self.tree.category_courses(category_id).await?;
        debug!(%category_id, courses = courses.len(), "Resolved category course set");
        if courses.is_empty() {
            return Ok(None);
        }

        Ok(Some(CourseFilter::Only(
            courses.into_iter().map(|c| c.id).collect(),
        )))
    }
}
