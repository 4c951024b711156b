//! Usage report composition.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use storestat_core::config::ReportConfig;
use storestat_core::error::AppError;
use storestat_core::result::AppResult;
use storestat_core::types::{CategoryId, CourseId, PageRequest, PageResponse, UsageScope};
use storestat_database::CategoryTree;
use storestat_entity::{Category, CourseFileRow};

use crate::context::RequestContext;
use crate::usage::UsageAggregator;

use super::links::LinkBuilder;
use super::view::{
    CategoryOption, CategoryReport, CategorySummary, ChartSlice, CourseReport, CourseUsageLine,
    FileLine, SystemOverview, UsageChart, UsageFigure, heading,
};

/// Composes aggregator figures into report views.
#[derive(Debug, Clone)]
pub struct UsageReportService {
    /// Usage aggregator.
    aggregator: Arc<UsageAggregator>,
    /// Category and course lookups.
    tree: Arc<dyn CategoryTree>,
    /// Deep link builder.
    links: LinkBuilder,
    /// Paging defaults.
    config: ReportConfig,
}

impl UsageReportService {
    /// Creates a new report service.
    pub fn new(
        aggregator: Arc<UsageAggregator>,
        tree: Arc<dyn CategoryTree>,
        links: LinkBuilder,
        config: ReportConfig,
    ) -> Self {
        Self {
            aggregator,
            tree,
            links,
            config,
        }
    }

    /// Page request from optional caller input, within the configured bounds.
    pub fn page_request(&self, page: Option<u64>, per_page: Option<u64>) -> PageRequest {
        PageRequest::bounded(
            page.unwrap_or(1),
            per_page.unwrap_or(self.config.default_page_size),
            self.config.max_page_size,
        )
    }

    /// Site-wide totals and the course versus user chart.
    pub async fn system_overview(&self, ctx: &RequestContext) -> AppResult<SystemOverview> {
        self.aggregator
            .access()
            .require_site_admin(ctx, "the system overview")?;

        let total = self.aggregator.system_total_usage(ctx).await?;
        let all_courses = self.aggregator.all_course_usage(ctx).await?;
        let all_users = self.aggregator.user_file_usage(ctx).await?;

        log_view(ctx, None, None);

        Ok(SystemOverview {
            generated_at: Utc::now(),
            total: UsageFigure::gb(total),
            all_courses: UsageFigure::mb(all_courses),
            all_users: UsageFigure::mb(all_users),
            chart: UsageChart::new(
                "Storage Usage",
                vec![
                    ChartSlice::megabytes("All Course", all_courses),
                    ChartSlice::megabytes("All Users", all_users),
                ],
            ),
        })
    }

    /// Course subtotals of a category subtree, or of every course.
    pub async fn category_report(
        &self,
        ctx: &RequestContext,
        category_id: Option<CategoryId>,
        page: PageRequest,
    ) -> AppResult<CategoryReport> {
        let category = self.resolve_category(ctx, category_id).await?;
        let scope_id = category.as_ref().map(|c| c.id);

        let total = self.aggregator.category_usage(ctx, scope_id).await?;
        let breakdown = self
            .aggregator
            .category_course_breakdown(ctx, scope_id, page.offset(), page.limit())
            .await?;

        let course_count = match scope_id {
            Some(id) => Some(self.tree.count_category_courses(id).await?),
            None => None,
        };

        log_view(ctx, scope_id, None);

        let lines = breakdown.map(|row| CourseUsageLine {
            drilldown: UsageScope::from_params(scope_id, Some(row.course_id)),
            course_id: row.course_id,
            course_name: row.course_name,
            size: UsageFigure::mb(row.size_bytes),
        });
        let summary = category.map(|c| CategorySummary {
            id: c.id,
            name: c.name,
        });

        Ok(CategoryReport {
            generated_at: Utc::now(),
            heading: heading(summary.as_ref()),
            category: summary,
            course_count,
            total: UsageFigure::mb(total),
            courses: PageResponse::from_counted(lines, &page),
        })
    }

    /// Files of one course, with download and activity links.
    pub async fn course_report(
        &self,
        ctx: &RequestContext,
        category_id: Option<CategoryId>,
        course_id: CourseId,
        page: PageRequest,
    ) -> AppResult<CourseReport> {
        let course = self
            .tree
            .find_course(course_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Course {course_id} not found")))?;
        self.aggregator.access().require_course(ctx, &course).await?;

        let category = self.resolve_category(ctx, category_id).await?;
        let summary = category.map(|c| CategorySummary {
            id: c.id,
            name: c.name,
        });
        let scope_id = summary.as_ref().map(|c| c.id);

        let total = self.aggregator.authorized_course_usage(&course).await?;
        let listing = self
            .aggregator
            .authorized_course_files(&course, page.offset(), page.limit())
            .await?;

        log_view(ctx, scope_id, Some(course.id));

        let files = listing.map(|row| self.file_line(row));

        Ok(CourseReport {
            generated_at: Utc::now(),
            heading: heading(summary.as_ref()),
            category_id: scope_id,
            course_id: course.id,
            course_url: self.links.course(course.id),
            course_name: course.fullname,
            total: UsageFigure::mb(total),
            files: PageResponse::from_counted(files, &page),
        })
    }

    /// Categories the user may pick, with their full names.
    pub async fn list_categories(&self, ctx: &RequestContext) -> AppResult<Vec<CategoryOption>> {
        let categories = self.tree.list_categories().await?;
        let names: HashMap<CategoryId, &str> = categories
            .iter()
            .map(|c| (c.id, c.name.as_str()))
            .collect();

        Ok(categories
            .iter()
            .filter(|c| ctx.can_view_category(c))
            .map(|c| {
                let lineage = c.lineage();
                let name = lineage
                    .iter()
                    .filter_map(|id| names.get(id).copied())
                    .collect::<Vec<_>>()
                    .join(" / ");
                CategoryOption {
                    id: c.id,
                    name: if name.is_empty() { c.name.clone() } else { name },
                    depth: lineage.len().saturating_sub(1),
                }
            })
            .collect())
    }

    /// Category a report covers.
    ///
    /// An explicit category must exist and be viewable. Without one,
    /// administrators get the whole system and other users land on the last
    /// category they may view.
    async fn resolve_category(
        &self,
        ctx: &RequestContext,
        category_id: Option<CategoryId>,
    ) -> AppResult<Option<Category>> {
        let selected = match CategoryId::selected(category_id) {
            Some(id) => id,
            None if ctx.is_admin() => return Ok(None),
            None => ctx.default_category().ok_or_else(|| {
                AppError::authorization("Cannot view category: no category is accessible")
            })?,
        };

        let category = self
            .tree
            .find_category(selected)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Category {selected} not found")))?;
        self.aggregator.access().require_category(ctx, &category)?;

        Ok(Some(category))
    }

    fn file_line(&self, row: CourseFileRow) -> FileLine {
        FileLine {
            file_url: self.links.pluginfile(&row),
            activity_url: row
                .activity()
                .map(|(cmid, name)| self.links.activity(cmid, name)),
            origin: row.origin(),
            size: UsageFigure::mb(row.filesize),
            file_id: row.file_id,
            filename: row.filename,
            component: row.component,
            filearea: row.filearea,
        }
    }
}

fn log_view(ctx: &RequestContext, category_id: Option<CategoryId>, course_id: Option<CourseId>) {
    info!(
        event = "report.viewed",
        user_id = %ctx.user_id,
        username = %ctx.username,
        category_id = category_id.map(|id| id.get()).unwrap_or(0),
        course_id = course_id.map(|id| id.get()).unwrap_or(0),
        "Usage report viewed"
    );
}
