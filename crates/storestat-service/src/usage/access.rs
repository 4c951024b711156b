//! Access checks for usage figures.

use std::sync::Arc;

use tracing::warn;

use storestat_core::error::AppError;
use storestat_core::result::AppResult;
use storestat_core::types::CategoryId;
use storestat_database::CategoryTree;
use storestat_entity::{Category, Course};

use crate::context::RequestContext;

/// Decides whether a request may see a scope.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    /// Category tree used to resolve category paths.
    tree: Arc<dyn CategoryTree>,
}

impl AccessPolicy {
    /// Creates a new access policy.
    pub fn new(tree: Arc<dyn CategoryTree>) -> Self {
        Self { tree }
    }

    /// Require site administrator rights for a system-wide figure.
    pub fn require_site_admin(&self, ctx: &RequestContext, what: &str) -> AppResult<()> {
        if ctx.is_admin() {
            return Ok(());
        }

        warn!(user_id = %ctx.user_id, what, "Denied system-wide usage");
        Err(AppError::authorization(format!(
            "Only site administrators may view {what}"
        )))
    }

    /// Require access to an already loaded category.
    pub fn require_category(&self, ctx: &RequestContext, category: &Category) -> AppResult<()> {
        if ctx.can_view_category(category) {
            return Ok(());
        }

        warn!(user_id = %ctx.user_id, category_id = %category.id, "Denied category usage");
        Err(AppError::authorization(format!(
            "Cannot view category {}",
            category.id
        )))
    }

    /// Require access to a category by id.
    ///
    /// Administrators pass without a lookup. For everyone else an unknown
    /// category is treated as not viewable.
    pub async fn require_category_id(
        &self,
        ctx: &RequestContext,
        category_id: CategoryId,
    ) -> AppResult<()> {
        if ctx.is_admin() {
            return Ok(());
        }

        match self.tree.find_category(category_id).await? {
            Some(category) => self.require_category(ctx, &category),
            None => Err(AppError::authorization(format!(
                "Cannot view category {category_id}"
            ))),
        }
    }

    /// Require access to a course through its category.
    pub async fn require_course(&self, ctx: &RequestContext, course: &Course) -> AppResult<()> {
        self.require_category_id(ctx, course.category).await
    }
}
