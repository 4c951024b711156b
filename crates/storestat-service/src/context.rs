//! Request context carrying the caller's identity and resolved access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storestat_core::types::{CategoryId, UserId};
use storestat_entity::Category;

/// Context for the current report request.
///
/// Built by the presentation layer once the platform has authenticated the
/// user, and passed into every service method so that each operation knows
/// *who* is asking and *what* they may see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The requesting user's ID.
    pub user_id: UserId,
    /// The username, for log lines.
    pub username: String,
    /// Whether the user is a site administrator.
    pub site_admin: bool,
    /// Categories the user holds the report capability in, in picker order.
    pub viewable_categories: Vec<CategoryId>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: UserId,
        username: impl Into<String>,
        site_admin: bool,
        viewable_categories: Vec<CategoryId>,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            site_admin,
            viewable_categories,
            request_time: Utc::now(),
        }
    }

    /// Context of a site administrator.
    pub fn site_admin(user_id: UserId, username: impl Into<String>) -> Self {
        Self::new(user_id, username, true, Vec::new())
    }

    /// Context of a user limited to the given categories and their subtrees.
    pub fn restricted(
        user_id: UserId,
        username: impl Into<String>,
        viewable_categories: Vec<CategoryId>,
    ) -> Self {
        Self::new(user_id, username, false, viewable_categories)
    }

    /// Returns whether the current user is a site administrator.
    pub fn is_admin(&self) -> bool {
        self.site_admin
    }

    /// Whether the user may see `category` and everything below it.
    pub fn can_view_category(&self, category: &Category) -> bool {
        self.site_admin
            || self
                .viewable_categories
                .iter()
                .any(|granted| category.is_within(*granted))
    }

    /// Category a user without an explicit selection lands on.
    pub fn default_category(&self) -> Option<CategoryId> {
        self.viewable_categories.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physics() -> Category {
        Category {
            id: CategoryId::new(7),
            name: "Physics".to_string(),
            parent: CategoryId::new(4),
            path: "/1/4/7".to_string(),
        }
    }

    #[test]
    fn test_admin_sees_everything() {
        let ctx = RequestContext::site_admin(UserId::new(2), "admin");
        assert!(ctx.can_view_category(&physics()));
        assert_eq!(ctx.default_category(), None);
    }

    #[test]
    fn test_grant_on_ancestor_covers_descendants() {
        let ctx = RequestContext::restricted(UserId::new(3), "manager", vec![CategoryId::new(4)]);
        assert!(ctx.can_view_category(&physics()));

        let sibling = RequestContext::restricted(UserId::new(3), "manager", vec![CategoryId::new(5)]);
        assert!(!sibling.can_view_category(&physics()));
    }

    #[test]
    fn test_default_category_is_last_granted() {
        let ctx = RequestContext::restricted(
            UserId::new(3),
            "manager",
            vec![CategoryId::new(4), CategoryId::new(9)],
        );
        assert_eq!(ctx.default_category(), Some(CategoryId::new(9)));
    }
}
