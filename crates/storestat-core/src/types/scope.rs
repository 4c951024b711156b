//! Scope types describing which courses a usage figure covers.

use serde::{Deserialize, Serialize};

use super::id::{CategoryId, CourseId};

/// Course restriction applied to an aggregation query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "courses", rename_all = "lowercase")]
pub enum CourseFilter {
    /// Every course on the platform.
    All,
    /// Only the listed courses. An empty list matches nothing.
    Only(Vec<CourseId>),
}

impl CourseFilter {
    /// Filter for a single course.
    pub fn course(id: CourseId) -> Self {
        Self::Only(vec![id])
    }

    /// Whether `course` passes the filter.
    pub fn includes(&self, course: CourseId) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => ids.contains(&course),
        }
    }

    /// Whether the filter restricts the course set.
    pub fn is_restricted(&self) -> bool {
        matches!(self, Self::Only(_))
    }

    /// Raw course keys for array binding; `None` when unrestricted.
    pub fn raw_ids(&self) -> Option<Vec<i64>> {
        match self {
            Self::All => None,
            Self::Only(ids) => Some(ids.iter().map(|id| id.get()).collect()),
        }
    }
}

/// The scope a report was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "lowercase")]
pub enum UsageScope {
    /// Whole platform, no category filter.
    System,
    /// A category and all of its descendants.
    Category {
        /// The selected category.
        category_id: CategoryId,
    },
    /// A single course, optionally reached through a category.
    Course {
        /// Category the course was reached from, if any.
        category_id: Option<CategoryId>,
        /// The selected course.
        course_id: CourseId,
    },
}

impl UsageScope {
    /// Resolve the scope from optional request parameters.
    ///
    /// Zero-valued ids are treated as "not selected".
    pub fn from_params(category_id: Option<CategoryId>, course_id: Option<CourseId>) -> Self {
        let category_id = CategoryId::selected(category_id);
        match (category_id, CourseId::selected(course_id)) {
            (category_id, Some(course_id)) => Self::Course {
                category_id,
                course_id,
            },
            (Some(category_id), None) => Self::Category { category_id },
            (None, None) => Self::System,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_only_filter_matches_nothing() {
        let filter = CourseFilter::Only(Vec::new());
        assert!(!filter.includes(CourseId::new(1)));
        assert_eq!(filter.raw_ids(), Some(Vec::new()));
    }

    #[test]
    fn test_all_filter_has_no_ids() {
        assert!(CourseFilter::All.includes(CourseId::new(99)));
        assert_eq!(CourseFilter::All.raw_ids(), None);
        assert!(!CourseFilter::All.is_restricted());
    }

    #[test]
    fn test_scope_from_params() {
        assert_eq!(UsageScope::from_params(None, None), UsageScope::System);
        assert_eq!(
            UsageScope::from_params(Some(CategoryId::new(0)), Some(CourseId::new(0))),
            UsageScope::System
        );
        assert_eq!(
            UsageScope::from_params(Some(CategoryId::new(4)), None),
            UsageScope::Category {
                category_id: CategoryId::new(4)
            }
        );
        assert_eq!(
            UsageScope::from_params(Some(CategoryId::new(4)), Some(CourseId::new(9))),
            UsageScope::Course {
                category_id: Some(CategoryId::new(4)),
                course_id: CourseId::new(9)
            }
        );
    }
}
