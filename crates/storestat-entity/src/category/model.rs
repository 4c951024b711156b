//! Course category row model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use storestat_core::types::CategoryId;

/// A row of the `course_categories` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Category id.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Parent category, zero for top-level categories.
    pub parent: CategoryId,
    /// Materialised path of ids from the root, e.g. `/1/4/7`.
    pub path: String,
}

impl Category {
    /// Ids on the path from the root down to and including this category.
    pub fn lineage(&self) -> Vec<CategoryId> {
        self.path
            .split('/')
            .filter_map(|segment| segment.parse::<i64>().ok())
            .map(CategoryId::new)
            .collect()
    }

    /// Whether `ancestor` is this category or one of its ancestors.
    pub fn is_within(&self, ancestor: CategoryId) -> bool {
        self.id == ancestor || self.lineage().contains(&ancestor)
    }

    /// Path pattern matching every descendant category.
    pub fn descendant_pattern(id: CategoryId) -> String {
        format!("%/{id}/%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, parent: i64, path: &str) -> Category {
        Category {
            id: CategoryId::new(id),
            name: format!("Category {id}"),
            parent: CategoryId::new(parent),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_lineage_parses_path() {
        let cat = category(7, 4, "/1/4/7");
        assert_eq!(
            cat.lineage(),
            vec![CategoryId::new(1), CategoryId::new(4), CategoryId::new(7)]
        );
    }

    #[test]
    fn test_is_within() {
        let cat = category(7, 4, "/1/4/7");
        assert!(cat.is_within(CategoryId::new(7)));
        assert!(cat.is_within(CategoryId::new(1)));
        assert!(!cat.is_within(CategoryId::new(14)));
    }

    #[test]
    fn test_descendant_pattern() {
        let pattern = Category::descendant_pattern(CategoryId::new(4));
        assert_eq!(pattern, "%/4/%");
    }
}
