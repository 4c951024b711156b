//! Course row model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use storestat_core::types::{CategoryId, CourseId};

/// A row of the `course` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Course {
    /// Course id.
    pub id: CourseId,
    /// Display name.
    pub fullname: String,
    /// Short name.
    pub shortname: String,
    /// Category holding the course. Zero for the site front page.
    pub category: CategoryId,
}
