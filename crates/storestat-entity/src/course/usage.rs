//! Per-course usage subtotal row.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use storestat_core::types::CourseId;

/// Summed course-level and module-level file sizes of one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CourseUsageRow {
    /// Course id.
    pub course_id: CourseId,
    /// Course display name.
    pub course_name: String,
    /// Total bytes attributed to the course.
    pub size_bytes: i64,
}
