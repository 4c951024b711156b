//! Course-module and module type row models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use storestat_core::types::{CourseId, CourseModuleId, ModuleId};

/// A row of the `course_modules` table: an activity placed in a course.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CourseModule {
    /// Course-module id.
    pub id: CourseModuleId,
    /// Course the activity lives in.
    pub course: CourseId,
    /// Module type of the activity.
    pub module: ModuleId,
}

/// A row of the `modules` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ModuleType {
    /// Module type id.
    pub id: ModuleId,
    /// Plugin name, used in `/mod/<name>/view.php` links.
    pub name: String,
}
