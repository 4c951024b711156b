//! File listing row returned by the course drill-down.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use storestat_core::types::{ContextId, CourseId, CourseModuleId, FileId};

/// Where a listed file is attached inside its course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOrigin {
    /// Attached to the course itself (summary files, overview images, ...).
    Course,
    /// Attached to an activity or resource in the course.
    Module,
}

impl std::fmt::Display for FileOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Course => write!(f, "course"),
            Self::Module => write!(f, "module"),
        }
    }
}

/// One file of the combined course-level and module-level listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CourseFileRow {
    /// File id.
    pub file_id: FileId,
    /// Course the file is attributed to.
    pub course_id: CourseId,
    /// Context owning the file.
    pub context_id: ContextId,
    /// Owning component.
    pub component: String,
    /// File area within the component.
    pub filearea: String,
    /// Component-specific item id.
    pub itemid: i64,
    /// Directory path.
    pub filepath: String,
    /// File name.
    pub filename: String,
    /// Size in bytes.
    pub filesize: i64,
    /// Course-module the file belongs to, for module-level files.
    pub course_module_id: Option<CourseModuleId>,
    /// Module type name (`resource`, `assign`, ...), for module-level files.
    pub module_name: Option<String>,
}

impl CourseFileRow {
    /// Whether the file hangs off the course or one of its modules.
    pub fn origin(&self) -> FileOrigin {
        if self.course_module_id.is_some() {
            FileOrigin::Module
        } else {
            FileOrigin::Course
        }
    }

    /// Course-module id and module name, when both are known.
    pub fn activity(&self) -> Option<(CourseModuleId, &str)> {
        match (self.course_module_id, self.module_name.as_deref()) {
            (Some(cmid), Some(name)) if !name.is_empty() => Some((cmid, name)),
            _ => None,
        }
    }
}
