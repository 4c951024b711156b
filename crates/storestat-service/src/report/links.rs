//! Deep links back into the learning platform.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use storestat_core::types::{CourseId, CourseModuleId};
use storestat_entity::CourseFileRow;

/// Characters escaped in file URLs: everything except unreserved characters
/// and the path separator.
const FILE_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Builds absolute URLs under the platform's web root.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base_url: String,
}

impl LinkBuilder {
    /// Creates a link builder for the given web root.
    pub fn new(wwwroot: &str) -> Self {
        Self {
            base_url: wwwroot.trim_end_matches('/').to_string(),
        }
    }

    /// Download URL of a stored file.
    pub fn pluginfile(&self, row: &CourseFileRow) -> String {
        let path = format!(
            "/{}/{}/{}/{}{}{}",
            row.context_id,
            row.component,
            row.filearea,
            row.itemid,
            normalize_dir(&row.filepath),
            row.filename
        );
        format!(
            "{}/pluginfile.php{}",
            self.base_url,
            utf8_percent_encode(&path, FILE_PATH)
        )
    }

    /// View page of an activity.
    pub fn activity(&self, course_module: CourseModuleId, module_name: &str) -> String {
        format!(
            "{}/mod/{}/view.php?id={}",
            self.base_url,
            utf8_percent_encode(module_name, NON_ALPHANUMERIC),
            course_module
        )
    }

    /// View page of a course.
    pub fn course(&self, course: CourseId) -> String {
        format!("{}/course/view.php?id={}", self.base_url, course)
    }
}

/// Directory path wrapped in exactly one leading and trailing slash.
fn normalize_dir(filepath: &str) -> String {
    let trimmed = filepath.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}
