//! Stored file row model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use storestat_core::types::{ContextId, FileId};

/// File name of the placeholder row the platform stores for every directory.
pub const DIRECTORY_MARKER: &str = ".";

/// A row of the `files` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileRecord {
    /// File id.
    pub id: FileId,
    /// Context owning the file.
    pub contextid: ContextId,
    /// Subsystem owning the file (`mod_resource`, `course`, `user`, ...).
    pub component: String,
    /// Bucket inside the component (`content`, `overviewfiles`, ...).
    pub filearea: String,
    /// Component-specific item id.
    pub itemid: i64,
    /// Directory path, always starting and ending with `/`.
    pub filepath: String,
    /// File name, or `.` for a directory placeholder.
    pub filename: String,
    /// Size of the file content in bytes.
    pub filesize: i64,
}

impl FileRecord {
    /// Whether this row is a directory placeholder rather than real content.
    pub fn is_directory(&self) -> bool {
        self.filename == DIRECTORY_MARKER
    }
}
