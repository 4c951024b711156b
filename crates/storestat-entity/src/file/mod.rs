//! File entities and listing rows.

pub mod model;
pub mod row;

pub use model::{DIRECTORY_MARKER, FileRecord};
pub use row::{CourseFileRow, FileOrigin};
