//! # storestat-entity
//!
//! Models of the learning platform tables StoreStat reads. Nothing in this
//! crate is ever written back: the platform owns the schema and the data.
//! Row structs derive `sqlx::FromRow` so repositories can map query results
//! onto fixed shapes instead of loosely typed records.

pub mod category;
pub mod context;
pub mod course;
pub mod file;
pub mod size;

pub use category::Category;
pub use context::{ContextLevel, ContextRecord};
pub use course::{Course, CourseModule, CourseUsageRow, ModuleType};
pub use file::{CourseFileRow, FileOrigin, FileRecord};
pub use size::{SizeUnit, format_size};
