//! Course, course-module and per-course usage entities.

pub mod model;
pub mod module;
pub mod usage;

pub use model::Course;
pub use module::{CourseModule, ModuleType};
pub use usage::CourseUsageRow;
