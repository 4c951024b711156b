//! Context entities.

pub mod level;
pub mod model;

pub use level::{ContextLevel, UnknownContextLevel};
pub use model::ContextRecord;
