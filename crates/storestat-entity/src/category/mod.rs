//! Course category entities.

pub mod model;

pub use model::Category;
