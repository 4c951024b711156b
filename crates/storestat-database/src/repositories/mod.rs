//! PostgreSQL implementations of the collaborator traits.

pub mod category;
pub mod usage;

pub use category::CategoryRepository;
pub use usage::UsageRepository;
