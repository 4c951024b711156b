//! Core type definitions used across the StoreStat workspace.

pub mod id;
pub mod pagination;
pub mod scope;
pub mod sorting;

pub use id::*;
pub use pagination::{CountedRows, PageRequest, PageResponse};
pub use scope::{CourseFilter, UsageScope};
pub use sorting::{SortDirection, SortField};
