//! # storestat-core
//!
//! Core crate for StoreStat. Contains configuration schemas, typed
//! identifiers, pagination and sorting types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other StoreStat crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
