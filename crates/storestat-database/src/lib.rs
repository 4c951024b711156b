//! # storestat-database
//!
//! Read-only access to the learning platform database: the collaborator
//! traits the usage aggregator depends on, their PostgreSQL implementations,
//! and an in-memory catalog with the same semantics.

pub mod connection;
pub mod memory;
pub mod query;
pub mod repositories;
pub mod source;

pub use connection::DatabasePool;
pub use memory::MemoryCatalog;
pub use source::{CategoryTree, UsageSource};
