//! # storestat-service
//!
//! Usage aggregation and report services for StoreStat. The aggregator
//! answers storage questions for a scope; the report service composes its
//! figures into the views a caller renders.
//!
//! Services follow constructor injection: the database collaborators are
//! provided at construction time as `Arc<dyn ...>` trait objects, and the
//! caller's authorization result travels as an explicit [`RequestContext`].

pub mod context;
pub mod report;
pub mod usage;

pub use context::RequestContext;
pub use report::{LinkBuilder, UsageReportService};
pub use usage::{AccessPolicy, UsageAggregator};
