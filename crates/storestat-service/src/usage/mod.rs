//! Usage aggregation and the access checks guarding it.

pub mod access;
pub mod aggregator;

pub use access::AccessPolicy;
pub use aggregator::UsageAggregator;
