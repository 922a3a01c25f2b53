//! Buddy pool module
//!
//! This module provides the buddy tree allocator with:
//! - A flat per-level status table instead of a pointer tree
//! - First-fit allocation, coalescing deallocation and manual reservation
//! - Usage statistics and failure reports (feature `tracking`)

pub mod buddy_pool;
pub mod node_status;
#[cfg(feature = "tracking")]
pub mod stats;
pub mod status_table;

pub use buddy_pool::BuddyPool;
pub use node_status::NodeStatus;
#[cfg(feature = "tracking")]
pub use stats::{PoolStats, PoolStatsReporter};
pub use status_table::StatusTable;
