//! Statistics and debugging for the buddy pool
//!
//! Provides usage statistics and failure reporting.

use alloc::vec::Vec;

use super::node_status::NodeStatus;
use super::status_table::StatusTable;

/// Buddy pool statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub total_units: usize,
    pub used_units: usize,
    pub free_units: usize,
    /// Number of free blocks at each level, index = level.
    pub free_blocks_by_level: Vec<usize>,
}

impl PoolStats {
    pub const fn new() -> Self {
        Self {
            total_units: 0,
            used_units: 0,
            free_units: 0,
            free_blocks_by_level: Vec::new(),
        }
    }

    /// Collect statistics from the live cells of a table.
    pub fn collect(table: &StatusTable, capacity: usize, used_units: usize) -> Self {
        let mut free_blocks_by_level = alloc::vec![0; table.level_count()];
        let mut free_units = 0;
        table.for_each_live_cell(|level, _, status| {
            if status == NodeStatus::Unused {
                free_blocks_by_level[level] += 1;
                free_units += 1usize << level;
            }
        });
        Self {
            total_units: capacity,
            used_units,
            free_units,
            free_blocks_by_level,
        }
    }

    /// Add statistics from another PoolStats
    pub fn add(&mut self, other: &PoolStats) {
        self.total_units += other.total_units;
        self.used_units += other.used_units;
        self.free_units += other.free_units;
        if self.free_blocks_by_level.len() < other.free_blocks_by_level.len() {
            self.free_blocks_by_level
                .resize(other.free_blocks_by_level.len(), 0);
        }
        for (i, &count) in other.free_blocks_by_level.iter().enumerate() {
            self.free_blocks_by_level[i] += count;
        }
    }
}

/// Detailed pool statistics reporter
pub struct PoolStatsReporter;

impl PoolStatsReporter {
    /// Print detailed allocation failure statistics
    #[allow(unused_variables)]
    pub fn print_alloc_failure_stats(
        stats: &PoolStats,
        rounded_capacity: usize,
        request_size: usize,
    ) {
        #[cfg(feature = "log")]
        use log::error;
        error!("========================================");
        error!("Request: {} units", request_size);
        error!("Pool State:");
        error!(
            "  Capacity: {} units (rounded to {})",
            stats.total_units, rounded_capacity
        );
        error!("  Free units: {}", stats.free_units);
        error!("  Used units: {}", stats.used_units);
        error!("  Free blocks by level:");
        for (level, &count) in stats.free_blocks_by_level.iter().enumerate().rev() {
            if count > 0 {
                error!(
                    "    Level {}: {} blocks ({} units each)",
                    level,
                    count,
                    1usize << level
                );
            }
        }
        error!("========================================");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_fresh_table() {
        let table = StatusTable::new(4);
        let stats = PoolStats::collect(&table, 8, 0);
        assert_eq!(stats.total_units, 8);
        assert_eq!(stats.free_units, 8);
        assert_eq!(stats.free_blocks_by_level, alloc::vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_add() {
        let mut total = PoolStats::new();
        let table = StatusTable::new(2);
        total.add(&PoolStats::collect(&table, 2, 0));
        total.add(&PoolStats::collect(&table, 2, 0));
        assert_eq!(total.total_units, 4);
        assert_eq!(total.free_units, 4);
        assert_eq!(total.free_blocks_by_level, alloc::vec![0, 2]);
    }
}
