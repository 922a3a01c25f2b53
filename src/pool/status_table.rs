//! Flat per-level status table
//!
//! The buddy tree is stored as one status array per level instead of a
//! pointer tree. Level 0 holds one cell per unit, the last level holds the
//! single root cell. Children of cell `i` at level `l` are cells `2i` and
//! `2i + 1` at level `l - 1`, its parent is cell `i / 2` at level `l + 1`.

use alloc::vec;
use alloc::vec::Vec;

use super::node_status::NodeStatus;

/// Index of the other child under the same parent.
#[inline]
pub const fn buddy_index(index: usize) -> usize {
    4 * (index / 2) + 1 - index
}

/// Per-level cell statuses of one buddy tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTable {
    levels: Vec<Vec<NodeStatus>>,
}

impl StatusTable {
    /// Create a table with no levels.
    pub const fn empty() -> Self {
        Self { levels: Vec::new() }
    }

    /// Create a table of `level_count` levels with every cell `Unused`.
    pub fn new(level_count: usize) -> Self {
        let levels = (0..level_count)
            .map(|level| {
                let cells = 1usize << (level_count - level - 1);
                vec![NodeStatus::Unused; cells]
            })
            .collect();
        Self { levels }
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level of the root cell.
    ///
    /// Must not be called on an empty table.
    #[inline]
    pub fn root_level(&self) -> usize {
        self.levels.len() - 1
    }

    /// Number of cells at `level`, 0 if the level does not exist.
    pub fn cells_at(&self, level: usize) -> usize {
        self.levels.get(level).map_or(0, Vec::len)
    }

    /// Status of a cell, `None` if it is outside the table.
    pub fn try_get(&self, level: usize, index: usize) -> Option<NodeStatus> {
        self.levels.get(level)?.get(index).copied()
    }

    #[inline]
    pub(crate) fn get(&self, level: usize, index: usize) -> NodeStatus {
        self.levels[level][index]
    }

    #[inline]
    pub(crate) fn set(&mut self, level: usize, index: usize, status: NodeStatus) {
        self.levels[level][index] = status;
    }

    /// Visit every cell that is part of the current tree.
    ///
    /// Cells under an `Unused` or `Used` ancestor keep whatever status they had
    /// when that ancestor was last merged or claimed; they are skipped here.
    /// Cells are visited level by level from the root down, by address within a level.
    pub fn for_each_live_cell<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize, NodeStatus),
    {
        if self.levels.is_empty() {
            return;
        }
        let mut live = vec![true];
        for level in (0..self.levels.len()).rev() {
            let cells = &self.levels[level];
            for (index, &status) in cells.iter().enumerate() {
                if live[index] {
                    f(level, index, status);
                }
            }
            if level == 0 {
                break;
            }
            live = (0..cells.len() * 2)
                .map(|child| live[child / 2] && cells[child / 2].is_subdivided())
                .collect();
        }
    }
}
