//! Buddy cell status
//!
//! Every cell of the status table represents one block of the buddy tree and
//! holds exactly one of these four states.

/// Status of one block in the buddy tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum NodeStatus {
    /// Free and not subdivided.
    #[default]
    Unused = 0,
    /// Allocated (or reserved) as a single block at this level.
    Used = 1,
    /// Subdivided, at least one free block exists somewhere beneath.
    Split = 2,
    /// Subdivided, and both children are `Used` or `Full`.
    Full = 3,
}

impl NodeStatus {
    /// Whether no free block exists anywhere in this cell's range.
    #[inline]
    pub const fn is_exhausted(self) -> bool {
        matches!(self, Self::Used | Self::Full)
    }

    /// Whether the cell has live children in the table.
    #[inline]
    pub const fn is_subdivided(self) -> bool {
        matches!(self, Self::Split | Self::Full)
    }
}
