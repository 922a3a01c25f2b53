//! Buddy pool over a linear address space
//!
//! Keeps the buddy tree of one address space `[0, capacity)` in a
//! [`StatusTable`] and implements allocation, deallocation with coalescing and
//! manual reservation on top of it. All walks over the tree are loops over
//! `(level, index)`; nothing recurses.

use crate::math::{checked_next_power_of_two, is_power_of_two, log_of_two};
use crate::{is_aligned, AllocError, AllocResult, IdAllocator};

#[cfg(feature = "log")]
use log::{debug, error, trace, warn};

use super::node_status::NodeStatus;
use super::status_table::{buddy_index, StatusTable};

#[cfg(feature = "tracking")]
use super::stats::{PoolStats, PoolStatsReporter};

/// Buddy allocator over the address space `[0, capacity)`.
///
/// Allocation sizes are powers of two and every block is aligned to its own
/// size. When `capacity` is not a power of two the tree covers the next power
/// of two and the tail `[capacity, rounded_capacity)` is reserved for good at
/// init time.
///
/// The pool is not synchronized; share it behind a lock if needed.
#[derive(Debug, Clone, Default)]
pub struct BuddyPool {
    table: StatusTable,
    capacity: usize,
    rounded_capacity: usize,
    /// Units covered by live allocations and reservations, padding excluded.
    used_units: usize,
}

impl BuddyPool {
    /// Create an empty pool (uninitialized, must call init())
    pub const fn new() -> Self {
        Self {
            table: StatusTable::empty(),
            capacity: 0,
            rounded_capacity: 0,
            used_units: 0,
        }
    }

    /// Create a pool managing `[0, capacity)`.
    pub fn with_capacity(capacity: usize) -> AllocResult<Self> {
        let mut pool = Self::new();
        pool.init(capacity)?;
        Ok(pool)
    }

    /// (Re)initialize the pool for `capacity` units, dropping all previous state.
    ///
    /// Fails with [`AllocError::InvalidParam`] if `capacity` is zero or cannot be
    /// rounded up to a power of two; the pool is left untouched in that case.
    pub fn init(&mut self, capacity: usize) -> AllocResult {
        if capacity == 0 {
            warn!("buddy pool: cannot init with zero capacity");
            return Err(AllocError::InvalidParam);
        }
        let rounded_capacity = checked_next_power_of_two(capacity).ok_or_else(|| {
            warn!("buddy pool: capacity {:#x} cannot be rounded up", capacity);
            AllocError::InvalidParam
        })?;
        let level_count = log_of_two(rounded_capacity) + 1;

        self.table = StatusTable::new(level_count);
        self.capacity = capacity;
        self.rounded_capacity = rounded_capacity;
        self.used_units = 0;
        self.reserve_padding();

        debug!(
            "buddy pool: init capacity={} rounded={} levels={}",
            capacity, rounded_capacity, level_count
        );
        Ok(())
    }

    /// Reserve `[capacity, rounded_capacity)` so it never takes part in allocation.
    fn reserve_padding(&mut self) {
        if is_power_of_two(self.capacity) {
            return;
        }
        let level_count = self.table.level_count();

        // Highest cell that starts exactly at `capacity`.
        let mut level = 0;
        let mut index = self.capacity;
        while index % 2 == 0 {
            level += 1;
            index /= 2;
        }
        self.table.set(level, index, NodeStatus::Used);
        level += 1;
        index /= 2;

        while level < level_count {
            self.table.set(level, index, NodeStatus::Split);
            // A left child below the root: its right sibling lies wholly in the padding.
            if index % 2 == 0 && level != level_count - 1 {
                self.table.set(level, index + 1, NodeStatus::Used);
            }
            level += 1;
            index /= 2;
        }
    }

    /// Number of units the pool was initialized with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `capacity` rounded up to a power of two, the size covered by the root block.
    pub fn rounded_capacity(&self) -> usize {
        self.rounded_capacity
    }

    pub fn level_count(&self) -> usize {
        self.table.level_count()
    }

    pub fn used_units(&self) -> usize {
        self.used_units
    }

    pub fn available_units(&self) -> usize {
        self.capacity - self.used_units
    }

    pub fn table(&self) -> &StatusTable {
        &self.table
    }

    /// Status of the cell `index` at `level`, `None` outside the table.
    pub fn status(&self, level: usize, index: usize) -> Option<NodeStatus> {
        self.table.try_get(level, index)
    }

    /// Allocate a block of `size` units and return its offset.
    ///
    /// `size` must be a power of two. The free block with the lowest address is
    /// returned. [`AllocError::NoMemory`] means no free block of that size
    /// exists right now.
    pub fn allocate(&mut self, size: usize) -> AllocResult<usize> {
        if !is_power_of_two(size) {
            return Err(AllocError::InvalidParam);
        }
        if self.table.is_empty() {
            return Err(AllocError::NoMemory);
        }
        if size > self.rounded_capacity {
            return Err(AllocError::InvalidParam);
        }

        let root = self.table.root_level();
        let target = log_of_two(size);
        let mut level = root;
        let mut index = 0;

        loop {
            let status = self.table.get(level, index);
            if level == target {
                if status == NodeStatus::Unused {
                    return Ok(self.claim(level, index));
                }
            } else if !status.is_exhausted() {
                if status == NodeStatus::Unused {
                    self.split(level, index);
                }
                // descend into the left child
                level -= 1;
                index *= 2;
                continue;
            }

            // Nothing here: try the right sibling, or back up to the nearest
            // ancestor that is a left child and try its right sibling.
            if index % 2 == 0 {
                if level == root {
                    return self.exhausted(size);
                }
                index += 1;
                continue;
            }
            loop {
                level += 1;
                if level >= root {
                    return self.exhausted(size);
                }
                index /= 2;
                if index % 2 == 0 {
                    index += 1;
                    break;
                }
            }
        }
    }

    /// Subdivide an `Unused` cell into two `Unused` children.
    fn split(&mut self, level: usize, index: usize) {
        self.table.set(level, index, NodeStatus::Split);
        self.table.set(level - 1, index * 2, NodeStatus::Unused);
        self.table.set(level - 1, index * 2 + 1, NodeStatus::Unused);
    }

    /// Mark an `Unused` cell as allocated, promote exhausted ancestors and
    /// return the block offset.
    fn claim(&mut self, level: usize, index: usize) -> usize {
        self.table.set(level, index, NodeStatus::Used);
        let size = 1usize << level;
        let address = index << level;
        self.used_units += size;

        let root = self.table.root_level();
        let mut level = level;
        let mut index = index;
        while level < root {
            if !self.table.get(level, buddy_index(index)).is_exhausted() {
                break;
            }
            self.table.set(level + 1, index / 2, NodeStatus::Full);
            level += 1;
            index /= 2;
        }

        trace!(
            "buddy pool: allocated [{:#x}, {:#x})",
            address,
            address + size
        );
        address
    }

    #[allow(unused_variables)]
    fn exhausted(&self, size: usize) -> AllocResult<usize> {
        debug!(
            "buddy pool: no free block of {} units (used {}/{})",
            size, self.used_units, self.capacity
        );
        #[cfg(feature = "tracking")]
        PoolStatsReporter::print_alloc_failure_stats(
            &self.stats(),
            self.rounded_capacity,
            size,
        );
        Err(AllocError::NoMemory)
    }

    /// Validate a `(address, size)` pair and map it to its cell.
    ///
    /// The range must lie within `capacity`, so the padding tail can never be
    /// freed or reserved.
    fn locate(&self, address: usize, size: usize) -> AllocResult<(usize, usize)> {
        if !is_power_of_two(size) || !is_aligned(address, size) {
            return Err(AllocError::InvalidParam);
        }
        let end = address.checked_add(size).ok_or(AllocError::InvalidParam)?;
        if end > self.capacity {
            return Err(AllocError::InvalidParam);
        }
        let level = log_of_two(size);
        Ok((level, address >> level))
    }

    /// Free the block of `size` units at `address`, merging free buddies upward.
    ///
    /// The block must have been returned by [`allocate`](Self::allocate) or
    /// reserved by [`mark_used`](Self::mark_used) with the same size.
    pub fn deallocate(&mut self, address: usize, size: usize) -> AllocResult {
        let (level, index) = self.locate(address, size)?;
        if self.table.get(level, index) != NodeStatus::Used {
            return Err(AllocError::NotAllocated);
        }
        let top = self.release_path(level, index)?;

        self.table.set(level, index, NodeStatus::Unused);
        let mut index = index;
        for ancestor in level + 1..=top {
            index /= 2;
            let next = match self.table.get(ancestor, index) {
                NodeStatus::Full => NodeStatus::Split,
                NodeStatus::Split => NodeStatus::Unused,
                other => other,
            };
            self.table.set(ancestor, index, next);
        }
        self.used_units -= size;

        trace!(
            "buddy pool: freed [{:#x}, {:#x})",
            address,
            address + size
        );
        Ok(())
    }

    /// Walk the ancestors a free of cell `(level, index)` would touch without
    /// modifying them, and return the highest level that changes.
    ///
    /// A `Full` ancestor turns `Split`; a `Split` ancestor whose children both
    /// end up `Unused` merges to `Unused`. A `Used` or `Unused` ancestor above
    /// a `Used` cell is impossible.
    fn release_path(&self, level: usize, index: usize) -> AllocResult<usize> {
        let root = self.table.root_level();
        let mut level = level;
        let mut index = index;
        // Whether the child we came from ends up `Unused`.
        let mut child_unused = true;

        while level < root {
            let child = index;
            level += 1;
            index /= 2;
            match self.table.get(level, index) {
                NodeStatus::Used | NodeStatus::Unused => {
                    error!(
                        "buddy pool: ancestor ({}, {}) of freed block is {:?}",
                        level,
                        index,
                        self.table.get(level, index)
                    );
                    return Err(AllocError::Corrupted);
                }
                NodeStatus::Full => child_unused = false,
                NodeStatus::Split => {
                    let sibling = self.table.get(level - 1, buddy_index(child));
                    if !(child_unused && sibling == NodeStatus::Unused) {
                        return Ok(level - 1);
                    }
                }
            }
        }
        Ok(level)
    }

    /// Reserve the block of `size` units at `address` so it is never allocated.
    ///
    /// The target cell must be `Unused`. Cells below the target are not
    /// looked at, so only reserve ranges with no finer allocations inside
    /// them (typically before any `allocate`). The reservation can be released
    /// with [`deallocate`](Self::deallocate).
    pub fn mark_used(&mut self, address: usize, size: usize) -> AllocResult {
        let (level, index) = self.locate(address, size)?;
        if self.table.get(level, index) != NodeStatus::Unused {
            return Err(AllocError::MemoryOverlap);
        }
        let top = self.reserve_path(level, index)?;

        self.table.set(level, index, NodeStatus::Used);
        let mut index = index;
        for ancestor in level + 1..=top {
            index /= 2;
            let next = match self.table.get(ancestor, index) {
                NodeStatus::Unused => NodeStatus::Split,
                NodeStatus::Split => NodeStatus::Full,
                other => other,
            };
            self.table.set(ancestor, index, next);
        }
        self.used_units += size;

        trace!(
            "buddy pool: reserved [{:#x}, {:#x})",
            address,
            address + size
        );
        Ok(())
    }

    /// Walk the ancestors a reservation of cell `(level, index)` would touch
    /// without modifying them, and return the highest level that changes.
    ///
    /// An `Unused` ancestor turns `Split`; a `Split` ancestor whose children
    /// both end up `Used` or `Full` turns `Full`.
    fn reserve_path(&self, level: usize, index: usize) -> AllocResult<usize> {
        let root = self.table.root_level();
        let mut level = level;
        let mut index = index;
        // Whether the child we came from ends up `Used` or `Full`.
        let mut child_exhausted = true;

        while level < root {
            let child = index;
            level += 1;
            index /= 2;
            match self.table.get(level, index) {
                // the target lies inside a live block
                NodeStatus::Used => return Err(AllocError::MemoryOverlap),
                NodeStatus::Full => {
                    error!(
                        "buddy pool: ancestor ({}, {}) of an unused block is full",
                        level, index
                    );
                    return Err(AllocError::Corrupted);
                }
                NodeStatus::Unused => child_exhausted = false,
                NodeStatus::Split => {
                    let sibling = self.table.get(level - 1, buddy_index(child));
                    if !(child_exhausted && sibling.is_exhausted()) {
                        return Ok(level - 1);
                    }
                }
            }
        }
        Ok(level)
    }

    /// Whether `unit` lies inside a live allocation or reservation.
    ///
    /// Units outside `[0, capacity)` are never allocated.
    pub fn is_unit_allocated(&self, unit: usize) -> bool {
        if unit >= self.capacity {
            return false;
        }
        let mut level = self.table.root_level();
        loop {
            match self.table.get(level, unit >> level) {
                NodeStatus::Used | NodeStatus::Full => return true,
                NodeStatus::Split if level > 0 => level -= 1,
                _ => return false,
            }
        }
    }

    /// Size of the largest block `allocate` could return right now, 0 if none.
    pub fn largest_free_block(&self) -> usize {
        let mut largest = 0;
        self.table.for_each_live_cell(|level, _, status| {
            if status == NodeStatus::Unused {
                largest = largest.max(1usize << level);
            }
        });
        largest
    }

    #[cfg(feature = "tracking")]
    pub fn stats(&self) -> PoolStats {
        PoolStats::collect(&self.table, self.capacity, self.used_units)
    }
}

impl IdAllocator for BuddyPool {
    /// `count` must be a power of two. Blocks are aligned to their own size,
    /// so `alignment` may be 0, 1 or a power of two up to `count`.
    fn alloc_id(&mut self, count: usize, alignment: usize) -> AllocResult<usize> {
        if alignment > 1 && (!is_power_of_two(alignment) || alignment > count) {
            return Err(AllocError::InvalidParam);
        }
        self.allocate(count)
    }

    fn dealloc_id(&mut self, start_id: usize, count: usize) {
        if let Err(_e) = self.deallocate(start_id, count) {
            warn!(
                "buddy pool: dealloc_id [{:#x}, +{}) rejected: {}",
                start_id, count, _e
            );
        }
    }

    fn is_allocated(&self, id: usize) -> bool {
        self.is_unit_allocated(id)
    }

    fn alloc_fixed_id(&mut self, id: usize) -> AllocResult {
        self.mark_used(id, 1)
    }

    fn size(&self) -> usize {
        self.capacity
    }

    fn used(&self) -> usize {
        self.used_units
    }

    fn available(&self) -> usize {
        self.available_units()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn live_cells(pool: &BuddyPool) -> Vec<(usize, usize, NodeStatus)> {
        let mut cells = Vec::new();
        pool.table().for_each_live_cell(|level, index, status| {
            cells.push((level, index, status));
        });
        cells
    }

    #[test]
    fn test_init_power_of_two() {
        let pool = BuddyPool::with_capacity(8).unwrap();
        assert_eq!(pool.capacity(), 8);
        assert_eq!(pool.rounded_capacity(), 8);
        assert_eq!(pool.level_count(), 4);
        assert_eq!(live_cells(&pool), alloc::vec![(3, 0, NodeStatus::Unused)]);
    }

    #[test]
    fn test_init_rejects_bad_capacity() {
        let mut pool = BuddyPool::new();
        assert_eq!(pool.init(0), Err(AllocError::InvalidParam));
        assert_eq!(pool.init(usize::MAX), Err(AllocError::InvalidParam));
        assert_eq!(pool.level_count(), 0);
    }

    #[test]
    fn test_padding_layout_odd_capacity() {
        // 3 of 4 units: unit 3 is padding
        let pool = BuddyPool::with_capacity(3).unwrap();
        assert_eq!(pool.status(2, 0), Some(NodeStatus::Split));
        assert_eq!(pool.status(1, 0), Some(NodeStatus::Unused));
        assert_eq!(pool.status(1, 1), Some(NodeStatus::Split));
        assert_eq!(pool.status(0, 2), Some(NodeStatus::Unused));
        assert_eq!(pool.status(0, 3), Some(NodeStatus::Used));
    }

    #[test]
    fn test_padding_layout_even_capacity() {
        // 6 of 8 units: [6, 8) is one padding block at level 1
        let pool = BuddyPool::with_capacity(6).unwrap();
        assert_eq!(pool.status(3, 0), Some(NodeStatus::Split));
        assert_eq!(pool.status(2, 0), Some(NodeStatus::Unused));
        assert_eq!(pool.status(2, 1), Some(NodeStatus::Split));
        assert_eq!(pool.status(1, 2), Some(NodeStatus::Unused));
        assert_eq!(pool.status(1, 3), Some(NodeStatus::Used));
    }

    #[test]
    fn test_padding_layout_left_child_siblings() {
        // 513 of 1024: unit 513 and every right sibling on the way up are padding
        let pool = BuddyPool::with_capacity(513).unwrap();
        assert_eq!(pool.status(0, 512), Some(NodeStatus::Unused));
        assert_eq!(pool.status(0, 513), Some(NodeStatus::Used));
        assert_eq!(pool.status(1, 256), Some(NodeStatus::Split));
        assert_eq!(pool.status(1, 257), Some(NodeStatus::Used));
        assert_eq!(pool.status(8, 2), Some(NodeStatus::Split));
        assert_eq!(pool.status(8, 3), Some(NodeStatus::Used));
        assert_eq!(pool.status(9, 0), Some(NodeStatus::Unused));
        assert_eq!(pool.status(9, 1), Some(NodeStatus::Split));
        assert_eq!(pool.status(10, 0), Some(NodeStatus::Split));
        assert_eq!(pool.used_units(), 0);
        assert_eq!(pool.available_units(), 513);
    }

    #[test]
    fn test_allocate_uninitialized() {
        let mut pool = BuddyPool::new();
        assert_eq!(pool.allocate(1), Err(AllocError::NoMemory));
        assert_eq!(pool.deallocate(0, 1), Err(AllocError::InvalidParam));
        assert_eq!(pool.mark_used(0, 1), Err(AllocError::InvalidParam));
        assert!(!pool.is_unit_allocated(0));
    }

    #[test]
    fn test_allocate_invalid_size() {
        let mut pool = BuddyPool::with_capacity(16).unwrap();
        assert_eq!(pool.allocate(0), Err(AllocError::InvalidParam));
        assert_eq!(pool.allocate(3), Err(AllocError::InvalidParam));
        assert_eq!(pool.allocate(32), Err(AllocError::InvalidParam));
        assert_eq!(pool.used_units(), 0);
    }

    #[test]
    fn test_allocate_first_fit() {
        let mut pool = BuddyPool::with_capacity(16).unwrap();
        assert_eq!(pool.allocate(1), Ok(0));
        assert_eq!(pool.allocate(4), Ok(4));
        assert_eq!(pool.allocate(2), Ok(2));
        assert_eq!(pool.allocate(1), Ok(1));
        assert_eq!(pool.allocate(8), Ok(8));
        assert_eq!(pool.allocate(1), Err(AllocError::NoMemory));
        assert_eq!(pool.used_units(), 16);
        assert_eq!(pool.status(4, 0), Some(NodeStatus::Full));

        pool.deallocate(2, 2).unwrap();
        assert_eq!(pool.status(4, 0), Some(NodeStatus::Split));
        assert_eq!(pool.allocate(1), Ok(2));
        assert_eq!(pool.allocate(1), Ok(3));
        assert_eq!(pool.status(4, 0), Some(NodeStatus::Full));
    }

    #[test]
    fn test_deallocate_merges_to_root() {
        let mut pool = BuddyPool::with_capacity(8).unwrap();
        let blocks: Vec<usize> = (0..8).map(|_| pool.allocate(1).unwrap()).collect();
        for address in blocks {
            pool.deallocate(address, 1).unwrap();
        }
        assert_eq!(live_cells(&pool), alloc::vec![(3, 0, NodeStatus::Unused)]);
        assert_eq!(pool.largest_free_block(), 8);
    }

    #[test]
    fn test_deallocate_rejects_bad_ranges() {
        let mut pool = BuddyPool::with_capacity(7).unwrap();
        let address = pool.allocate(2).unwrap();
        let before = pool.table().clone();

        assert_eq!(pool.deallocate(address, 3), Err(AllocError::InvalidParam));
        assert_eq!(pool.deallocate(1, 2), Err(AllocError::InvalidParam));
        assert_eq!(pool.deallocate(address, 1), Err(AllocError::NotAllocated));
        assert_eq!(pool.deallocate(address, 4), Err(AllocError::NotAllocated));
        // unit 7 is padding
        assert_eq!(pool.deallocate(7, 1), Err(AllocError::InvalidParam));
        assert_eq!(
            pool.deallocate(usize::MAX - 1, 2),
            Err(AllocError::InvalidParam)
        );
        assert_eq!(pool.table(), &before);
        assert_eq!(pool.used_units(), 2);
    }

    #[test]
    fn test_mark_used_repairs_ancestors() {
        let mut pool = BuddyPool::with_capacity(4).unwrap();
        pool.mark_used(0, 1).unwrap();
        assert_eq!(pool.status(1, 0), Some(NodeStatus::Split));
        assert_eq!(pool.status(2, 0), Some(NodeStatus::Split));

        pool.mark_used(1, 1).unwrap();
        assert_eq!(pool.status(1, 0), Some(NodeStatus::Full));
        assert_eq!(pool.status(2, 0), Some(NodeStatus::Split));

        pool.mark_used(2, 2).unwrap();
        assert_eq!(pool.status(2, 0), Some(NodeStatus::Full));
        assert_eq!(pool.allocate(1), Err(AllocError::NoMemory));
        assert_eq!(pool.used_units(), 4);
    }

    #[test]
    fn test_mark_used_conflicts_leave_state_unchanged() {
        let mut pool = BuddyPool::with_capacity(6).unwrap();
        let address = pool.allocate(2).unwrap();
        let before = pool.table().clone();

        // already allocated
        assert_eq!(pool.mark_used(address, 2), Err(AllocError::MemoryOverlap));
        // inside an allocated block
        assert_eq!(
            pool.mark_used(address + 1, 1),
            Err(AllocError::MemoryOverlap)
        );
        // covers a split block
        assert_eq!(pool.mark_used(0, 4), Err(AllocError::MemoryOverlap));
        // padding
        assert_eq!(pool.mark_used(6, 2), Err(AllocError::InvalidParam));
        assert_eq!(pool.mark_used(3, 2), Err(AllocError::InvalidParam));
        assert_eq!(pool.table(), &before);
        assert_eq!(pool.used_units(), 2);
    }

    #[test]
    fn test_reservation_can_be_released() {
        let mut pool = BuddyPool::with_capacity(8).unwrap();
        pool.mark_used(4, 4).unwrap();
        assert_eq!(pool.allocate(8), Err(AllocError::NoMemory));
        pool.deallocate(4, 4).unwrap();
        assert_eq!(pool.allocate(8), Ok(0));
    }

    #[test]
    fn test_corrupted_ancestor_detected() {
        let mut pool = BuddyPool::with_capacity(4).unwrap();
        pool.allocate(1).unwrap();
        // pretend the parent of the allocated unit was never split
        pool.table.set(1, 0, NodeStatus::Unused);
        let before = pool.table().clone();
        assert_eq!(pool.deallocate(0, 1), Err(AllocError::Corrupted));
        assert_eq!(pool.table(), &before);
    }

    #[test]
    fn test_corrupted_ancestor_detected_on_reserve() {
        let mut pool = BuddyPool::with_capacity(4).unwrap();
        // a full parent above a unit that is still unused
        pool.table.set(2, 0, NodeStatus::Split);
        pool.table.set(1, 0, NodeStatus::Full);
        let before = pool.table().clone();
        assert_eq!(pool.mark_used(0, 1), Err(AllocError::Corrupted));
        assert_eq!(pool.table(), &before);
        assert_eq!(pool.used_units(), 0);
    }

    #[test]
    fn test_is_unit_allocated() {
        let mut pool = BuddyPool::with_capacity(5).unwrap();
        pool.allocate(2).unwrap();
        pool.mark_used(4, 1).unwrap();
        assert!(pool.is_unit_allocated(0));
        assert!(pool.is_unit_allocated(1));
        assert!(!pool.is_unit_allocated(2));
        assert!(!pool.is_unit_allocated(3));
        assert!(pool.is_unit_allocated(4));
        // padding is not an allocation
        assert!(!pool.is_unit_allocated(5));
        assert!(!pool.is_unit_allocated(100));
    }

    #[test]
    fn test_largest_free_block() {
        let mut pool = BuddyPool::with_capacity(12).unwrap();
        assert_eq!(pool.largest_free_block(), 8);
        pool.allocate(1).unwrap();
        assert_eq!(pool.largest_free_block(), 4);
        pool.allocate(4).unwrap();
        pool.allocate(4).unwrap();
        assert_eq!(pool.largest_free_block(), 2);
    }

    #[test]
    fn test_id_allocator() {
        let mut pool = BuddyPool::with_capacity(10).unwrap();
        assert_eq!(pool.size(), 10);
        assert_eq!(pool.alloc_fixed_id(0), Ok(()));
        assert_eq!(pool.alloc_fixed_id(0), Err(AllocError::MemoryOverlap));
        assert_eq!(pool.alloc_id(4, 4), Ok(4));
        assert_eq!(pool.alloc_id(2, 8), Err(AllocError::InvalidParam));
        assert_eq!(pool.alloc_id(2, 3), Err(AllocError::InvalidParam));
        assert_eq!(pool.alloc_id(2, 0), Ok(2));
        assert!(pool.is_allocated(5));
        assert_eq!(pool.used(), 7);
        assert_eq!(pool.available(), 3);

        pool.dealloc_id(4, 4);
        // rejected, nothing changes
        pool.dealloc_id(4, 4);
        assert!(!pool.is_allocated(5));
        assert_eq!(pool.used(), 3);
    }

    #[cfg(feature = "tracking")]
    #[test]
    fn test_stats() {
        let mut pool = BuddyPool::with_capacity(6).unwrap();
        pool.allocate(1).unwrap();
        let stats = pool.stats();
        assert_eq!(stats.total_units, 6);
        assert_eq!(stats.used_units, 1);
        assert_eq!(stats.free_units, 5);
        assert_eq!(stats.free_blocks_by_level, alloc::vec![1, 2, 0, 0]);
    }
}
