//! Buddy Range Allocator
//!
//! This crate implements a buddy-system allocator over a fixed-size, integer
//! indexed address space (a byte range, a block-device extent, an ID pool),
//! featuring:
//! - Power-of-two sized allocation with first-fit-by-address placement
//! - Deallocation with automatic coalescing of free buddies
//! - Out-of-band reservation of specific sub-ranges
//! - Capacities that are not a power of two (the tail is reserved as padding)
//!
//! The allocator only keeps metadata: it never touches the memory or resource
//! it hands out, so it can be used for anything addressed by an integer offset.

#![no_std]

extern crate alloc;

use core::fmt;

// Logging support - conditionally import log crate
#[cfg(feature = "log")]
extern crate log;

// Stub macros when log is disabled - these become no-ops
#[cfg(not(feature = "log"))]
macro_rules! error {
    ($($arg:tt)*) => {};
}
#[cfg(not(feature = "log"))]
macro_rules! warn {
    ($($arg:tt)*) => {};
}
#[cfg(not(feature = "log"))]
#[allow(unused_macros)]
macro_rules! info {
    ($($arg:tt)*) => {};
}
#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}
#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

/// The error type used for allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// Invalid `size`, capacity or address. (e.g. unaligned, out of range)
    InvalidParam,
    /// The range to reserve overlapped with an existing allocation or reservation.
    MemoryOverlap,
    /// No free block of the requested size.
    NoMemory,
    /// Deallocate an unallocated range.
    NotAllocated,
    /// The status table was found in an impossible state.
    Corrupted,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParam => write!(f, "invalid size, capacity or address"),
            Self::MemoryOverlap => write!(f, "range overlaps an allocated or reserved range"),
            Self::NoMemory => write!(f, "no free block of the requested size"),
            Self::NotAllocated => write!(f, "range is not allocated"),
            Self::Corrupted => write!(f, "allocator status table is inconsistent"),
        }
    }
}

/// A [`Result`] type with [`AllocError`] as the error type.
pub type AllocResult<T = ()> = Result<T, AllocError>;

/// Used to allocate unique IDs (e.g., thread ID).
pub trait IdAllocator {
    /// Allocate contiguous IDs with given count and alignment.
    fn alloc_id(&mut self, count: usize, alignment: usize) -> AllocResult<usize>;

    /// Deallocate contiguous IDs with given position and count.
    fn dealloc_id(&mut self, start_id: usize, count: usize);

    /// Whether the given `id` was allocated.
    fn is_allocated(&self, id: usize) -> bool;

    /// Mark the given `id` has been allocated and cannot be reallocated.
    fn alloc_fixed_id(&mut self, id: usize) -> AllocResult;

    /// Returns the maximum number of supported IDs.
    fn size(&self) -> usize;

    /// Returns the number of allocated IDs.
    fn used(&self) -> usize;

    /// Returns the number of available IDs.
    fn available(&self) -> usize;
}

/// Checks whether the address has the demanded alignment.
///
/// Equivalent to `addr % align == 0`, but the alignment must be a power of two.
#[inline]
const fn is_aligned(base_addr: usize, align: usize) -> bool {
    base_addr & (align - 1) == 0
}

pub mod math;
pub use math::{checked_next_power_of_two, is_power_of_two, log_of_two, next_power_of_two};

pub mod pool;
#[cfg(feature = "tracking")]
pub use pool::PoolStats;
pub use pool::{BuddyPool, NodeStatus, StatusTable};
