//! Power-of-two helpers shared by the pool and usable on their own.

/// Returns `true` if `x` is a positive power of two.
#[inline]
pub const fn is_power_of_two(x: usize) -> bool {
    x != 0 && x & (x - 1) == 0
}

/// Returns the base-2 exponent of `x`.
///
/// # Panics
///
/// Panics if `x` is not a power of two.
#[inline]
pub const fn log_of_two(x: usize) -> usize {
    assert!(
        is_power_of_two(x),
        "log_of_two: argument is not a power of two"
    );
    x.trailing_zeros() as usize
}

/// Returns the smallest power of two greater than or equal to `x`.
///
/// `x` is returned unchanged if it is already a power of two, and `0` maps to `1`.
///
/// # Panics
///
/// Panics if the result does not fit in `usize`. Use
/// [`checked_next_power_of_two`] when `x` is untrusted.
#[inline]
pub const fn next_power_of_two(x: usize) -> usize {
    if is_power_of_two(x) {
        return x;
    }
    match x.checked_next_power_of_two() {
        Some(rounded) => rounded,
        None => panic!("next_power_of_two: result does not fit in usize"),
    }
}

/// Like [`next_power_of_two`], but returns `None` when the result does not fit in `usize`.
#[inline]
pub const fn checked_next_power_of_two(x: usize) -> Option<usize> {
    x.checked_next_power_of_two()
}
