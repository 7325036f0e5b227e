/// Largest power of two not exceeding `n`, or 1 for `n == 0`.
#[inline(always)]
pub const fn round_down_to_power_of_two(n: usize) -> usize {
    let mut result = 1;
    while result <= n / 2 {
        result *= 2;
    }
    result
}

/// Size of the first sub-block when splitting a block of `n` elements.
///
/// Batcher's 2/3 split rounded down to a power of two keeps both halves balanced,
/// `max(a, b) <= 2 * min(a, b)`, which every merge relies on.
#[inline(always)]
pub const fn size_of_first_block(n: usize) -> usize {
    // floor(2n / 3) without overflowing for large n
    round_down_to_power_of_two(n / 3 * 2 + (n % 3) * 2 / 3)
}
