use std::cmp::Ordering;

use crate::{sort_network, SliceExchange};

#[inline(always)]
fn sort_impl<T, F>(values: &mut [T], is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = values.len();
    sort_network(&mut SliceExchange::new(values, is_less), len, 0, 1);
}

/// Sort `values` in ascending order with the odd-even merge network for `values.len()` elements.
///
/// The sequence of comparisons depends only on the length, never on the values. The sort is not stable.
#[inline(never)]
pub fn sort_slice_network<T: Ord>(values: &mut [T]) {
    sort_impl(values, T::lt);
}

pub fn sort_slice_network_by<T, F>(values: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    sort_impl(values, |a, b| compare(a, b) == Ordering::Less);
}

pub fn sort_slice_network_by_key<T, K, F>(values: &mut [T], mut f: F)
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    sort_impl(values, |a, b| f(a).lt(&f(b)));
}

/// Sort a fixed size array, the network is selected by `N`.
#[inline]
pub fn sort_array_network<T: Ord, const N: usize>(values: &mut [T; N]) {
    sort_impl(values.as_mut_slice(), T::lt);
}

/// Sort every consecutive block of `len` elements independently.
///
/// A trailing block shorter than `len` is left untouched.
#[inline(never)]
pub fn sort_chunks_network<T: Ord>(values: &mut [T], len: usize) {
    if len == 0 {
        return;
    }
    values.chunks_exact_mut(len).for_each(|chunk| sort_impl(chunk, T::lt));
}
