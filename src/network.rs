// Batcher's odd-even merge sorting network, see
// https://en.wikipedia.org/wiki/Batcher_odd%E2%80%93even_mergesort
// Blocks that are not a power of two are split 2/3 : 1/3 instead of in half, so that every merge stays
// balanced and the network works for any number of elements.

use crate::{size_of_first_block, CompareExchange, Error, Result};

/// Visit the comparators that sort the `len` elements at `offset, offset + stride, ...`.
pub fn sort_network<C: CompareExchange + ?Sized>(cx: &mut C, len: usize, offset: usize, stride: usize) {
    if cx.stopped() {
        return;
    }
    match len {
        0 | 1 => {}
        2 => cx.compare_exchange(offset, offset + stride),
        _ => {
            let a = size_of_first_block(len);
            let b = len - a;
            assert!(a >= 1 && b >= 1, "invalid split {a} + {b} of block with {len} elements");

            sort_network(cx, a, offset, stride);
            sort_network(cx, b, offset + a * stride, stride);
            merge_network(cx, a, b, offset, stride);
        }
    }
}

/// Visit the comparators that merge a sorted block of `a` elements with the following sorted block of `b`
/// elements.
///
/// `a` must be a power of two and the blocks must be balanced, `max(a, b) <= 2 * min(a, b)`.
pub fn merge_network<C: CompareExchange + ?Sized>(cx: &mut C, a: usize, b: usize, offset: usize, stride: usize) {
    if cx.stopped() {
        return;
    }
    match (a, b) {
        (1, 1) => cx.compare_exchange(offset, offset + stride),
        // the far pair has to come first in both of these
        (1, 2) => {
            cx.compare_exchange(offset, offset + 2 * stride);
            cx.compare_exchange(offset, offset + stride);
        }
        (2, 1) => {
            cx.compare_exchange(offset, offset + 2 * stride);
            cx.compare_exchange(offset + stride, offset + 2 * stride);
        }
        _ => {
            assert!(a.is_power_of_two(), "merge with first block of {a} elements");
            assert!(a <= 2 * b && b <= 2 * a, "unbalanced merge of {a} and {b} elements");

            merge_network(cx, a / 2, (b + 1) / 2, offset, 2 * stride);
            merge_network(cx, a / 2, b / 2, offset + stride, 2 * stride);
            finalise_network(cx, (a + b - 1) / 2, offset + stride, stride);
        }
    }
}

/// Visit `count` adjacent pairs starting at `offset`, completing an odd-even merge.
#[inline(always)]
pub fn finalise_network<C: CompareExchange + ?Sized>(cx: &mut C, count: usize, offset: usize, stride: usize) {
    for i in 0..count {
        if cx.stopped() {
            return;
        }
        let a = offset + 2 * i * stride;
        cx.compare_exchange(a, a + stride);
    }
}

/// The sorting network for a fixed number of elements.
///
/// Nothing is stored besides the length, every query walks the network again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Network {
    len: usize,
}

impl Network {
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(Error::InvalidLength(0));
        }
        Ok(Self { len })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Drive `cx` over every comparator of the network, in order.
    #[inline]
    pub fn visit<C: CompareExchange + ?Sized>(&self, cx: &mut C) {
        sort_network(cx, self.len, 0, 1);
    }

    pub fn comparisons(&self) -> usize {
        let mut count = 0;
        self.visit(&mut |_: usize, _: usize| count += 1);
        count
    }

    /// Number of parallel layers, placing each comparator in the first layer after both of its lanes are
    /// free.
    pub fn depth(&self) -> usize {
        let mut layers = vec![0_usize; self.len];
        let mut depth = 0;
        self.visit(&mut |a: usize, b: usize| {
            let layer = layers[a].max(layers[b]) + 1;
            layers[a] = layer;
            layers[b] = layer;
            depth = depth.max(layer);
        });
        depth
    }

    pub fn pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::with_capacity(self.comparisons());
        self.visit(&mut |a: usize, b: usize| pairs.push((a, b)));
        pairs
    }
}

impl TryFrom<i64> for Network {
    type Error = Error;

    fn try_from(len: i64) -> Result<Self> {
        match usize::try_from(len) {
            Ok(len) if len > 0 => Ok(Self { len }),
            _ => Err(Error::InvalidLength(len)),
        }
    }
}
