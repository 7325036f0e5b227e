// Sorts 8 independent sequences at once. Each position of the 8 sequences is loaded into one vector register
// and the scalar network is replayed over the registers, with a lanewise min/max as compare-exchange.

use log::debug;

use crate::simd::{Lanes, PortableLanes, LANES};
use crate::{sort_network, CompareExchange, Error, Result};

/// How 8 sequences of `len` elements are arranged inside each block of `8 * len` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Element `j` of sequence `k` is at `k + 8 * j`.
    #[default]
    Interleaved,
    /// Sequence `k` occupies `k * len .. (k + 1) * len`.
    Contiguous,
}

impl Layout {
    /// Base index and lane stride of position `j`.
    #[inline(always)]
    fn position(self, len: usize, j: usize) -> (usize, usize) {
        match self {
            Layout::Interleaved => (j * LANES, 1),
            Layout::Contiguous => (j, len),
        }
    }
}

struct RegisterExchange<'a, V> {
    registers: &'a mut [V],
}

impl<V: Lanes> CompareExchange for RegisterExchange<'_, V> {
    #[inline(always)]
    fn compare_exchange(&mut self, a: usize, b: usize) {
        let (min, max) = self.registers[a].min_max(self.registers[b]);
        self.registers[a] = min;
        self.registers[b] = max;
    }
}

/// Sort all blocks of `values`, whose length must be a multiple of `8 * len`.
///
/// The comparators are collected once and replayed in a flat loop, so that the whole loop is inlined into the
/// `target_feature` caller instead of going through the recursive builder for every block.
#[inline(always)]
fn sort_blocks<V: Lanes>(values: &mut [V::Elem], len: usize, layout: Layout) {
    debug_assert!(len > 0 && values.len() % (len * LANES) == 0);

    let mut pairs: Vec<(usize, usize)> = Vec::new();
    sort_network(&mut |a: usize, b: usize| pairs.push((a, b)), len, 0, 1);

    let mut registers: Vec<V> = Vec::with_capacity(len);
    for block in values.chunks_exact_mut(len * LANES) {
        registers.clear();
        registers.extend((0..len).map(|j| {
            let (base, stride) = layout.position(len, j);
            V::gather(block, base, stride)
        }));

        let mut cx = RegisterExchange { registers: &mut registers };
        for &(a, b) in &pairs {
            cx.compare_exchange(a, b);
        }

        for (j, register) in registers.iter().enumerate() {
            let (base, stride) = layout.position(len, j);
            register.scatter(block, base, stride);
        }
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn sort_blocks_avx2(values: &mut [i32], len: usize, layout: Layout) {
    sort_blocks::<crate::simd::Avx2I32x8>(values, len, layout)
}

/// Element types that can be sorted 8 sequences at a time.
///
/// The lanewise min/max assumes a total order, so floats are deliberately not implemented.
pub trait VectorElement: Ord + Copy {
    /// Sort every block of 8 sequences in `values`, `values.len()` is a multiple of `8 * len`.
    fn sort_blocks(values: &mut [Self], len: usize, layout: Layout) {
        sort_blocks::<PortableLanes<Self>>(values, len, layout)
    }
}

impl VectorElement for i32 {
    fn sort_blocks(values: &mut [Self], len: usize, layout: Layout) {
        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("avx2") && len <= crate::simd::Avx2I32x8::MAX_STRIDE {
                debug!("sorting {} elements with avx2", values.len());
                // SAFETY: avx2 support was detected at runtime
                unsafe { sort_blocks_avx2(values, len, layout) };
                return;
            }
        }
        debug!("sorting {} elements with portable lanes", values.len());
        sort_blocks::<PortableLanes<i32>>(values, len, layout)
    }
}

macro_rules! vector_element {
    ($($t:ty),*) => {
        $(impl VectorElement for $t {})*
    };
}

vector_element!(u8, u16, u32, u64, usize, i8, i16, i64, isize);

/// Sort `sequences` sequences of `len` elements each, stored as blocks of 8 interleaved sequences.
///
/// Equivalent to sorting each sequence on its own with the scalar network. Nothing is modified if an
/// error is returned.
pub fn sort_vectorized<T: VectorElement>(values: &mut [T], len: usize, sequences: usize) -> Result<()> {
    sort_vectorized_with_layout(values, len, sequences, Layout::Interleaved)
}

pub fn sort_vectorized_with_layout<T: VectorElement>(
    values: &mut [T],
    len: usize,
    sequences: usize,
    layout: Layout,
) -> Result<()> {
    if sequences == 0 || sequences % LANES != 0 {
        return Err(Error::VectorCountMismatch { sequences });
    }
    let required = len.saturating_mul(sequences);
    if values.len() < required {
        return Err(Error::BufferTooShort { required, actual: values.len() });
    }
    if len == 0 {
        return Ok(());
    }

    debug!("sorting {} blocks of {LANES} sequences with {len} elements, {layout:?}", sequences / LANES);
    T::sort_blocks(&mut values[..required], len, layout);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort_slice_network;

    fn interleave(sequences: &[Vec<i32>]) -> Vec<i32> {
        let len = sequences[0].len();
        let mut values = vec![0; sequences.len() * len];
        for (s, sequence) in sequences.iter().enumerate() {
            let (block, k) = (s / LANES, s % LANES);
            for (j, v) in sequence.iter().enumerate() {
                values[block * LANES * len + k + LANES * j] = *v;
            }
        }
        values
    }

    #[test]
    fn test_interleaved_layout() {
        let sequences = (0..8).map(|k| (0..5).rev().map(|j| j * 10 + k).collect()).collect::<Vec<Vec<i32>>>();
        let mut values = interleave(&sequences);
        sort_vectorized(&mut values, 5, 8).unwrap();

        let mut expected = sequences.clone();
        expected.iter_mut().for_each(|s| sort_slice_network(s));
        assert_eq!(values, interleave(&expected));
    }

    #[test]
    fn test_contiguous_layout() {
        let mut values = (0..48_i32).rev().collect::<Vec<_>>();
        sort_vectorized_with_layout(&mut values, 3, 16, Layout::Contiguous).unwrap();

        let mut expected = (0..48_i32).rev().collect::<Vec<_>>();
        expected.chunks_exact_mut(3).for_each(sort_slice_network);
        assert_eq!(values, expected);
    }

    #[test]
    fn test_portable_element_type() {
        let mut values = (0..64_u8).rev().collect::<Vec<_>>();
        sort_vectorized_with_layout(&mut values, 8, 8, Layout::Contiguous).unwrap();
        for chunk in values.chunks_exact(8) {
            assert!(chunk.is_sorted());
        }
    }

    #[test]
    fn test_count_mismatch() {
        let mut values = [3, 2, 1, 0].repeat(12);
        for sequences in [0, 1, 7, 12] {
            let err = sort_vectorized(&mut values, 1, sequences).unwrap_err();
            assert!(matches!(err, Error::VectorCountMismatch { sequences: s } if s == sequences));
        }
        assert_eq!(values, [3, 2, 1, 0].repeat(12));
    }

    #[test]
    fn test_buffer_too_short() {
        let mut values = (0..20_i64).rev().collect::<Vec<_>>();
        let err = sort_vectorized(&mut values, 3, 8).unwrap_err();
        assert!(matches!(err, Error::BufferTooShort { required: 24, actual: 20 }));
        assert_eq!(values, (0..20_i64).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_length_and_single_element() {
        let mut empty: Vec<i32> = vec![];
        sort_vectorized(&mut empty, 0, 8).unwrap();

        let mut values = vec![9, 8, 7, 6, 5, 4, 3, 2];
        sort_vectorized(&mut values, 1, 8).unwrap();
        assert_eq!(values, vec![9, 8, 7, 6, 5, 4, 3, 2]);
    }

    #[test]
    fn test_many_blocks_share_network() {
        let sequences = (0..64)
            .map(|k: i32| (0..11).map(|j: i32| (j * 7919 + k * 104729) % 97 - 48).collect())
            .collect::<Vec<Vec<i32>>>();
        let mut values = interleave(&sequences);
        sort_vectorized(&mut values, 11, 64).unwrap();

        let mut expected = sequences.clone();
        expected.iter_mut().for_each(|s| s.sort_unstable());
        assert_eq!(values, interleave(&expected));
    }

    #[test]
    fn test_register_exchange_is_lanewise() {
        let mut registers = [PortableLanes([3, 1, 4, 1, 5, 9, 2, 6]), PortableLanes([2, 7, 1, 8, 2, 8, 1, 8])];
        RegisterExchange { registers: &mut registers }.compare_exchange(0, 1);
        assert_eq!(registers[0].0, [2, 1, 1, 1, 2, 8, 1, 6]);
        assert_eq!(registers[1].0, [3, 7, 4, 8, 5, 9, 2, 8]);
    }

    #[test]
    fn test_trailing_elements_untouched() {
        let mut values = (0..20_i32).rev().collect::<Vec<_>>();
        sort_vectorized_with_layout(&mut values, 2, 8, Layout::Contiguous).unwrap();
        assert_eq!(&values[..4], &[18, 19, 16, 17]);
        assert_eq!(&values[16..], &[3, 2, 1, 0]);
    }
}
