/// Number of independent sequences processed by one vector register.
pub const LANES: usize = 8;

/// An 8 lane register holding one position of 8 independent sequences.
///
/// This is the only place that knows about vector instructions, the network only ever asks for a lanewise
/// minimum and maximum.
pub trait Lanes: Copy {
    type Elem: Copy;

    /// Load lane `k` from `src[base + k * stride]`.
    fn gather(src: &[Self::Elem], base: usize, stride: usize) -> Self;

    /// Store lane `k` to `dst[base + k * stride]`.
    fn scatter(self, dst: &mut [Self::Elem], base: usize, stride: usize);

    /// Lanewise `(min, max)`.
    fn min_max(self, other: Self) -> (Self, Self);
}

/// Plain array backend, available for every totally ordered element type and every target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortableLanes<T>(pub [T; LANES]);

impl<T: Ord + Copy> Lanes for PortableLanes<T> {
    type Elem = T;

    #[inline(always)]
    fn gather(src: &[T], base: usize, stride: usize) -> Self {
        Self(std::array::from_fn(|k| src[base + k * stride]))
    }

    #[inline(always)]
    fn scatter(self, dst: &mut [T], base: usize, stride: usize) {
        for (k, value) in self.0.into_iter().enumerate() {
            dst[base + k * stride] = value;
        }
    }

    #[inline(always)]
    fn min_max(self, other: Self) -> (Self, Self) {
        let mut min = self.0;
        let mut max = other.0;
        for k in 0..LANES {
            if max[k] < min[k] {
                std::mem::swap(&mut min[k], &mut max[k]);
            }
        }
        (Self(min), Self(max))
    }
}

#[cfg(target_arch = "x86_64")]
pub use avx2::Avx2I32x8;

#[cfg(target_arch = "x86_64")]
mod avx2 {
    use super::{Lanes, LANES};
    use std::arch::x86_64::*;

    /// AVX2 backend for `i32`.
    ///
    /// Only used after `is_x86_feature_detected!("avx2")` returned true, see `crate::vectorized`.
    #[derive(Debug, Clone, Copy)]
    pub struct Avx2I32x8(__m256i);

    impl Avx2I32x8 {
        /// Largest stride for which all gather offsets fit into the 32 bit index vector.
        pub const MAX_STRIDE: usize = i32::MAX as usize / LANES;

        #[inline(always)]
        fn offsets(stride: usize) -> __m256i {
            debug_assert!(stride <= Self::MAX_STRIDE);
            let stride = stride as i32;
            unsafe {
                _mm256_mullo_epi32(_mm256_setr_epi32(0, 1, 2, 3, 4, 5, 6, 7), _mm256_set1_epi32(stride))
            }
        }
    }

    impl Lanes for Avx2I32x8 {
        type Elem = i32;

        #[inline(always)]
        fn gather(src: &[i32], base: usize, stride: usize) -> Self {
            assert!(base + (LANES - 1) * stride < src.len(), "gather out of bounds");
            // SAFETY: all eight offsets were bounds checked above, the caller checked for avx2 support.
            unsafe {
                let ptr = src.as_ptr().add(base);
                if stride == 1 {
                    Self(_mm256_loadu_si256(ptr as *const __m256i))
                } else {
                    Self(_mm256_i32gather_epi32::<4>(ptr, Self::offsets(stride)))
                }
            }
        }

        #[inline(always)]
        fn scatter(self, dst: &mut [i32], base: usize, stride: usize) {
            assert!(base + (LANES - 1) * stride < dst.len(), "scatter out of bounds");
            // SAFETY: bounds checked above, the caller checked for avx2 support.
            unsafe {
                if stride == 1 {
                    _mm256_storeu_si256(dst.as_mut_ptr().add(base) as *mut __m256i, self.0);
                } else {
                    // avx2 has no scatter
                    let lanes = std::mem::transmute::<__m256i, [i32; LANES]>(self.0);
                    for (k, value) in lanes.into_iter().enumerate() {
                        *dst.get_unchecked_mut(base + k * stride) = value;
                    }
                }
            }
        }

        #[inline(always)]
        fn min_max(self, other: Self) -> (Self, Self) {
            // SAFETY: the caller checked for avx2 support.
            unsafe { (Self(_mm256_min_epi32(self.0, other.0)), Self(_mm256_max_epi32(self.0, other.0))) }
        }
    }

}
