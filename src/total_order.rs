use crate::sort_slice_network_by_key;

/// Maps a value to an unsigned key whose natural order is the total order of the value.
///
/// For floats this is the IEEE 754 `totalOrder` predicate, the same order as `f64::total_cmp`.
pub trait TotalOrder: Copy {
    fn to_total_order(&self) -> u64;
}

impl TotalOrder for f64 {
    #[inline(always)]
    fn to_total_order(&self) -> u64 {
        let bits = self.to_bits();
        (bits ^ ((bits as i64 >> 63) as u64 >> 1)) ^ (1 << 63)
    }
}

impl TotalOrder for f32 {
    #[inline(always)]
    fn to_total_order(&self) -> u64 {
        let bits = self.to_bits();
        ((bits ^ ((bits as i32 >> 31) as u32 >> 1)) ^ (1 << 31)) as u64
    }
}

macro_rules! total_order_unsigned {
    ($($t:ty),*) => {
        $(impl TotalOrder for $t {
            #[inline(always)]
            fn to_total_order(&self) -> u64 {
                *self as u64
            }
        })*
    };
}

macro_rules! total_order_signed {
    ($($t:ty => $u:ty),*) => {
        $(impl TotalOrder for $t {
            #[inline(always)]
            fn to_total_order(&self) -> u64 {
                (*self as $u ^ (1 << (<$u>::BITS - 1))) as u64
            }
        })*
    };
}

total_order_unsigned!(u8, u16, u32, u64, bool);
total_order_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64);

/// Sort with the scalar network by total order, this also accepts floats including NaN.
#[inline(never)]
pub fn sort_slice_network_total_order<T: TotalOrder>(values: &mut [T]) {
    sort_slice_network_by_key(values, T::to_total_order);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_total_order() {
        let floats = vec![-f64::NAN, f64::NEG_INFINITY, -1.0, -0.0, 0.0, 1.0, f64::INFINITY, f64::NAN];
        for pair in floats.windows(2) {
            assert!(pair[0].to_total_order() < pair[1].to_total_order(), "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_signed_total_order() {
        let ints = [i32::MIN, -1, 0, 1, i32::MAX];
        for pair in ints.windows(2) {
            assert!(pair[0].to_total_order() < pair[1].to_total_order());
        }
        assert!((-1_i8).to_total_order() < 0_i8.to_total_order());
        assert!(i64::MIN.to_total_order() < i64::MAX.to_total_order());
    }

    #[test]
    fn test_sort_floats() {
        let mut values = [2.5_f32, f32::NAN, -0.0, f32::NEG_INFINITY, 0.0, -3.0];
        sort_slice_network_total_order(&mut values);

        let expected = [f32::NEG_INFINITY, -3.0, -0.0, 0.0, 2.5, f32::NAN];
        for (left, right) in values.iter().zip(expected.iter()) {
            assert_eq!(left.to_bits(), right.to_bits(), "{left} != {right}");
        }
    }

    #[test]
    fn test_sort_matches_total_cmp() {
        let mut values = [7.0, -2.0, 1e300, -f64::NAN, 0.5, -0.0, 3.0, f64::MIN_POSITIVE, f64::MAX];
        let mut expected = values;
        expected.sort_by(f64::total_cmp);
        sort_slice_network_total_order(&mut values);
        assert_eq!(values.map(f64::to_bits), expected.map(f64::to_bits));
    }
}
