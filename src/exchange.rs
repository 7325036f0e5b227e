/// One compare-exchange site of a sorting network.
///
/// The network builder calls this once per comparator with the two absolute positions, `a < b`, in
/// visitation order. Implementations decide what a visit means: reorder data, emit text, count.
pub trait CompareExchange {
    fn compare_exchange(&mut self, a: usize, b: usize);

    /// Once true, the builder visits no further comparators.
    #[inline(always)]
    fn stopped(&self) -> bool {
        false
    }
}

impl<F: FnMut(usize, usize)> CompareExchange for F {
    #[inline(always)]
    fn compare_exchange(&mut self, a: usize, b: usize) {
        self(a, b)
    }
}

/// Scalar swap over a slice, leaving `v[a]` not greater than `v[b]` under `is_less`.
pub struct SliceExchange<'a, T, F> {
    values: &'a mut [T],
    is_less: F,
}

impl<'a, T, F> SliceExchange<'a, T, F>
where
    F: FnMut(&T, &T) -> bool,
{
    pub fn new(values: &'a mut [T], is_less: F) -> Self {
        Self { values, is_less }
    }
}

impl<T, F> CompareExchange for SliceExchange<'_, T, F>
where
    F: FnMut(&T, &T) -> bool,
{
    #[inline(always)]
    fn compare_exchange(&mut self, a: usize, b: usize) {
        debug_assert!(a < b && b < self.values.len());
        // swap only when strictly less, equal elements stay where they are
        if (self.is_less)(&self.values[b], &self.values[a]) {
            self.values.swap(a, b);
        }
    }
}
