use num_traits::AsPrimitive;

/// Numeric element type that can be resampled.
///
/// Interpolation always runs in `f64`; results are narrowed back with `as` semantics,
/// so integer outputs truncate toward zero and saturate at the type's bounds.
pub trait Sample: Copy + Send + Sync + 'static {
    /// Widens the value to `f64`.
    fn to_f64(self) -> f64;

    /// Narrows an `f64` back to the element type.
    fn from_f64(value: f64) -> Self;
}

impl<T> Sample for T
where
    T: AsPrimitive<f64> + Send + Sync,
    f64: AsPrimitive<T>,
{
    #[inline(always)]
    fn to_f64(self) -> f64 {
        self.as_()
    }

    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        value.as_()
    }
}
