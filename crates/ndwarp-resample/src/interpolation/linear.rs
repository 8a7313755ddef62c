use super::Kernel;
use crate::sample::Sample;

/// Two-point linear interpolation: `p0 * (1 - t) + p1 * t`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

impl Kernel for Linear {
    const POINTS: usize = 2;

    #[inline(always)]
    fn evaluate<T: Sample>(points: &[T], t: f64) -> T {
        let (p0, p1) = (points[0].to_f64(), points[1].to_f64());
        T::from_f64(p0 * (1.0 - t) + p1 * t)
    }
}
