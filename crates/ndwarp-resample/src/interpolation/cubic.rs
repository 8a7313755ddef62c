use super::Kernel;
use crate::sample::Sample;

/// Four-point uniform Catmull-Rom interpolation between `p1` and `p2`.
///
/// No prefilter is applied; the spline passes through the raw samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cubic;

impl Kernel for Cubic {
    const POINTS: usize = 4;

    #[inline(always)]
    fn evaluate<T: Sample>(points: &[T], t: f64) -> T {
        let p0 = points[0].to_f64();
        let p1 = points[1].to_f64();
        let p2 = points[2].to_f64();
        let p3 = points[3].to_f64();
        T::from_f64(
            p1 + 0.5
                * t
                * (p2 - p0
                    + t * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3
                        + t * (3.0 * (p1 - p2) + p3 - p0))),
        )
    }
}
