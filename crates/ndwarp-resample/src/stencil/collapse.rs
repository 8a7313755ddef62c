use super::Stencil;
use crate::{interpolation::Kernel, sample::Sample};

/// Reduces a filled stencil to one value at the given fractional position.
///
/// An N-dimensional interpolation is a 1D interpolation along axis 0 whose `K`
/// operands are the `(N-1)`-dimensional interpolations of the slices at fixed outer
/// index. Each slice is collapsed recursively with `fractional[1..]`; the results are
/// written back into the first `K` slots of the parent slice and the kernel is applied
/// to them with `fractional[0]`. Every kernel result is narrowed to `T` before it feeds
/// the next level.
///
/// The stencil contents are consumed: the buffer holds partial results afterwards.
pub fn collapse<K, T, const N: usize>(stencil: &mut Stencil<T, N>, fractional: &[f64; N]) -> T
where
    K: Kernel,
    T: Sample,
{
    debug_assert_eq!(stencil.points(), K::POINTS);
    collapse_slice::<K, T>(stencil.as_mut_slice(), fractional)
}

fn collapse_slice<K: Kernel, T: Sample>(values: &mut [T], fractional: &[f64]) -> T {
    match fractional {
        [] => values[0],
        [t] => K::evaluate(&values[..K::POINTS], *t),
        [t, rest @ ..] => {
            let slice_len = values.len() / K::POINTS;
            for i in 0..K::POINTS {
                let start = i * slice_len;
                let v = collapse_slice::<K, T>(&mut values[start..start + slice_len], rest);
                // slot i sits inside slice 0, which is already reduced
                values[i] = v;
            }
            K::evaluate(&values[..K::POINTS], *t)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::{Cubic, Linear};
    use approx::assert_relative_eq;

    fn stencil_from_fn<const N: usize>(
        points: usize,
        f: impl Fn(&[usize; N]) -> f64,
    ) -> Stencil<f64, N> {
        let mut s = Stencil::<f64, N>::new(points, 0.0);
        let mut index = [0usize; N];
        for slot in s.as_mut_slice().iter_mut() {
            *slot = f(&index);
            for axis in (0..N).rev() {
                index[axis] += 1;
                if index[axis] < points {
                    break;
                }
                index[axis] = 0;
            }
        }
        s
    }

    #[test]
    fn linear_1d() {
        let mut s = stencil_from_fn::<1>(2, |[i]| *i as f64 * 4.0);
        assert_relative_eq!(collapse::<Linear, _, 1>(&mut s, &[0.25]), 1.0);
    }

    #[test]
    fn bilinear_matches_closed_form() {
        // values f(r, c) = 1 + 2r + 3c + 4rc at the unit square corners
        let f = |[r, c]: &[usize; 2]| {
            let (r, c) = (*r as f64, *c as f64);
            1.0 + 2.0 * r + 3.0 * c + 4.0 * r * c
        };
        let mut s = stencil_from_fn::<2>(2, f);
        let (y, x) = (0.3, 0.6);
        let expected = 1.0 + 2.0 * y + 3.0 * x + 4.0 * y * x;
        assert_relative_eq!(
            collapse::<Linear, _, 2>(&mut s, &[y, x]),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn outer_axis_uses_first_fraction() {
        // varies only along axis 0
        let mut s = stencil_from_fn::<3>(2, |[a, _, _]| *a as f64 * 10.0);
        assert_relative_eq!(
            collapse::<Linear, _, 3>(&mut s, &[0.7, 0.1, 0.9]),
            7.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn cubic_trilinear_polynomial_is_exact() {
        // Catmull-Rom reproduces linear functions on each axis
        let f = |[a, b, c]: &[usize; 3]| {
            let (a, b, c) = (*a as f64 - 1.0, *b as f64 - 1.0, *c as f64 - 1.0);
            2.0 * a - b + 0.5 * c + a * b * c
        };
        let mut s = stencil_from_fn::<3>(4, f);
        let (a, b, c) = (0.2, 0.45, 0.8);
        let expected = 2.0 * a - b + 0.5 * c + a * b * c;
        assert_relative_eq!(
            collapse::<Cubic, _, 3>(&mut s, &[a, b, c]),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn zero_fraction_reads_base_sample_5d() {
        let mut s = stencil_from_fn::<5>(4, |idx| {
            idx.iter().fold(0.0, |acc, &i| acc * 4.0 + i as f64)
        });
        // base sample of a cubic stencil is index 1 on every axis
        let expected = [1usize; 5].iter().fold(0.0, |acc, &i| acc * 4.0 + i as f64);
        assert_eq!(collapse::<Cubic, _, 5>(&mut s, &[0.0; 5]), expected);
    }

    #[test]
    fn integer_levels_truncate() {
        // inner rows: [0, 1] -> 0.5 -> 0 and [1, 2] -> 1.5 -> 1, outer: 0.5 -> 0
        let mut s = Stencil::<u8, 2>::new(2, 0);
        s.as_mut_slice().copy_from_slice(&[0, 1, 1, 2]);
        assert_eq!(collapse::<Linear, _, 2>(&mut s, &[0.5, 0.5]), 0);
    }
}
