use ndwarp_tensor::TensorView;

use super::Stencil;
use crate::{boundary::Boundary, interpolation::Kernel, sample::Sample};

/// Largest corner magnitude kept exact; anything past it is far outside every source.
const CORNER_LIMIT: f64 = 4_503_599_627_370_496.0;

/// Splits a real-valued point into its per-axis floor and fractional part.
///
/// The fractional part lies in `[0, 1)` for every finite coordinate, negative ones
/// included: `-0.25` splits into `-1` and `0.75`. The integer part is clamped to
/// `±2^52`, so stencil arithmetic around far-away points cannot overflow.
#[inline]
pub fn split_point<const N: usize>(point: &[f64; N]) -> ([isize; N], [f64; N]) {
    let mut floor = [0isize; N];
    let mut fractional = [0f64; N];
    for axis in 0..N {
        let f = point[axis].floor();
        floor[axis] = f.clamp(-CORNER_LIMIT, CORNER_LIMIT) as isize;
        fractional[axis] = point[axis] - f;
    }
    (floor, fractional)
}

/// Fills `stencil` with the `K^N` source samples surrounding `point`.
///
/// The lower corner is `floor(point) - (K - 2) / 2` on every axis, so two-point
/// kernels read `[floor, floor + 1]` and four-point kernels `[floor - 1, floor + 2]`.
/// Every stencil element is read through `B` exactly once, in row-major order.
///
/// Returns the lower corner and the fractional position of `point` inside the cell
/// that holds it.
pub fn extract<K, B, T, const N: usize>(
    stencil: &mut Stencil<T, N>,
    src: &TensorView<'_, T, N>,
    point: &[f64; N],
    background: T,
) -> ([isize; N], [f64; N])
where
    K: Kernel,
    B: Boundary,
    T: Sample,
{
    debug_assert_eq!(stencil.points(), K::POINTS);
    let half = ((K::POINTS - 2) / 2) as isize;
    let (mut lower, fractional) = split_point(point);
    lower.iter_mut().for_each(|l| *l -= half);
    fill(
        stencil,
        src,
        &lower,
        K::POINTS as isize,
        background,
        B::sample::<T, N>,
    );
    (lower, fractional)
}

/// Walks `[0, points)^N` as an odometer with the last axis fastest.
#[inline(always)]
fn fill<T, const N: usize>(
    stencil: &mut Stencil<T, N>,
    src: &TensorView<'_, T, N>,
    lower: &[isize; N],
    points: isize,
    background: T,
    sample: impl Fn(&TensorView<'_, T, N>, &[isize; N], T) -> T,
) where
    T: Sample,
{
    let mut voxel = *lower;
    for slot in stencil.as_mut_slice().iter_mut() {
        *slot = sample(src, &voxel, background);
        for axis in (0..N).rev() {
            voxel[axis] += 1;
            if voxel[axis] < lower[axis] + points {
                break;
            }
            voxel[axis] = lower[axis];
        }
    }
}
