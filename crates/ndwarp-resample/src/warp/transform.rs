use ndwarp_tensor::{TensorView, TensorViewMut};

use super::AffineBasis;
use crate::{
    boundary::{Boundary, BoundaryMode, ConstantBoundary},
    error::ResampleError,
    interpolation::{Cubic, InterpolationMode, Kernel, Linear},
    parallel::{self, ExecutionStrategy},
    sample::Sample,
    stencil::{collapse, extract, Stencil},
};

/// Resamples `src` onto `dst` through an affine coordinate transform.
///
/// Every element of `dst` is overwritten exactly once: output index `i` receives the
/// source interpolated at `basis.origin + sum(i[a] * basis.dx[a])`, with source voxels
/// outside the source shape read according to `boundary`.
///
/// The work is spread over the global thread pool; see [`transform_with`] to pick an
/// [`ExecutionStrategy`].
///
/// # Arguments
///
/// * `basis` - The output grid expressed in source coordinates.
/// * `src` - The array to sample from.
/// * `dst` - The array to fill. Its shape is independent of the source shape.
/// * `background` - The value used for source voxels outside the source shape.
/// * `interpolation` - The interpolation mode to use.
/// * `boundary` - The boundary mode to use.
///
/// # Example
///
/// ```
/// use ndwarp_resample::{
///     boundary::BoundaryMode,
///     interpolation::InterpolationMode,
///     warp::{transform, AffineBasis},
/// };
/// use ndwarp_tensor::Tensor2;
///
/// let src = Tensor2::from_shape_vec([2, 3], vec![0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// let mut dst = Tensor2::from_shape_val([2, 3], -1.0f32);
///
/// // shift the sampling grid half a cell along the last axis
/// let basis = AffineBasis::translation([0.0, 0.5]);
/// transform(
///     &basis,
///     &src.view(),
///     &mut dst.view_mut(),
///     0.0,
///     InterpolationMode::Linear,
///     BoundaryMode::Constant,
/// )
/// .unwrap();
///
/// assert_eq!(dst.as_slice(), &[0.5, 1.5, 1.0, 3.5, 4.5, 2.5]);
/// ```
pub fn transform<T: Sample, const N: usize>(
    basis: &AffineBasis<N>,
    src: &TensorView<'_, T, N>,
    dst: &mut TensorViewMut<'_, T, N>,
    background: T,
    interpolation: InterpolationMode,
    boundary: BoundaryMode,
) -> Result<(), ResampleError> {
    transform_with(
        basis,
        src,
        dst,
        background,
        interpolation,
        boundary,
        ExecutionStrategy::default(),
    )
}

/// Same as [`transform`], with an explicit execution strategy.
///
/// The first axis of `dst` is split into one contiguous row range per worker; each
/// worker owns its rows and its scratch stencil, so the result does not depend on the
/// strategy or the number of threads.
///
/// # Errors
///
/// Returns `UnsupportedRank` for `N == 0`, a `Tensor` error when `src` addresses
/// elements past its slice or `dst` does not hold exactly its shape's element count,
/// and a `Parallel` error when the strategy cannot provide workers. Nothing is written
/// in any of these cases.
pub fn transform_with<T: Sample, const N: usize>(
    basis: &AffineBasis<N>,
    src: &TensorView<'_, T, N>,
    dst: &mut TensorViewMut<'_, T, N>,
    background: T,
    interpolation: InterpolationMode,
    boundary: BoundaryMode,
    strategy: ExecutionStrategy,
) -> Result<(), ResampleError> {
    if N == 0 {
        return Err(ResampleError::UnsupportedRank(0));
    }
    src.check_layout()?;
    dst.check_layout()?;

    log::debug!(
        "affine transform {:?} -> {:?}: {} interpolation, {} boundary, {:?}",
        src.shape,
        dst.shape,
        interpolation,
        boundary,
        strategy
    );

    if dst.numel() == 0 {
        return Ok(());
    }

    match (interpolation, boundary) {
        (InterpolationMode::Linear, BoundaryMode::Constant) => {
            run::<Linear, ConstantBoundary, T, N>(basis, src, dst, background, strategy)
        }
        (InterpolationMode::Cubic, BoundaryMode::Constant) => {
            run::<Cubic, ConstantBoundary, T, N>(basis, src, dst, background, strategy)
        }
    }
}

fn run<K, B, T, const N: usize>(
    basis: &AffineBasis<N>,
    src: &TensorView<'_, T, N>,
    dst: &mut TensorViewMut<'_, T, N>,
    background: T,
    strategy: ExecutionStrategy,
) -> Result<(), ResampleError>
where
    K: Kernel,
    B: Boundary,
    T: Sample,
{
    let shape = dst.shape;
    let row_len = shape[1..].iter().product::<usize>();
    let grid = Grid {
        basis,
        shape: &shape,
        src,
        background,
    };

    parallel::par_iter_partitions(strategy, dst.as_slice_mut(), row_len, |rows, chunk| {
        let mut stencil = Stencil::<T, N>::new(K::POINTS, background);
        let mut out = chunk.iter_mut();
        for i in rows {
            grid.row::<K, B>(i, &mut stencil, &mut out);
        }
    })?;
    Ok(())
}

/// Read-only state shared by all workers of one transform call.
struct Grid<'a, 'src, T, const N: usize> {
    basis: &'a AffineBasis<N>,
    shape: &'a [usize; N],
    src: &'a TensorView<'src, T, N>,
    background: T,
}

impl<T: Sample, const N: usize> Grid<'_, '_, T, N> {
    /// Fills row `i` of axis 0, writing cells in row-major order into `out`.
    fn row<K: Kernel, B: Boundary>(
        &self,
        i: usize,
        stencil: &mut Stencil<T, N>,
        out: &mut std::slice::IterMut<'_, T>,
    ) {
        // direct per row, incremental below: any row split gives identical arithmetic
        let point = self.basis.row_origin(i);
        if N == 1 {
            self.emit::<K, B>(&point, stencil, out);
        } else {
            self.walk::<K, B>(1, point, stencil, out);
        }
    }

    /// Sweeps `axis` and everything inside it starting at `point`.
    fn walk<K: Kernel, B: Boundary>(
        &self,
        axis: usize,
        mut point: [f64; N],
        stencil: &mut Stencil<T, N>,
        out: &mut std::slice::IterMut<'_, T>,
    ) {
        let step = &self.basis.dx[axis];
        let innermost = axis + 1 == N;
        for _ in 0..self.shape[axis] {
            if innermost {
                self.emit::<K, B>(&point, stencil, out);
            } else {
                self.walk::<K, B>(axis + 1, point, stencil, out);
            }
            for (p, d) in point.iter_mut().zip(step) {
                *p += d;
            }
        }
    }

    #[inline(always)]
    fn emit<K: Kernel, B: Boundary>(
        &self,
        point: &[f64; N],
        stencil: &mut Stencil<T, N>,
        out: &mut std::slice::IterMut<'_, T>,
    ) {
        let (_, fractional) = extract::<K, B, T, N>(stencil, self.src, point, self.background);
        let value = collapse::<K, T, N>(stencil, &fractional);
        if let Some(slot) = out.next() {
            *slot = value;
        }
    }
}
