use ndwarp_tensor::{TensorView, TensorViewMut};

use super::{transform_with, AffineBasis};
use crate::{
    boundary::BoundaryMode, error::ResampleError, interpolation::InterpolationMode,
    parallel::ExecutionStrategy, sample::Sample,
};

/// Highest rank [`transform_dyn`] dispatches to.
const MAX_RANK: usize = 5;

/// Resamples a flat row-major buffer whose rank is only known at runtime.
///
/// The rank is taken from `src_shape` and must lie in `1..=5`; every other argument must
/// agree with it. The call is forwarded to the matching [`transform_with`]
/// instantiation.
///
/// # Arguments
///
/// * `origin` - Source-space position of the first output element.
/// * `dx` - One step vector per output axis.
/// * `src` - The source elements in row-major order.
/// * `src_shape` - The shape of the source.
/// * `dst` - The destination elements in row-major order.
/// * `dst_shape` - The shape of the destination.
/// * `background` - The value used for source voxels outside the source shape.
/// * `interpolation` - The interpolation mode to use.
/// * `boundary` - The boundary mode to use.
/// * `strategy` - The execution strategy.
///
/// # Errors
///
/// Returns `UnsupportedRank` for a rank outside `1..=5`, `DimensionMismatch` if the
/// ranks of the arguments differ and `Tensor` if a buffer does not match its shape.
/// The destination is untouched on error.
#[allow(clippy::too_many_arguments)]
pub fn transform_dyn<T: Sample>(
    origin: &[f64],
    dx: &[&[f64]],
    src: &[T],
    src_shape: &[usize],
    dst: &mut [T],
    dst_shape: &[usize],
    background: T,
    interpolation: InterpolationMode,
    boundary: BoundaryMode,
    strategy: ExecutionStrategy,
) -> Result<(), ResampleError> {
    let rank = src_shape.len();
    if rank == 0 || rank > MAX_RANK {
        return Err(ResampleError::UnsupportedRank(rank));
    }
    if dst_shape.len() != rank {
        return Err(ResampleError::dimension_mismatch(
            "dst_shape",
            rank,
            dst_shape.len(),
        ));
    }

    let args = DynArgs {
        origin,
        dx,
        src,
        src_shape,
        dst_shape,
        background,
        interpolation,
        boundary,
        strategy,
    };
    match rank {
        1 => args.run::<1>(dst),
        2 => args.run::<2>(dst),
        3 => args.run::<3>(dst),
        4 => args.run::<4>(dst),
        5 => args.run::<5>(dst),
        _ => Err(ResampleError::UnsupportedRank(rank)),
    }
}

struct DynArgs<'a, T> {
    origin: &'a [f64],
    dx: &'a [&'a [f64]],
    src: &'a [T],
    src_shape: &'a [usize],
    dst_shape: &'a [usize],
    background: T,
    interpolation: InterpolationMode,
    boundary: BoundaryMode,
    strategy: ExecutionStrategy,
}

impl<T: Sample> DynArgs<'_, T> {
    fn run<const N: usize>(&self, dst: &mut [T]) -> Result<(), ResampleError> {
        let basis = AffineBasis::<N>::from_slices(self.origin, self.dx)?;
        let src_shape = to_shape::<N>("src_shape", self.src_shape)?;
        let dst_shape = to_shape::<N>("dst_shape", self.dst_shape)?;

        let src = TensorView::from_slice(src_shape, self.src)?;
        let mut dst = TensorViewMut::from_slice_mut(dst_shape, dst)?;
        transform_with(
            &basis,
            &src,
            &mut dst,
            self.background,
            self.interpolation,
            self.boundary,
            self.strategy,
        )
    }
}

fn to_shape<const N: usize>(what: &str, shape: &[usize]) -> Result<[usize; N], ResampleError> {
    shape
        .try_into()
        .map_err(|_| ResampleError::dimension_mismatch(what, N, shape.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndwarp_tensor::TensorError;

    fn run_2d(dst: &mut [f32], dst_shape: &[usize]) -> Result<(), ResampleError> {
        let src = [1.0f32, 2.0, 3.0, 4.0];
        transform_dyn(
            &[0.0, 0.0],
            &[&[1.0, 0.0], &[0.0, 1.0]],
            &src,
            &[2, 2],
            dst,
            dst_shape,
            0.0,
            InterpolationMode::Linear,
            BoundaryMode::Constant,
            ExecutionStrategy::Serial,
        )
    }

    #[test]
    fn dispatches_rank_2() -> Result<(), ResampleError> {
        let mut dst = [0.0f32; 6];
        run_2d(&mut dst, &[3, 2])?;
        assert_eq!(dst, [1.0, 2.0, 3.0, 4.0, 0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn dispatches_rank_5() -> Result<(), ResampleError> {
        let src = [7u16; 32];
        let mut dst = [0u16; 32];
        let eye: Vec<Vec<f64>> = (0..5)
            .map(|i| (0..5).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        let dx: Vec<&[f64]> = eye.iter().map(|v| v.as_slice()).collect();
        transform_dyn(
            &[0.0; 5],
            &dx,
            &src,
            &[2; 5],
            &mut dst,
            &[2; 5],
            0,
            InterpolationMode::Cubic,
            BoundaryMode::Constant,
            ExecutionStrategy::Fixed(2),
        )?;
        assert_eq!(dst, src);
        Ok(())
    }

    #[test]
    fn rejects_unsupported_rank() {
        let mut dst = [0.0f64; 1];
        for shape in [&[][..], &[1; 6][..]] {
            let res = transform_dyn(
                &vec![0.0; shape.len()],
                &[],
                &[1.0],
                shape,
                &mut dst,
                shape,
                0.0,
                InterpolationMode::Linear,
                BoundaryMode::Constant,
                ExecutionStrategy::Serial,
            );
            assert_eq!(res, Err(ResampleError::UnsupportedRank(shape.len())));
        }
    }

    #[test]
    fn rejects_rank_mismatch() {
        let mut dst = [9.0f32; 4];
        assert_eq!(
            run_2d(&mut dst, &[4]),
            Err(ResampleError::dimension_mismatch("dst_shape", 2, 1))
        );
        assert_eq!(dst, [9.0; 4]);
    }

    #[test]
    fn rejects_short_buffer() {
        let mut dst = [9.0f32; 5];
        assert_eq!(
            run_2d(&mut dst, &[3, 2]),
            Err(ResampleError::Tensor(TensorError::invalid_shape(6, 5)))
        );
        assert_eq!(dst, [9.0; 5]);
    }

    #[test]
    fn rejects_bad_basis() {
        let mut dst = [0.0f32; 4];
        let res = transform_dyn(
            &[0.0, 0.0, 0.0],
            &[&[1.0, 0.0], &[0.0, 1.0]],
            &[1.0f32; 4],
            &[2, 2],
            &mut dst,
            &[2, 2],
            0.0,
            InterpolationMode::Linear,
            BoundaryMode::Constant,
            ExecutionStrategy::Serial,
        );
        assert_eq!(res, Err(ResampleError::dimension_mismatch("origin", 2, 3)));
    }
}
