//! Policies for reading source voxels that may lie outside the source buffer.

use ndwarp_tensor::TensorView;

use crate::sample::Sample;

/// Decides what value a (possibly out-of-range) integer voxel coordinate reads as.
///
/// Invoked once per stencil element, so implementations must not allocate.
pub trait Boundary: Copy + Send + Sync + 'static {
    /// Returns the value of `src` at `voxel`, or the policy's substitute when
    /// `voxel` lies outside `[0, extent)` on some axis.
    fn sample<T: Sample, const N: usize>(
        src: &TensorView<'_, T, N>,
        voxel: &[isize; N],
        background: T,
    ) -> T;
}

/// Substitutes a constant background value for every out-of-bounds voxel.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantBoundary;

impl Boundary for ConstantBoundary {
    #[inline(always)]
    fn sample<T: Sample, const N: usize>(
        src: &TensorView<'_, T, N>,
        voxel: &[isize; N],
        background: T,
    ) -> T {
        let mut offset = 0usize;
        for axis in 0..N {
            let v = voxel[axis];
            if v < 0 || v as usize >= src.shape[axis] {
                return background;
            }
            offset += v as usize * src.strides[axis];
        }
        src.data[offset]
    }
}

/// Boundary mode for the resampling operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryMode {
    /// Out-of-bounds reads return the caller's background value
    #[default]
    Constant,
}

impl std::fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryMode::Constant => write!(f, "constant"),
        }
    }
}
