use crate::{error::ResampleError, linalg};

/// Coordinate system of the output grid expressed in source coordinates.
///
/// Output index `(i0, .., iN-1)` samples the source at
/// `origin + i0 * dx[0] + .. + iN-1 * dx[N-1]`.
///
/// The basis is used as given: a zero or degenerate `dx` set is not rejected and
/// simply samples the same source points repeatedly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineBasis<const N: usize> {
    /// Source-space position of output index `(0, .., 0)`.
    pub origin: [f64; N],
    /// Source-space step for a unit step along each output axis.
    pub dx: [[f64; N]; N],
}

impl<const N: usize> Default for AffineBasis<N> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize> AffineBasis<N> {
    /// Creates a basis from an origin and one step vector per output axis.
    pub fn new(origin: [f64; N], dx: [[f64; N]; N]) -> Self {
        Self { origin, dx }
    }

    /// The identity mapping: output index `i` samples source index `i`.
    pub fn identity() -> Self {
        let mut dx = [[0.0; N]; N];
        for (i, row) in dx.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self {
            origin: [0.0; N],
            dx,
        }
    }

    /// Output index `i` samples source position `i + offset`.
    pub fn translation(offset: [f64; N]) -> Self {
        Self {
            origin: offset,
            ..Self::identity()
        }
    }

    /// Builds a basis from runtime-sized slices, as handed over by a binding layer.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `origin`, `dx` or any `dx[i]` does not have
    /// exactly `N` components.
    pub fn from_slices(origin: &[f64], dx: &[&[f64]]) -> Result<Self, ResampleError> {
        let origin: [f64; N] = origin
            .try_into()
            .map_err(|_| ResampleError::dimension_mismatch("origin", N, origin.len()))?;
        if dx.len() != N {
            return Err(ResampleError::dimension_mismatch("dx", N, dx.len()));
        }
        let mut basis = [[0.0; N]; N];
        for (i, (row, v)) in basis.iter_mut().zip(dx).enumerate() {
            *row = (*v)
                .try_into()
                .map_err(|_| ResampleError::dimension_mismatch(format!("dx[{i}]"), N, v.len()))?;
        }
        Ok(Self { origin, dx: basis })
    }

    /// Builds the basis that applies a forward transform `y = A (x - c) + c + t`.
    ///
    /// Output point `y` must read source point `x = A⁻¹ (y - t - c) + c`, so the
    /// basis origin is `A⁻¹ (-t - c) + c` and `dx[i]` is column `i` of `A⁻¹`.
    ///
    /// # Errors
    ///
    /// Returns `SingularMatrix` if `linear` cannot be inverted.
    pub fn from_forward(
        linear: &[[f64; N]; N],
        translation: &[f64; N],
        center: &[f64; N],
    ) -> Result<Self, ResampleError> {
        let inv = linalg::invert_matrix(linear).ok_or(ResampleError::SingularMatrix)?;

        let mut shift = [0.0; N];
        for ((s, t), c) in shift.iter_mut().zip(translation).zip(center) {
            *s = -t - c;
        }
        let mut origin = linalg::mat_vec(&inv, &shift);
        for (o, c) in origin.iter_mut().zip(center) {
            *o += c;
        }

        let mut dx = [[0.0; N]; N];
        for (i, row) in dx.iter_mut().enumerate() {
            for (a, v) in row.iter_mut().enumerate() {
                *v = inv[a][i];
            }
        }
        Ok(Self { origin, dx })
    }

    /// Source position sampled by output multi-index `index`.
    pub fn point_at(&self, index: &[usize; N]) -> [f64; N] {
        let mut point = self.origin;
        for (&i, step) in index.iter().zip(&self.dx) {
            for (p, d) in point.iter_mut().zip(step) {
                *p += i as f64 * d;
            }
        }
        point
    }

    /// Source position of the first cell of row `i` along axis 0.
    #[inline]
    pub(crate) fn row_origin(&self, i: usize) -> [f64; N] {
        let mut point = self.origin;
        for (p, d) in point.iter_mut().zip(&self.dx[0]) {
            *p += i as f64 * d;
        }
        point
    }
}

/// Geometric center `(extent - 1) / 2` of each axis.
pub fn grid_center<const N: usize>(shape: &[usize; N]) -> [f64; N] {
    let mut center = [0.0; N];
    for (c, &extent) in center.iter_mut().zip(shape) {
        *c = (extent as f64 - 1.0) / 2.0;
    }
    center
}
