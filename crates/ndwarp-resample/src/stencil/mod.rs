//! Per-cell sample patches and the operations that fill and reduce them.
//!
//! A [`Stencil`] holds the `K^N` source samples an interpolation kernel with `K`
//! points needs around one sample position. [`extract`] fills it from a source view
//! through a [`Boundary`](crate::boundary::Boundary) policy and [`collapse`] reduces it
//! to a single value by repeated 1D interpolation.

mod collapse;
mod extract;

pub use collapse::collapse;
pub use extract::{extract, split_point};

/// Scratch patch of `points^N` samples stored row-major.
///
/// Element `[i0, .., iN-1]` lives at offset `sum(i_a * points^(N-1-a))`, so fixing the
/// outer index `i0` selects a contiguous `(N-1)`-dimensional slice of length
/// `points^(N-1)`.
///
/// A worker allocates one stencil and overwrites it for every output cell it visits.
#[derive(Debug, Clone)]
pub struct Stencil<T, const N: usize> {
    data: Vec<T>,
    points: usize,
}

impl<T: Copy, const N: usize> Stencil<T, N> {
    /// Allocates a stencil with `points` samples per axis, every element set to `fill`.
    pub fn new(points: usize, fill: T) -> Self {
        let len = (0..N).fold(1usize, |acc, _| acc * points);
        Self {
            data: vec![fill; len],
            points,
        }
    }

    /// Number of samples along each axis.
    #[inline]
    pub fn points(&self) -> usize {
        self.points
    }

    /// Total number of samples, `points^N`.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the stencil holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Offset of a multi-index inside the flat buffer.
    #[inline]
    pub fn offset_of(&self, index: &[usize; N]) -> usize {
        index.iter().fold(0, |acc, &i| acc * self.points + i)
    }

    /// Returns the sample at `index`, or `None` if any component is `>= points`.
    pub fn get(&self, index: [usize; N]) -> Option<&T> {
        if index.iter().any(|&i| i >= self.points) {
            return None;
        }
        self.data.get(self.offset_of(&index))
    }

    /// The samples in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::Stencil;

    #[test]
    fn sizes() {
        assert_eq!(Stencil::<f32, 1>::new(2, 0.0).len(), 2);
        assert_eq!(Stencil::<f32, 3>::new(4, 0.0).len(), 64);
        assert_eq!(Stencil::<u8, 5>::new(4, 0).len(), 1024);
    }

    #[test]
    fn row_major_offsets() {
        let s = Stencil::<f64, 3>::new(4, 0.0);
        assert_eq!(s.offset_of(&[0, 0, 1]), 1);
        assert_eq!(s.offset_of(&[0, 1, 0]), 4);
        assert_eq!(s.offset_of(&[1, 0, 0]), 16);
        assert_eq!(s.offset_of(&[3, 3, 3]), 63);
        assert!(s.get([0, 4, 0]).is_none());
    }
}
