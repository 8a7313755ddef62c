use crate::{get_strides_from_shape, Tensor, TensorError};

/// A non-owning, read-only view into n-dimensional data.
///
/// The view borrows a caller-owned slice and describes it with its own shape and
/// strides, so permuted or sub-sampled layouts can be read without copying.
///
/// # Examples
///
/// ```rust
/// use ndwarp_tensor::TensorView;
///
/// let data = [1, 2, 3, 4, 5, 6];
/// // a 3x2 view that walks a row-major 2x3 buffer column by column
/// let view = TensorView::from_slice_strided([3, 2], [1, 3], &data).unwrap();
/// assert_eq!(view.get([2, 1]), Some(&6));
/// assert_eq!(view.get([0, 1]), Some(&4));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TensorView<'a, T, const N: usize> {
    /// Reference to the borrowed elements.
    pub data: &'a [T],

    /// The shape of the view.
    pub shape: [usize; N],

    /// The strides for accessing elements in the view.
    pub strides: [usize; N],
}

impl<'a, T, const N: usize> TensorView<'a, T, N> {
    /// Creates a row-major view over `data`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidShape` if `data` does not hold exactly the shape's element count.
    pub fn from_slice(shape: [usize; N], data: &'a [T]) -> Result<Self, TensorError> {
        let numel = shape.iter().product::<usize>();
        if numel != data.len() {
            return Err(TensorError::invalid_shape(numel, data.len()));
        }
        Ok(Self {
            data,
            shape,
            strides: get_strides_from_shape(shape),
        })
    }

    /// Creates a view over `data` with explicit strides.
    ///
    /// # Errors
    ///
    /// Returns `ViewOutOfBounds` if the furthest element addressed by the layout lies
    /// past the end of `data`.
    pub fn from_slice_strided(
        shape: [usize; N],
        strides: [usize; N],
        data: &'a [T],
    ) -> Result<Self, TensorError> {
        let view = Self {
            data,
            shape,
            strides,
        };
        view.check_layout()?;
        Ok(view)
    }

    /// Checks that every element addressed by the shape and strides lies inside the
    /// borrowed slice.
    ///
    /// # Errors
    ///
    /// Returns `ViewOutOfBounds` if the layout reaches past the end of `data`.
    pub fn check_layout(&self) -> Result<(), TensorError> {
        let required = required_len(&self.shape, &self.strides);
        if required > self.data.len() {
            return Err(TensorError::ViewOutOfBounds {
                required,
                len: self.data.len(),
            });
        }
        Ok(())
    }

    /// Returns the number of elements addressed by the view.
    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Returns a reference to the element at `index`, or `None` if out of bounds.
    pub fn get(&self, index: [usize; N]) -> Option<&'a T> {
        if index.iter().zip(&self.shape).any(|(&i, &dim)| i >= dim) {
            return None;
        }
        self.data.get(self.offset_of(&index))
    }

    /// Returns the element at `index` without checking the shape.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset lies outside the borrowed slice.
    #[inline]
    pub fn get_unchecked(&self, index: [usize; N]) -> &'a T {
        &self.data[self.offset_of(&index)]
    }

    /// Memory offset of `index` under the view's strides.
    #[inline]
    pub fn offset_of(&self, index: &[usize; N]) -> usize {
        index
            .iter()
            .zip(&self.strides)
            .fold(0, |acc, (&i, &s)| acc + i * s)
    }

    /// Copies the view into an owned, row-major tensor.
    pub fn as_contiguous(&self) -> Tensor<T, N>
    where
        T: Clone,
    {
        Tensor::from_shape_fn(self.shape, |index| self.get_unchecked(index).clone())
    }
}

/// A mutable view over a caller-owned, row-major contiguous buffer.
///
/// Writers that split work along the first axis rely on the contiguous layout: rows
/// `a..b` of axis 0 are always the single slice `a * stride0..b * stride0`.
#[derive(Debug)]
pub struct TensorViewMut<'a, T, const N: usize> {
    /// Reference to the borrowed elements.
    pub data: &'a mut [T],

    /// The shape of the view.
    pub shape: [usize; N],
}

impl<'a, T, const N: usize> TensorViewMut<'a, T, N> {
    /// Creates a mutable row-major view over `data`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidShape` if `data` does not hold exactly the shape's element count.
    pub fn from_slice_mut(shape: [usize; N], data: &'a mut [T]) -> Result<Self, TensorError> {
        let numel = shape.iter().product::<usize>();
        if numel != data.len() {
            return Err(TensorError::invalid_shape(numel, data.len()));
        }
        Ok(Self { data, shape })
    }

    /// Checks that the buffer holds exactly the shape's element count.
    ///
    /// # Errors
    ///
    /// Returns `InvalidShape` on a mismatch.
    pub fn check_layout(&self) -> Result<(), TensorError> {
        let numel = self.shape.iter().product::<usize>();
        if numel != self.data.len() {
            return Err(TensorError::invalid_shape(numel, self.data.len()));
        }
        Ok(())
    }

    /// Returns the row-major strides of the view.
    #[inline]
    pub fn strides(&self) -> [usize; N] {
        get_strides_from_shape(self.shape)
    }

    /// Returns the number of elements in the view.
    #[inline]
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Get the data of the view as a mutable slice.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut *self.data
    }

    /// Get the data of the view as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &*self.data
    }

    /// Returns a mutable reference to the element at `index`, or `None` if out of bounds.
    pub fn get_mut(&mut self, index: [usize; N]) -> Option<&mut T> {
        if index.iter().zip(&self.shape).any(|(&i, &dim)| i >= dim) {
            return None;
        }
        let offset = index
            .iter()
            .zip(self.strides().iter())
            .fold(0, |acc, (&i, &s)| acc + i * s);
        self.data.get_mut(offset)
    }
}

fn required_len<const N: usize>(shape: &[usize; N], strides: &[usize; N]) -> usize {
    if shape.iter().any(|&dim| dim == 0) {
        return 0;
    }
    1 + shape
        .iter()
        .zip(strides)
        .map(|(&dim, &stride)| (dim - 1) * stride)
        .sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_from_slice() -> Result<(), TensorError> {
        let data = vec![1u8, 2, 3, 4, 5, 6];
        let view = TensorView::from_slice([2, 3], &data)?;
        assert_eq!(view.strides, [3, 1]);
        assert_eq!(view.get([1, 2]), Some(&6));
        assert_eq!(view.get([2, 0]), None);
        Ok(())
    }

    #[test]
    fn strided_view_out_of_bounds() {
        let data = [0f32; 5];
        let res = TensorView::from_slice_strided([2, 3], [3, 1], &data);
        assert_eq!(
            res.err(),
            Some(TensorError::ViewOutOfBounds {
                required: 6,
                len: 5
            })
        );
    }

    #[test]
    fn hand_built_layouts_are_checked() {
        let data = [0u8; 6];
        let view = TensorView {
            data: &data,
            shape: [3, 2],
            strides: [3, 1],
        };
        assert_eq!(
            view.check_layout(),
            Err(TensorError::ViewOutOfBounds {
                required: 8,
                len: 6
            })
        );

        let mut out = [0u8; 5];
        let view_mut = TensorViewMut {
            data: &mut out,
            shape: [3, 2],
        };
        assert_eq!(
            view_mut.check_layout(),
            Err(TensorError::invalid_shape(6, 5))
        );
    }

    #[test]
    fn strided_view_every_other() -> Result<(), TensorError> {
        let data: Vec<i32> = (0..10).collect();
        let view = TensorView::from_slice_strided([5], [2], &data)?;
        assert_eq!(view.as_contiguous().as_slice(), &[0, 2, 4, 6, 8]);
        Ok(())
    }

    #[test]
    fn empty_strided_view() -> Result<(), TensorError> {
        let data: [u8; 0] = [];
        let view = TensorView::from_slice_strided([0, 3], [3, 1], &data)?;
        assert_eq!(view.numel(), 0);
        Ok(())
    }

    #[test]
    fn view_mut_writes_through() -> Result<(), TensorError> {
        let mut data = vec![0u16; 6];
        {
            let mut view = TensorViewMut::from_slice_mut([3, 2], &mut data)?;
            assert_eq!(view.strides(), [2, 1]);
            *view.get_mut([2, 1]).ok_or(TensorError::index_out_of_bounds(2, 3))? = 7;
            assert!(view.get_mut([3, 0]).is_none());
        }
        assert_eq!(data, vec![0, 0, 0, 0, 0, 7]);
        Ok(())
    }

    #[test]
    fn tensor_view_mut_roundtrip() {
        let mut t = Tensor::<f64, 2>::zeros([2, 2]);
        t.view_mut().as_slice_mut()[3] = 1.0;
        assert_eq!(t.view().get([1, 1]), Some(&1.0));
    }
}
