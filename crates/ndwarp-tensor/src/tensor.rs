use thiserror::Error;

use crate::view::{TensorView, TensorViewMut};

/// An error type for tensor operations.
#[derive(Error, Debug, PartialEq)]
pub enum TensorError {
    /// Tensor shape does not match the provided data.
    ///
    /// The product of the shape extents must equal the number of elements.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements in the data
        actual: usize,
    },

    /// Index exceeds tensor bounds.
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index that was attempted
        index: usize,
        /// The size of the dimension being indexed
        size: usize,
    },

    /// A strided view would read past the end of the borrowed slice.
    ///
    /// # Recommended Actions
    /// - Check that the strides were computed for the slice being borrowed
    /// - Verify the shape matches the layout of the caller's buffer
    #[error("View out of bounds: layout requires {required} elements, but slice holds {len}")]
    ViewOutOfBounds {
        /// Minimum slice length the shape and strides need
        required: usize,
        /// Actual slice length
        len: usize,
    },

    /// An axis list is not a permutation of `0..N`.
    #[error("Axes {0:?} are not a permutation of the tensor axes")]
    InvalidPermutation(Vec<usize>),
}

impl TensorError {
    /// Creates an InvalidShape error with clear context.
    pub fn invalid_shape(expected: usize, actual: usize) -> Self {
        Self::InvalidShape { expected, actual }
    }

    /// Creates an IndexOutOfBounds error with clear context.
    pub fn index_out_of_bounds(index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }
}

/// Computes the strides for a row-major (C-contiguous) tensor layout.
///
/// For row-major layout, the rightmost dimension has stride 1, and each dimension's
/// stride is the product of all dimensions to its right.
///
/// # Examples
///
/// ```rust
/// use ndwarp_tensor::get_strides_from_shape;
///
/// let strides = get_strides_from_shape([2, 3, 4]);
/// assert_eq!(strides, [12, 4, 1]);
/// ```
pub fn get_strides_from_shape<const N: usize>(shape: [usize; N]) -> [usize; N] {
    let mut strides: [usize; N] = [0; N];
    let mut stride = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = stride;
        stride *= shape[i];
    }
    strides
}

/// A multi-dimensional array with owned, row-major data.
///
/// # Type Parameters
///
/// * `T` - The element type stored in the tensor
/// * `N` - The number of dimensions (const generic, checked at compile time)
///
/// # Examples
///
/// ```rust
/// use ndwarp_tensor::Tensor2;
///
/// let t = Tensor2::<u8>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
/// assert_eq!(t.shape, [2, 2]);
/// assert_eq!(t.get([1, 0]), Some(&3));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor<T, const N: usize> {
    /// The storage of the tensor.
    pub storage: Vec<T>,
    /// The shape of the tensor.
    pub shape: [usize; N],
    /// The strides of the tensor data in memory.
    pub strides: [usize; N],
}

impl<T, const N: usize> Tensor<T, N> {
    /// Get the data of the tensor as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.storage
    }

    /// Get the data of the tensor as a mutable slice.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.storage
    }

    /// Consumes the tensor and returns the underlying vector.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.storage
    }

    /// Creates a new `Tensor` with the given shape and data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape of the tensor, an error is returned.
    pub fn from_shape_vec(shape: [usize; N], data: Vec<T>) -> Result<Self, TensorError> {
        let numel = shape.iter().product::<usize>();
        if numel != data.len() {
            return Err(TensorError::invalid_shape(numel, data.len()));
        }
        Ok(Self {
            storage: data,
            shape,
            strides: get_strides_from_shape(shape),
        })
    }

    /// Creates a new `Tensor` filled with a single value.
    pub fn from_shape_val(shape: [usize; N], value: T) -> Self
    where
        T: Clone,
    {
        let numel = shape.iter().product::<usize>();
        Self {
            storage: vec![value; numel],
            shape,
            strides: get_strides_from_shape(shape),
        }
    }

    /// Creates a new `Tensor` by evaluating `f` at every multi-index in row-major order.
    ///
    /// # Example
    ///
    /// ```
    /// use ndwarp_tensor::Tensor2;
    ///
    /// let eye = Tensor2::<f64>::from_shape_fn([2, 2], |[i, j]| if i == j { 1.0 } else { 0.0 });
    /// assert_eq!(eye.as_slice(), &[1.0, 0.0, 0.0, 1.0]);
    /// ```
    pub fn from_shape_fn<F>(shape: [usize; N], mut f: F) -> Self
    where
        F: FnMut([usize; N]) -> T,
    {
        let numel = shape.iter().product::<usize>();
        let strides = get_strides_from_shape(shape);
        let storage = (0..numel)
            .map(|offset| f(unravel_index(offset, &shape, &strides)))
            .collect();
        Self {
            storage,
            shape,
            strides,
        }
    }

    /// Creates a new `Tensor` filled with zeros.
    pub fn zeros(shape: [usize; N]) -> Self
    where
        T: num_traits::Zero + Clone,
    {
        Self::from_shape_val(shape, T::zero())
    }

    /// Returns the number of elements in the tensor.
    #[inline]
    pub fn numel(&self) -> usize {
        self.storage.len()
    }

    /// Returns the memory offset of `index`, or `None` if any axis is out of bounds.
    pub fn get_iter_offset(&self, index: [usize; N]) -> Option<usize> {
        let mut offset = 0;
        for ((&idx, &dim), &stride) in index.iter().zip(&self.shape).zip(&self.strides) {
            if idx >= dim {
                return None;
            }
            offset += idx * stride;
        }
        Some(offset)
    }

    /// Returns the multi-index stored at a memory offset.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `offset` is past the last element.
    pub fn get_index(&self, offset: usize) -> Result<[usize; N], TensorError> {
        if offset >= self.numel() {
            return Err(TensorError::index_out_of_bounds(offset, self.numel()));
        }
        Ok(unravel_index(offset, &self.shape, &self.strides))
    }

    /// Returns a reference to the element at `index`, or `None` if out of bounds.
    pub fn get(&self, index: [usize; N]) -> Option<&T> {
        self.get_iter_offset(index)
            .and_then(|offset| self.storage.get(offset))
    }

    /// Returns a reference to the element at `index` without checking the shape.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset lies outside the storage.
    pub fn get_unchecked(&self, index: [usize; N]) -> &T {
        let offset = index
            .iter()
            .zip(&self.strides)
            .fold(0, |acc, (&i, &s)| acc + i * s);
        &self.storage[offset]
    }

    /// Borrows the tensor as a read-only view.
    pub fn view(&self) -> TensorView<'_, T, N> {
        TensorView {
            data: &self.storage,
            shape: self.shape,
            strides: self.strides,
        }
    }

    /// Borrows the tensor as a mutable, contiguous view.
    pub fn view_mut(&mut self) -> TensorViewMut<'_, T, N> {
        TensorViewMut {
            data: &mut self.storage,
            shape: self.shape,
        }
    }

    /// Returns a view with the axes reordered.
    ///
    /// `axes[i]` names the source axis that becomes axis `i` of the view.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPermutation` unless every axis in `0..N` appears exactly once.
    pub fn permute_axes(&self, axes: [usize; N]) -> Result<TensorView<'_, T, N>, TensorError> {
        let mut seen = [false; N];
        for &axis in &axes {
            if axis >= N || seen[axis] {
                return Err(TensorError::InvalidPermutation(axes.to_vec()));
            }
            seen[axis] = true;
        }

        let mut shape = [0; N];
        let mut strides = [0; N];
        for (i, &axis) in axes.iter().enumerate() {
            shape[i] = self.shape[axis];
            strides[i] = self.strides[axis];
        }
        Ok(TensorView {
            data: &self.storage,
            shape,
            strides,
        })
    }

    /// Applies `f` to every element and returns a new tensor of the same shape.
    pub fn map<U, F>(&self, f: F) -> Tensor<U, N>
    where
        F: Fn(&T) -> U,
    {
        Tensor {
            storage: self.storage.iter().map(f).collect(),
            shape: self.shape,
            strides: self.strides,
        }
    }

    /// Returns true if the strides describe a row-major contiguous layout.
    pub fn is_standard_layout(&self) -> bool {
        self.strides == get_strides_from_shape(self.shape)
    }
}

pub(crate) fn unravel_index<const N: usize>(
    mut offset: usize,
    shape: &[usize; N],
    strides: &[usize; N],
) -> [usize; N] {
    let mut index = [0; N];
    for axis in 0..N {
        if shape[axis] == 0 || strides[axis] == 0 {
            continue;
        }
        index[axis] = offset / strides[axis];
        offset %= strides[axis];
    }
    index
}
