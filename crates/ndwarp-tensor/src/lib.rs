#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `ndwarp-tensor` holds the storage types the resampling engine reads from and
//! writes to: an owned row-major [`Tensor`] with compile-time rank, a read-only
//! strided [`TensorView`] over a caller-owned slice, and a mutable contiguous
//! [`TensorViewMut`].
//!
//! ```rust
//! use ndwarp_tensor::{Tensor3, TensorView};
//!
//! let volume = Tensor3::<f32>::from_shape_fn([2, 3, 4], |[z, y, x]| (z * 12 + y * 4 + x) as f32);
//! assert_eq!(volume.get([1, 2, 3]), Some(&23.0));
//!
//! let raw = volume.as_slice();
//! let view = TensorView::from_slice([2, 3, 4], raw).unwrap();
//! assert_eq!(view.get([0, 1, 0]), Some(&4.0));
//! ```

/// Tensor module containing the owned tensor implementation and error types.
pub mod tensor;

/// View module containing non-owning tensor views.
pub mod view;

pub use crate::tensor::{get_strides_from_shape, Tensor, TensorError};
pub use crate::view::{TensorView, TensorViewMut};

/// Type alias for a 1-dimensional tensor.
pub type Tensor1<T> = Tensor<T, 1>;

/// Type alias for a 2-dimensional tensor.
pub type Tensor2<T> = Tensor<T, 2>;

/// Type alias for a 3-dimensional tensor.
pub type Tensor3<T> = Tensor<T, 3>;

/// Type alias for a 4-dimensional tensor.
pub type Tensor4<T> = Tensor<T, 4>;

/// Type alias for a 5-dimensional tensor.
pub type Tensor5<T> = Tensor<T, 5>;
