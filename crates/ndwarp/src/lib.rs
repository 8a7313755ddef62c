#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! ```rust
//! use ndwarp::{
//!     resample::{interpolation::InterpolationMode, warp::warp_affine},
//!     tensor::Tensor2,
//! };
//!
//! let image = Tensor2::from_shape_val([3, 3], 2.0f32);
//! let eye = [[1.0, 0.0], [0.0, 1.0]];
//! let out = warp_affine(&image.view(), &eye, &[0.0, 1.0], None, InterpolationMode::Cubic, 0.0)?;
//! assert_eq!(out.as_slice(), &[0.0, 2.0, 2.0, 0.0, 2.0, 2.0, 0.0, 2.0, 2.0]);
//! # Ok::<(), ndwarp::resample::ResampleError>(())
//! ```

#[doc(inline)]
pub use ndwarp_tensor as tensor;

#[doc(inline)]
pub use ndwarp_resample as resample;
