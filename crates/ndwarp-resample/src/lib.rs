#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! The engine fills an output array by sampling a source array at the points of an
//! affine grid. Every output element is the interpolation of a `K^N` neighbourhood of
//! source voxels, where `K` is 2 for linear and 4 for cubic interpolation; voxels
//! outside the source read a constant background value.
//!
//! ```rust
//! use ndwarp_resample::{
//!     boundary::BoundaryMode,
//!     interpolation::InterpolationMode,
//!     parallel::ExecutionStrategy,
//!     warp::{transform_with, AffineBasis},
//! };
//! use ndwarp_tensor::Tensor3;
//!
//! let src = Tensor3::from_shape_fn([4, 4, 4], |[z, y, x]| (z + y + x) as f32);
//! let mut dst = Tensor3::from_shape_val([2, 2, 2], 0.0f32);
//!
//! // sample every second voxel, starting half a voxel in
//! let basis = AffineBasis::new([0.5; 3], [[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]]);
//! transform_with(
//!     &basis,
//!     &src.view(),
//!     &mut dst.view_mut(),
//!     0.0,
//!     InterpolationMode::Linear,
//!     BoundaryMode::Constant,
//!     ExecutionStrategy::Serial,
//! )
//! .unwrap();
//!
//! assert_eq!(dst.as_slice()[0], 1.5);
//! assert_eq!(dst.as_slice()[7], 7.5);
//! ```

pub mod boundary;

mod error;
pub use error::ResampleError;

pub mod interpolation;

pub mod linalg;

/// Static partitioning of the output grid over worker threads.
pub mod parallel;
pub use parallel::ParallelError;

mod sample;
pub use sample::Sample;

pub mod stencil;

pub mod warp;
