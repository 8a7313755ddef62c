//! Affine resampling of n-dimensional arrays.
//!
//! The output grid is described by an [`AffineBasis`] in source coordinates. For every
//! output index the engine extracts a `K^N` stencil from the source, collapses it with
//! the selected kernel and writes the result. Work is split along the first output
//! axis.
//!
//! - [`transform`] / [`transform_with`]: compile-time rank, caller-provided basis.
//! - [`transform_dyn`]: runtime rank in `1..=5`, flat buffers and shapes.
//! - [`warp_affine`] / [`warp_affine_into`]: forward transform with a rotation center.

mod affine;
mod basis;
mod dynamic;
mod transform;

pub use affine::{warp_affine, warp_affine_into};
pub use basis::{grid_center, AffineBasis};
pub use dynamic::transform_dyn;
pub use transform::{transform, transform_with};
