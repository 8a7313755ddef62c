//! One-dimensional interpolation kernels.
//!
//! A kernel reads a fixed number of consecutive samples and a fractional position
//! `t` in `[0, 1)` measured from the second-to-last "lower" sample, and returns the
//! interpolated value. N-dimensional interpolation is built from these by
//! [`crate::stencil::collapse`].
//!
//! # Interpolation Modes
//!
//! - **Linear**: two-point linear interpolation
//! - **Cubic**: four-point uniform Catmull-Rom spline, evaluated on the raw samples

mod cubic;
mod linear;

pub use cubic::Cubic;
pub use linear::Linear;

use crate::sample::Sample;

/// A 1D interpolation kernel with a fixed support.
pub trait Kernel: Copy + Send + Sync + 'static {
    /// Number of consecutive samples the kernel reads.
    const POINTS: usize;

    /// Interpolates `points[..Self::POINTS]` at fractional position `t`.
    ///
    /// The arithmetic runs in `f64`; the result is narrowed to `T` without rounding.
    fn evaluate<T: Sample>(points: &[T], t: f64) -> T;
}

/// Interpolation mode for the resampling operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationMode {
    /// Linear interpolation
    #[default]
    Linear,
    /// Cubic (Catmull-Rom) interpolation
    Cubic,
}

impl InterpolationMode {
    /// Number of samples per axis the mode needs around each point.
    pub fn points(&self) -> usize {
        match self {
            InterpolationMode::Linear => Linear::POINTS,
            InterpolationMode::Cubic => Cubic::POINTS,
        }
    }
}

impl std::fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterpolationMode::Linear => write!(f, "linear"),
            InterpolationMode::Cubic => write!(f, "cubic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_points() {
        assert_eq!(InterpolationMode::Linear.points(), 2);
        assert_eq!(InterpolationMode::Cubic.points(), 4);
        assert_eq!(InterpolationMode::default(), InterpolationMode::Linear);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn mode_serde() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&InterpolationMode::Cubic)?;
        assert_eq!(json, "\"Cubic\"");
        let mode: InterpolationMode = serde_json::from_str("\"Linear\"")?;
        assert_eq!(mode, InterpolationMode::Linear);
        Ok(())
    }
}
