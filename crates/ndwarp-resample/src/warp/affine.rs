use ndwarp_tensor::{Tensor, TensorView, TensorViewMut};

use super::{grid_center, transform, AffineBasis};
use crate::{
    boundary::BoundaryMode, error::ResampleError, interpolation::InterpolationMode,
    sample::Sample,
};

/// Applies the forward affine transform `y = A (x - c) + c + t` to `src`.
///
/// The output has the shape of `src`. Output element `y` reads the source at
/// `A⁻¹ (y - t - c) + c`; points that fall outside the source read `background`.
///
/// # Arguments
///
/// * `src` - The array to transform.
/// * `linear` - The linear part `A`, row-major.
/// * `translation` - The translation `t`, applied after `A`.
/// * `center` - The center `c` of the linear part. Defaults to the grid center
///   `(extent - 1) / 2` of every axis.
/// * `interpolation` - The interpolation mode to use.
/// * `background` - The value of points outside the source.
///
/// # Errors
///
/// Returns `SingularMatrix` if `linear` cannot be inverted.
///
/// # Example
///
/// ```
/// use ndwarp_resample::{interpolation::InterpolationMode, warp::warp_affine};
/// use ndwarp_tensor::Tensor2;
///
/// let src = Tensor2::from_shape_vec([2, 2], vec![1.0f64, 2.0, 3.0, 4.0]).unwrap();
///
/// // quarter turn about the center of the grid
/// let rotation = [[0.0, -1.0], [1.0, 0.0]];
/// let dst = warp_affine(
///     &src.view(),
///     &rotation,
///     &[0.0, 0.0],
///     None,
///     InterpolationMode::Linear,
///     0.0,
/// )
/// .unwrap();
///
/// let rounded: Vec<f64> = dst.as_slice().iter().map(|v| v.round()).collect();
/// assert_eq!(rounded, vec![2.0, 4.0, 1.0, 3.0]);
/// ```
pub fn warp_affine<T: Sample, const N: usize>(
    src: &TensorView<'_, T, N>,
    linear: &[[f64; N]; N],
    translation: &[f64; N],
    center: Option<[f64; N]>,
    interpolation: InterpolationMode,
    background: T,
) -> Result<Tensor<T, N>, ResampleError> {
    let mut dst = Tensor::from_shape_val(src.shape, background);
    warp_affine_into(
        src,
        &mut dst.view_mut(),
        linear,
        translation,
        center,
        interpolation,
        background,
    )?;
    Ok(dst)
}

/// Same as [`warp_affine`], writing into a caller-provided destination.
///
/// # Errors
///
/// Returns `ShapeMismatch` if `dst` does not have the shape of `src`, and
/// `SingularMatrix` if `linear` cannot be inverted. `dst` is untouched on error.
pub fn warp_affine_into<T: Sample, const N: usize>(
    src: &TensorView<'_, T, N>,
    dst: &mut TensorViewMut<'_, T, N>,
    linear: &[[f64; N]; N],
    translation: &[f64; N],
    center: Option<[f64; N]>,
    interpolation: InterpolationMode,
    background: T,
) -> Result<(), ResampleError> {
    if dst.shape != src.shape {
        return Err(ResampleError::ShapeMismatch {
            expected: src.shape.to_vec(),
            actual: dst.shape.to_vec(),
        });
    }
    let center = center.unwrap_or_else(|| grid_center(&src.shape));
    let basis = AffineBasis::from_forward(linear, translation, &center)?;

    transform(
        &basis,
        src,
        dst,
        background,
        interpolation,
        BoundaryMode::Constant,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndwarp_tensor::Tensor2;

    #[test]
    fn identity_keeps_values() -> Result<(), ResampleError> {
        let src = Tensor2::from_shape_fn([4, 3], |[r, c]| (r * 3 + c) as f32);
        let eye = AffineBasis::<2>::identity().dx;
        for mode in [InterpolationMode::Linear, InterpolationMode::Cubic] {
            let dst = warp_affine(&src.view(), &eye, &[0.0, 0.0], None, mode, -1.0)?;
            assert_eq!(dst, src);
        }
        Ok(())
    }

    #[test]
    fn translation_pads_with_background() -> Result<(), ResampleError> {
        let src = Tensor2::from_shape_val([3, 4], 5u8);
        let eye = AffineBasis::<2>::identity().dx;
        let dst = warp_affine(
            &src.view(),
            &eye,
            &[0.0, 2.0],
            None,
            InterpolationMode::Linear,
            1,
        )?;
        assert_eq!(dst.as_slice(), &[1, 1, 5, 5, 1, 1, 5, 5, 1, 1, 5, 5]);
        Ok(())
    }

    #[test]
    fn half_turn_about_center() -> Result<(), ResampleError> {
        let src = Tensor2::from_shape_vec([2, 3], vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0])?;
        let half_turn = [[-1.0, 0.0], [0.0, -1.0]];
        let dst = warp_affine(
            &src.view(),
            &half_turn,
            &[0.0, 0.0],
            None,
            InterpolationMode::Cubic,
            0.0,
        )?;
        let expected = [6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        for (a, b) in dst.as_slice().iter().zip(expected) {
            assert_relative_eq!(*a, b, epsilon = 1e-10);
        }
        Ok(())
    }

    #[test]
    fn explicit_center() -> Result<(), ResampleError> {
        // scaling by 2 about index 0 reads source index y / 2
        let src = Tensor2::from_shape_fn([1, 5], |[_, c]| c as f64 * 2.0);
        let scale = [[1.0, 0.0], [0.0, 2.0]];
        let dst = warp_affine(
            &src.view(),
            &scale,
            &[0.0, 0.0],
            Some([0.0, 0.0]),
            InterpolationMode::Linear,
            0.0,
        )?;
        let expected = [0.0, 1.0, 2.0, 3.0, 4.0];
        for (a, b) in dst.as_slice().iter().zip(expected) {
            assert_relative_eq!(*a, b, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn singular_linear_part() {
        let src = Tensor2::from_shape_val([2, 2], 1.0f32);
        let res = warp_affine(
            &src.view(),
            &[[0.0, 0.0], [0.0, 1.0]],
            &[0.0, 0.0],
            None,
            InterpolationMode::Linear,
            0.0,
        );
        assert_eq!(res, Err(ResampleError::SingularMatrix));
    }

    #[test]
    fn into_existing_destination() -> Result<(), ResampleError> {
        let src = Tensor2::from_shape_vec([2, 3], vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0])?;
        let mut dst = Tensor2::from_shape_val([2, 3], f64::NAN);
        let eye = AffineBasis::<2>::identity().dx;
        warp_affine_into(
            &src.view(),
            &mut dst.view_mut(),
            &eye,
            &[1.0, 0.0],
            None,
            InterpolationMode::Linear,
            0.0,
        )?;
        assert_eq!(dst.as_slice(), &[0.0, 0.0, 0.0, 1.0, 2.0, 3.0]);
        Ok(())
    }

    #[test]
    fn into_rejects_other_shape() {
        let src = Tensor2::from_shape_val([2, 3], 1.0f32);
        let mut dst = Tensor2::from_shape_val([3, 2], 4.0f32);
        let res = warp_affine_into(
            &src.view(),
            &mut dst.view_mut(),
            &AffineBasis::<2>::identity().dx,
            &[0.0, 0.0],
            None,
            InterpolationMode::Cubic,
            0.0,
        );
        assert_eq!(
            res,
            Err(ResampleError::ShapeMismatch {
                expected: vec![2, 3],
                actual: vec![3, 2],
            })
        );
        assert_eq!(dst.as_slice(), &[4.0; 6]);
    }
}
