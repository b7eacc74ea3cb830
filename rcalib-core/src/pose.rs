//! Conversions between translation/quaternion pairs and homogeneous transforms.
//!
//! Calibration files store quaternions as `(w, x, y, z)`; the conversion here
//! takes them as `(x, y, z, w)`, use [`quaternion_wxyz_to_xyzw`] in between.

use anyhow::{bail, Result};
use sophus::nalgebra::{Isometry3, Quaternion as NaQuaternion, Translation3, UnitQuaternion};

use crate::{Quaternion, Real, Transform, Translation};

const MIN_QUATERNION_NORM: Real = 1e-12;

/// Reorders a `(w, x, y, z)` quaternion into `(x, y, z, w)`.
pub fn quaternion_wxyz_to_xyzw(quaternion: &Quaternion) -> Quaternion {
    Quaternion::new(quaternion[1], quaternion[2], quaternion[3], quaternion[0])
}

/// Builds the 4x4 rigid transform for `translation` and an `(x, y, z, w)` quaternion.
///
/// The quaternion is normalised before use.
pub fn convert_vec_to_matrix(
    translation: &Translation,
    quaternion_xyzw: &Quaternion,
) -> Result<Transform> {
    let q = NaQuaternion::new(
        quaternion_xyzw[3],
        quaternion_xyzw[0],
        quaternion_xyzw[1],
        quaternion_xyzw[2],
    );
    if q.norm() < MIN_QUATERNION_NORM {
        bail!("quaternion {:?} has zero norm", quaternion_xyzw.as_slice());
    }
    let rotation = UnitQuaternion::from_quaternion(q);

    Ok(Isometry3::from_parts(Translation3::from(*translation), rotation).to_homogeneous())
}

/// General matrix inverse, rigidity of the input is not checked.
pub fn invert_transform(transform: &Transform) -> Result<Transform> {
    match transform.try_inverse() {
        Some(inverse) => Ok(inverse),
        None => bail!("transform is singular: {}", transform),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: Real = 1e-12;

    #[test]
    fn test_unit_z_translation() {
        let t = convert_vec_to_matrix(
            &Translation::new(0.0, 0.0, 1.0),
            &Quaternion::new(0.0, 0.0, 0.0, 1.0),
        )
        .unwrap();

        #[rustfmt::skip]
        let expected = Transform::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 1.0,
            0.0, 0.0, 0.0, 1.0,
        );
        assert!((t - expected).norm() < EPS);

        let inv = invert_transform(&t).unwrap();
        assert!((inv[(0, 3)]).abs() < EPS);
        assert!((inv[(1, 3)]).abs() < EPS);
        assert!((inv[(2, 3)] + 1.0).abs() < EPS);
    }

    #[test]
    fn test_reorder_wxyz() {
        let q = quaternion_wxyz_to_xyzw(&Quaternion::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(q, Quaternion::new(2.0, 3.0, 4.0, 1.0));
    }

    #[test]
    fn test_rotation_about_z() {
        // 90 degrees about z, stored as (w, x, y, z)
        let half = std::f64::consts::FRAC_1_SQRT_2;
        let q = quaternion_wxyz_to_xyzw(&Quaternion::new(half, 0.0, 0.0, half));
        let t = convert_vec_to_matrix(&Translation::new(1.0, 2.0, 3.0), &q).unwrap();

        let x_axis = t * sophus::nalgebra::Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert!((x_axis - sophus::nalgebra::Vector4::new(0.0, 1.0, 0.0, 0.0)).norm() < EPS);

        let inv = invert_transform(&t).unwrap();
        assert!((t * inv - Transform::identity()).norm() < EPS);
    }

    #[test]
    fn test_unnormalised_quaternion() {
        let t = convert_vec_to_matrix(&Translation::zeros(), &Quaternion::new(0.0, 0.0, 0.0, 2.0))
            .unwrap();
        assert!((t - Transform::identity()).norm() < EPS);
    }

    #[test]
    fn test_zero_quaternion() {
        assert!(convert_vec_to_matrix(&Translation::zeros(), &Quaternion::zeros()).is_err());
    }

    #[test]
    fn test_singular_transform() {
        assert!(invert_transform(&Transform::zeros()).is_err());
    }
}
