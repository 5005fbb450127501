//! Object placement
//!
//! Placement is ephemeral: a scale, three axis rotations in degrees, and
//! a translation exist only long enough to be composed into one model
//! matrix and broadcast. Composition order is translation * Rz * Ry * Rx
//! * scale, so scale applies first and the X rotation leads the euler
//! chain.

use glam::{Mat4, Vec3};

/// Compose a model matrix from scale, XYZ euler rotation in degrees,
/// and translation
pub fn compose_transform(scale: Vec3, rotation_degrees: Vec3, translation: Vec3) -> Mat4 {
    let rotation_x = Mat4::from_rotation_x(rotation_degrees.x.to_radians());
    let rotation_y = Mat4::from_rotation_y(rotation_degrees.y.to_radians());
    let rotation_z = Mat4::from_rotation_z(rotation_degrees.z.to_radians());

    Mat4::from_translation(translation)
        * rotation_z
        * rotation_y
        * rotation_x
        * Mat4::from_scale(scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).length() < 1e-5,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn identity_composition() {
        let matrix = compose_transform(Vec3::ONE, Vec3::ZERO, Vec3::ZERO);
        assert!(matrix.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn x_rotation_swings_z_to_minus_y() {
        let matrix = compose_transform(Vec3::ONE, Vec3::new(90.0, 0.0, 0.0), Vec3::ZERO);
        let rotated = matrix.transform_vector3(Vec3::Z);
        assert_close(rotated, -Vec3::Y);
    }

    #[test]
    fn euler_order_is_x_then_y_then_z() {
        // Rx(90) takes +Z to -Y, then Rz(90) takes -Y to +X
        let matrix = compose_transform(Vec3::ONE, Vec3::new(90.0, 0.0, 90.0), Vec3::ZERO);
        let rotated = matrix.transform_vector3(Vec3::Z);
        assert_close(rotated, Vec3::X);
    }

    #[test]
    fn scale_applies_before_rotation() {
        let matrix = compose_transform(
            Vec3::new(2.0, 1.0, 1.0),
            Vec3::new(0.0, 0.0, 90.0),
            Vec3::ZERO,
        );
        let transformed = matrix.transform_vector3(Vec3::X);
        assert_close(transformed, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn translation_applies_last() {
        let matrix = compose_transform(
            Vec3::splat(3.0),
            Vec3::new(0.0, 90.0, 0.0),
            Vec3::new(10.0, 20.0, 30.0),
        );
        let point = matrix.transform_point3(Vec3::ZERO);
        assert_close(point, Vec3::new(10.0, 20.0, 30.0));
    }
}
