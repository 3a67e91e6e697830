//! # Transform Composition
//!
//! World/local transform reconciliation without a live scene graph. A parent
//! frame composed with a child transform gives the child's world transform;
//! a world transform expressed relative to a parent frame gives the local one.

use cgmath::{Euler, InnerSpace, Matrix3, Matrix4, Rad, SquareMatrix, Vector3, Zero};

use super::{vec3_approx_eq, Mat4, Vec3};
use crate::error::SceneError;

/// XYZ-ordered Euler rotation in radians
pub type EulerAngles = Euler<Rad<f64>>;

// Below this magnitude a basis column is treated as collapsed.
const SCALE_EPSILON: f64 = 1e-12;

// asin(0.9999999) is close enough to a right angle to treat as gimbal lock.
const GIMBAL_THRESHOLD: f64 = 0.999_999_9;

/// Position, rotation and scale of a scene item.
///
/// Top-level items store world values; group children store values relative
/// to their group's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: EulerAngles,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Zero translation, zero rotation, unit scale
    pub fn identity() -> Self {
        Self {
            position: Vec3::zero(),
            rotation: Euler::new(Rad(0.0), Rad(0.0), Rad(0.0)),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Identity transform moved to `position`
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn new(position: Vec3, rotation: EulerAngles, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Returns a copy translated by `offset`
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            position: self.position + offset,
            ..*self
        }
    }

    /// Rotation part as `Rx * Ry * Rz`
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        Matrix3::from_angle_x(self.rotation.x)
            * Matrix3::from_angle_y(self.rotation.y)
            * Matrix3::from_angle_z(self.rotation.z)
    }

    /// Full homogeneous matrix, `T * R * S`
    pub fn to_matrix(&self) -> Mat4 {
        let t = Matrix4::from_translation(self.position);
        let r = Matrix4::from(self.rotation_matrix());
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s // Order matters: T * R * S
    }

    /// Decomposes an affine matrix into translation, XYZ Euler rotation and scale.
    ///
    /// A mirrored basis (negative determinant) is folded into the X scale.
    /// Shear, which only appears when composing through a non-uniformly scaled
    /// rotated parent, is discarded.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let position = matrix.w.truncate();

        let mut axes = [matrix.x.truncate(), matrix.y.truncate(), matrix.z.truncate()];
        let mut scale = Vec3::new(axes[0].magnitude(), axes[1].magnitude(), axes[2].magnitude());

        let basis = Matrix3::from_cols(axes[0], axes[1], axes[2]);
        if basis.determinant() < 0.0 {
            scale.x = -scale.x;
        }

        let units = [Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z()];
        for (i, axis) in axes.iter_mut().enumerate() {
            if scale[i].abs() < SCALE_EPSILON {
                *axis = units[i];
                scale[i] = 0.0;
            } else {
                *axis /= scale[i];
            }
        }

        let rotation = euler_from_rotation(&Matrix3::from_cols(axes[0], axes[1], axes[2]));

        Self {
            position,
            rotation,
            scale,
        }
    }

    /// World transform of `child` when it lives inside the frame `self`
    pub fn compose(&self, child: &Transform) -> Transform {
        Transform::from_matrix(&(self.to_matrix() * child.to_matrix()))
    }

    /// Expresses this world transform in the local frame of `parent`.
    ///
    /// Computes `inverse(parent) * self`. Fails only when the parent frame has
    /// a collapsed axis and therefore no inverse.
    pub fn relative_to(&self, parent: &Transform) -> Result<Transform, SceneError> {
        let inverse = parent
            .to_matrix()
            .invert()
            .ok_or(SceneError::DegenerateTransform)?;
        Ok(Transform::from_matrix(&(inverse * self.to_matrix())))
    }

    /// True when the scale is equal on all three axes
    pub fn is_uniform_scale(&self, epsilon: f64) -> bool {
        (self.scale.x - self.scale.y).abs() <= epsilon
            && (self.scale.y - self.scale.z).abs() <= epsilon
    }

    /// Compares two transforms by the world-space effect of their matrices.
    ///
    /// Euler triples are not unique, so rotation is compared through the
    /// rotation matrix rather than the raw angles.
    pub fn approx_eq(&self, other: &Transform, epsilon: f64) -> bool {
        if !vec3_approx_eq(self.position, other.position, epsilon)
            || !vec3_approx_eq(self.scale, other.scale, epsilon)
        {
            return false;
        }
        let a = self.rotation_matrix();
        let b = other.rotation_matrix();
        (0..3).all(|c| vec3_approx_eq(a[c], b[c], epsilon))
    }
}

/// Extracts XYZ Euler angles from a pure rotation matrix (`Rx * Ry * Rz`).
fn euler_from_rotation(m: &Matrix3<f64>) -> EulerAngles {
    // cgmath is column-major: m[col][row]
    let m11 = m.x.x;
    let m12 = m.y.x;
    let m13 = m.z.x;
    let m22 = m.y.y;
    let m23 = m.z.y;
    let m32 = m.y.z;
    let m33 = m.z.z;

    let y = m13.clamp(-1.0, 1.0).asin();
    let (x, z) = if m13.abs() < GIMBAL_THRESHOLD {
        ((-m23).atan2(m33), (-m12).atan2(m11))
    } else {
        (m32.atan2(m22), 0.0)
    };

    Euler::new(Rad(x), Rad(y), Rad(z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    fn sample() -> Transform {
        Transform::new(
            Vec3::new(1.5, 2.0, -3.0),
            Euler::new(Rad(0.3), Rad(-0.7), Rad(1.1)),
            Vec3::new(2.0, 0.5, 1.25),
        )
    }

    #[test]
    fn test_identity_matrix() {
        let m = Transform::identity().to_matrix();
        assert_eq!(m, Matrix4::identity());
    }

    #[test]
    fn test_decompose_recovers_trs() {
        let t = sample();
        let back = Transform::from_matrix(&t.to_matrix());
        assert!(back.approx_eq(&t, EPS));
        assert!((back.rotation.x.0 - 0.3).abs() < EPS);
        assert!((back.rotation.y.0 + 0.7).abs() < EPS);
        assert!((back.rotation.z.0 - 1.1).abs() < EPS);
    }

    #[test]
    fn test_decompose_gimbal_lock() {
        let t = Transform::new(
            Vec3::zero(),
            Euler::new(Rad(0.4), Rad(FRAC_PI_2), Rad(0.0)),
            Vec3::new(1.0, 1.0, 1.0),
        );
        let back = Transform::from_matrix(&t.to_matrix());
        assert!(back.approx_eq(&t, 1e-6));
    }

    #[test]
    fn test_mirrored_basis_folds_into_x() {
        let t = Transform::new(
            Vec3::zero(),
            Euler::new(Rad(0.0), Rad(0.0), Rad(0.0)),
            Vec3::new(-2.0, 1.0, 1.0),
        );
        let back = Transform::from_matrix(&t.to_matrix());
        assert!((back.scale.x + 2.0).abs() < EPS);
        assert!(back.approx_eq(&t, EPS));
    }

    #[test]
    fn test_relative_then_compose_round_trip() {
        let parent = Transform::new(
            Vec3::new(4.0, 0.0, 1.0),
            Euler::new(Rad(0.0), Rad(0.5), Rad(0.0)),
            Vec3::new(2.0, 2.0, 2.0),
        );
        let world = sample();
        let local = world.relative_to(&parent).unwrap();
        let again = parent.compose(&local);
        assert!(again.approx_eq(&world, 1e-9));
    }

    #[test]
    fn test_relative_to_collapsed_parent_fails() {
        let parent = Transform::new(
            Vec3::zero(),
            Euler::new(Rad(0.0), Rad(0.0), Rad(0.0)),
            Vec3::new(0.0, 1.0, 1.0),
        );
        assert_eq!(
            sample().relative_to(&parent),
            Err(SceneError::DegenerateTransform)
        );
    }

    #[test]
    fn test_uniform_scale_detection() {
        assert!(Transform::identity().is_uniform_scale(EPS));
        assert!(!sample().is_uniform_scale(EPS));
    }
}
