//! # Spatial Math Utilities
//!
//! Pure functions and small value types shared by every other part of the
//! sandbox core. Nothing in here holds state.
//!
//! ## Key Components
//!
//! - [`Transform`] - Position / Euler rotation / scale triple with matrix
//!   composition and decomposition
//! - [`Aabb`] - Axis-aligned bounding boxes with overlap and ray tests
//! - [`Ray`] - World-space rays used for picking and placement seeding
//! - [`spiral_offsets`] - Deterministic square spiral of XZ search cells
//!
//! ## Conventions
//!
//! Scene math runs in `f64`. Rotations are XYZ Euler angles in radians, so a
//! rotation matrix is `Rx * Ry * Rz`, and a full transform matrix is
//! `T * R * S`. Y is up and the floor is the plane `y = floor_height`.

pub mod bounds;
pub mod ray;
pub mod spiral;
pub mod transform;

pub use bounds::Aabb;
pub use ray::Ray;
pub use spiral::{spiral_offsets, SpiralCell};
pub use transform::{EulerAngles, Transform};

/// World-space vector type used throughout the scene core
pub type Vec3 = cgmath::Vector3<f64>;

/// Homogeneous transform matrix type used throughout the scene core
pub type Mat4 = cgmath::Matrix4<f64>;

/// Component-wise comparison helper used by tests and invariant checks
pub fn vec3_approx_eq(a: Vec3, b: Vec3, epsilon: f64) -> bool {
    (a.x - b.x).abs() <= epsilon && (a.y - b.y).abs() <= epsilon && (a.z - b.z).abs() <= epsilon
}
