//! # Interaction
//!
//! Everything between user input and the scene store: the camera that turns
//! pointer positions into rays, picking, the transform gizmo contract, the
//! selection bridge, and named input actions.
//!
//! ## Key Components
//!
//! - [`OrbitCamera`] - Orbit camera producing look and pointer rays
//! - [`pick`] - Closest top-level item under a ray
//! - [`TransformGizmo`] - Contract for the renderer-owned manipulation handle
//! - [`SelectionBridge`] - Keeps the gizmo attached to the selection, commits drag ends
//! - [`InputDispatcher`] - Explicitly constructed bus for [`InputAction`]s

pub mod bridge;
pub mod camera;
pub mod commands;
pub mod gizmo;
pub mod picking;

pub use bridge::SelectionBridge;
pub use camera::{OrbitCamera, OrbitCameraBounds};
pub use commands::{InputAction, InputDispatcher, SubscriptionId, TransformMode};
pub use gizmo::{HeadlessGizmo, TransformGizmo};
pub use picking::{pick, PickHit};
