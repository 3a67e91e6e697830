//! # Buildspace Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use buildspace::prelude::*;
//!
//! let mut sandbox = buildspace::default();
//! let outcome = sandbox.add_component(ComponentKind::Frame, MaterialKind::Wood).unwrap();
//! assert!(outcome.is_applied());
//! ```

pub use crate::default;
pub use crate::sandbox::{CommandOutcome, Sandbox, StatusMessage};

pub use crate::catalog::{AssetProvider, CatalogAssets, ComponentKind, MaterialKind};
pub use crate::config::SandboxConfig;
pub use crate::error::{CatalogError, ConfigError, SceneError};

pub use crate::math::{Aabb, Ray, Transform, Vec3};
pub use crate::scene::{ItemId, SceneGroup, SceneItem, SceneObject, SceneSnapshot, SceneStore};

pub use crate::interaction::{InputAction, InputDispatcher, TransformGizmo, TransformMode};
pub use crate::placement::Seed;
pub use crate::score::ScoreResult;
