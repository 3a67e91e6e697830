//! # Scene Model and Store
//!
//! The data model for placed parts and the store that owns it.
//!
//! ## Key Components
//!
//! - [`SceneItem`] - Tagged union of a single [`SceneObject`] or a glued [`SceneGroup`]
//! - [`SceneStore`] - Authoritative item list and selection with atomic snapshots
//! - [`bounds`] - World-space bounding boxes of items, via an asset provider
//!
//! ## Usage
//!
//! ```rust
//! use buildspace::catalog::{ComponentKind, MaterialKind};
//! use buildspace::scene::SceneStore;
//!
//! let mut store = SceneStore::new();
//! let id = store.add_object(ComponentKind::Frame, MaterialKind::Wood, None);
//! assert_eq!(store.selected_id(), Some(id));
//! ```

pub mod bounds;
pub mod item;
pub mod store;

pub use bounds::{item_bounds_at, item_world_bounds, leaf_world_bounds};
pub use item::{ItemId, SceneGroup, SceneItem, SceneObject};
pub use store::{SceneSnapshot, SceneStore};
