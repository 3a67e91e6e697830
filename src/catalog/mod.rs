//! # Component and Material Catalog
//!
//! Fixed lookup tables for everything a user can place and every material a
//! part can be made of, plus the [`AssetProvider`] seam through which the
//! core obtains model bounds and render materials.
//!
//! ## Key Components
//!
//! - [`ComponentKind`] - Closed set of placeable parts, each mapped to a [`Shape`]
//! - [`MaterialKind`] - Closed set of materials with [`MaterialProperties`]
//! - [`AssetProvider`] - Injected model/material lookup
//! - [`CatalogAssets`] - Provider built from the catalog's nominal shapes

pub mod assets;
pub mod components;
pub mod materials;

pub use assets::{
    resolve_model, AssetProvider, CatalogAssets, MaterialDescriptor, ModelPrototype,
};
pub use components::{ComponentKind, Shape};
pub use materials::{MaterialKind, MaterialProperties};
