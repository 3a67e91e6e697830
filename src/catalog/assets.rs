//! # Asset Provider
//!
//! The scene core never loads models itself. It asks an [`AssetProvider`]
//! for a model prototype keyed by component kind and a render material keyed
//! by material kind. A kind with no loadable model degrades to a placeholder
//! shape; it never blocks a mutation.

use std::collections::{HashMap, HashSet};

use super::{ComponentKind, MaterialKind, Shape};
use crate::math::Aabb;

/// Radius of the sphere drawn when a component has no model
pub const PLACEHOLDER_RADIUS: f64 = 0.5;

/// What the core needs to know about a loaded model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPrototype {
    pub name: String,
    /// Bounds of the model in its own local space
    pub bounds: Aabb,
}

impl ModelPrototype {
    /// Generic stand-in used when a model is missing
    pub fn placeholder() -> Self {
        Self {
            name: "placeholder".to_string(),
            bounds: Shape::Sphere {
                radius: PLACEHOLDER_RADIUS,
            }
            .local_bounds(),
        }
    }
}

/// Render material descriptor handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDescriptor {
    pub name: &'static str,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
}

impl MaterialDescriptor {
    /// Descriptor derived from the catalog entry alone
    pub fn from_kind(kind: MaterialKind) -> Self {
        let metallic = match kind {
            MaterialKind::Metal | MaterialKind::RecycledAluminium | MaterialKind::RecycledSteel => {
                1.0
            }
            _ => 0.0,
        };
        let roughness = match kind {
            MaterialKind::GlassMarbles => 0.05,
            MaterialKind::Metal | MaterialKind::RecycledAluminium | MaterialKind::RecycledSteel => {
                0.3
            }
            MaterialKind::Cardboard | MaterialKind::RecycledCardboard => 0.95,
            _ => 0.6,
        };

        Self {
            name: kind.display_name(),
            base_color: kind.base_color(),
            metallic,
            roughness,
        }
    }
}

/// Lookup capability for models and materials.
///
/// Implementations are injected into the sandbox rather than reached through
/// process-wide caches, so tests can supply their own geometry.
pub trait AssetProvider {
    /// Model for a component, or `None` when it could not be loaded
    fn model(&self, kind: ComponentKind) -> Option<ModelPrototype>;

    /// Render material for a material kind
    fn material(&self, kind: MaterialKind) -> MaterialDescriptor {
        MaterialDescriptor::from_kind(kind)
    }
}

/// Returns the model for `kind`, falling back to the placeholder shape
pub fn resolve_model(assets: &dyn AssetProvider, kind: ComponentKind) -> ModelPrototype {
    match assets.model(kind) {
        Some(model) => model,
        None => {
            log::warn!("No model loaded for component '{}', using placeholder", kind);
            ModelPrototype::placeholder()
        }
    }
}

/// Provider backed by the catalog's nominal shapes.
///
/// Individual kinds can be marked as missing (to exercise the placeholder
/// path) or given explicit bounds.
#[derive(Debug, Clone, Default)]
pub struct CatalogAssets {
    missing: HashSet<ComponentKind>,
    overrides: HashMap<ComponentKind, Aabb>,
}

impl CatalogAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports `kind` as not loadable
    pub fn with_missing(mut self, kind: ComponentKind) -> Self {
        self.missing.insert(kind);
        self
    }

    /// Replaces the nominal bounds of `kind`
    pub fn with_bounds(mut self, kind: ComponentKind, bounds: Aabb) -> Self {
        self.overrides.insert(kind, bounds);
        self
    }
}

impl AssetProvider for CatalogAssets {
    fn model(&self, kind: ComponentKind) -> Option<ModelPrototype> {
        if self.missing.contains(&kind) {
            return None;
        }

        let bounds = self
            .overrides
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.shape().local_bounds());

        Some(ModelPrototype {
            name: kind.display_name().to_string(),
            bounds,
        })
    }
}
