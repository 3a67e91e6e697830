//! Ray picking against the leaves of every top-level item.

use crate::catalog::AssetProvider;
use crate::math::Ray;
use crate::scene::{leaf_world_bounds, ItemId, SceneItem};

/// A picked item and the distance along the ray to the struck leaf
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Top-level item owning the struck leaf
    pub item: ItemId,
    /// The leaf that was struck; equals `item` for plain objects
    pub leaf: ItemId,
    pub distance: f64,
}

/// Closest leaf hit along `ray`, reported against its owning top-level item.
/// Group children are never returned as the selectable id.
pub fn pick(items: &[SceneItem], assets: &dyn AssetProvider, ray: &Ray) -> Option<PickHit> {
    items
        .iter()
        .flat_map(|item| {
            leaf_world_bounds(assets, item)
                .into_iter()
                .filter_map(|(leaf, bounds)| {
                    bounds.intersect_ray(ray).map(|distance| PickHit {
                        item: item.id(),
                        leaf,
                        distance,
                    })
                })
                .collect::<Vec<_>>()
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
