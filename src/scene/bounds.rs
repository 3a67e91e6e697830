//! World-space bounding boxes of scene items, derived from model bounds

use super::{ItemId, SceneItem, SceneObject};
use crate::catalog::{resolve_model, AssetProvider};
use crate::math::{Aabb, Mat4, Transform};

/// World bounds of an object whose transform is taken relative to `frame`
/// (pass `None` for top-level objects). Unplaced objects have no bounds.
pub fn object_world_bounds(
    assets: &dyn AssetProvider,
    object: &SceneObject,
    frame: Option<&Transform>,
) -> Option<Aabb> {
    let local = object.transform?;
    let model = resolve_model(assets, object.component);

    let matrix: Mat4 = match frame {
        Some(parent) => parent.to_matrix() * local.to_matrix(),
        None => local.to_matrix(),
    };

    Some(model.bounds.transformed(&matrix))
}

/// Bounds of every leaf of an item in world space, tagged with the leaf id
pub fn leaf_world_bounds(assets: &dyn AssetProvider, item: &SceneItem) -> Vec<(ItemId, Aabb)> {
    match item {
        SceneItem::Object(object) => object_world_bounds(assets, object, None)
            .map(|b| vec![(object.id, b)])
            .unwrap_or_default(),
        SceneItem::Group(group) => group
            .children()
            .iter()
            .filter_map(|child| {
                object_world_bounds(assets, child, Some(&group.transform)).map(|b| (child.id, b))
            })
            .collect(),
    }
}

/// World bounds of a whole item; `None` while an object is unplaced
pub fn item_world_bounds(assets: &dyn AssetProvider, item: &SceneItem) -> Option<Aabb> {
    Aabb::union_all(leaf_world_bounds(assets, item).into_iter().map(|(_, b)| b))
}

/// World bounds the item would have if its own transform were `transform`
pub fn item_bounds_at(
    assets: &dyn AssetProvider,
    item: &SceneItem,
    transform: &Transform,
) -> Aabb {
    let mut moved = item.clone();
    moved.set_transform(*transform);
    item_world_bounds(assets, &moved).unwrap_or_else(|| Aabb::new(transform.position, transform.position))
}
