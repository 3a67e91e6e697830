//! # Glue and Deglue
//!
//! Reconciles world-space and group-local transforms when two items are
//! merged into a rigid group or a group is split back into objects.
//!
//! A new group's frame sits at the center of the union of its leaves' world
//! bounds, with identity rotation and unit scale. Each leaf is stored as
//! `inverse(group) * world`; deglue composes `group * local` to get the world
//! transform back.
//!
//! Precondition failures a user can trigger (partners not touching, deglue on
//! a plain object) come back as outcomes, not errors.

use crate::catalog::AssetProvider;
use crate::error::SceneError;
use crate::math::{Aabb, Transform};
use crate::scene::{item_world_bounds, leaf_world_bounds, ItemId, SceneGroup, SceneItem, SceneObject, SceneStore};

#[derive(Debug, Clone, PartialEq)]
pub enum GlueOutcome {
    /// The two items were replaced by the group with this id
    Glued(ItemId),
    /// Bounding boxes do not intersect; nothing changed
    NotTouching,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeglueOutcome {
    /// The group was replaced by these top-level objects
    Released(Vec<ItemId>),
    /// The item is a plain object; nothing changed
    NotAGroup,
}

/// Whether the world bounds of two top-level items intersect (touching counts)
pub fn touching(
    store: &SceneStore,
    assets: &dyn AssetProvider,
    a: ItemId,
    b: ItemId,
) -> Result<bool, SceneError> {
    let bounds_a = placed_bounds(store, assets, a)?;
    let bounds_b = placed_bounds(store, assets, b)?;
    Ok(bounds_a.intersects(&bounds_b))
}

/// Builds the group that would result from gluing `a` and `b`, without
/// modifying the store
pub fn build_group(
    store: &SceneStore,
    assets: &dyn AssetProvider,
    a: ItemId,
    b: ItemId,
) -> Result<SceneGroup, SceneError> {
    if a == b {
        return Err(SceneError::SelfGlue(a));
    }
    let items: Vec<&SceneItem> = [a, b]
        .iter()
        .map(|id| store.get(*id).ok_or(SceneError::UnknownItem(*id)))
        .collect::<Result<_, _>>()?;

    let leaves: Vec<SceneObject> = items.iter().flat_map(|item| item.world_leaves()).collect();
    if let Some(unplaced) = leaves.iter().find(|leaf| !leaf.is_placed()) {
        return Err(SceneError::Unplaced(unplaced.id));
    }

    let union = Aabb::union_all(
        items
            .iter()
            .flat_map(|item| leaf_world_bounds(assets, item))
            .map(|(_, bounds)| bounds),
    )
    .ok_or(SceneError::Unplaced(a))?;
    let frame = Transform::from_position(union.center());

    let children = leaves
        .into_iter()
        .map(|leaf| {
            let world = leaf.transform.ok_or(SceneError::Unplaced(leaf.id))?;
            Ok(SceneObject {
                transform: Some(world.relative_to(&frame)?),
                ..leaf
            })
        })
        .collect::<Result<Vec<_>, SceneError>>()?;

    SceneGroup::new(children, frame)
}

/// Glues two top-level items into one group and selects it
pub fn glue(
    store: &mut SceneStore,
    assets: &dyn AssetProvider,
    a: ItemId,
    b: ItemId,
) -> Result<GlueOutcome, SceneError> {
    if !touching(store, assets, a, b)? {
        log::info!("Glue skipped: {} and {} are not touching", a, b);
        return Ok(GlueOutcome::NotTouching);
    }

    let group = build_group(store, assets, a, b)?;
    let child_count = group.children().len();
    let id = store.glue(group, [a, b])?;

    log::info!("Glued {} and {} into group {} ({} parts)", a, b, id, child_count);
    Ok(GlueOutcome::Glued(id))
}

/// Splits group `group_id` into world-space top-level objects that keep
/// their ids, components and materials. Clears the selection.
pub fn deglue(store: &mut SceneStore, group_id: ItemId) -> Result<DeglueOutcome, SceneError> {
    let children = match store.get(group_id) {
        None => return Err(SceneError::UnknownItem(group_id)),
        Some(SceneItem::Object(_)) => return Ok(DeglueOutcome::NotAGroup),
        Some(SceneItem::Group(group)) => group.world_children(),
    };

    let ids: Vec<ItemId> = children.iter().map(|child| child.id).collect();
    store.deglue(group_id, children)?;

    log::info!("Released group {} into {} objects", group_id, ids.len());
    Ok(DeglueOutcome::Released(ids))
}

fn placed_bounds(store: &SceneStore, assets: &dyn AssetProvider, id: ItemId) -> Result<Aabb, SceneError> {
    let item = store.get(id).ok_or(SceneError::UnknownItem(id))?;
    item_world_bounds(assets, item).ok_or(SceneError::Unplaced(id))
}
