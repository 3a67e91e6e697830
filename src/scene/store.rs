//! # Scene Store
//!
//! Single source of truth for the list of top-level items and the current
//! selection. Readers (the renderer, the selection bridge) hold cheap
//! [`SceneSnapshot`] clones; every mutation builds a complete new snapshot
//! and swaps it in, so no partially applied change is ever observable.

use std::collections::HashSet;
use std::sync::Arc;

use super::{ItemId, SceneGroup, SceneItem, SceneObject};
use crate::catalog::{ComponentKind, MaterialKind};
use crate::error::SceneError;
use crate::math::{Transform, Vec3};

/// Immutable view of the scene at one revision
#[derive(Debug, Clone, Default)]
pub struct SceneSnapshot {
    items: Arc<Vec<SceneItem>>,
    selected: Option<ItemId>,
    revision: u64,
}

impl SceneSnapshot {
    /// Top-level items in stable insertion order
    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    /// Selected top-level id, which may refer to an item that no longer exists
    pub fn selected_id(&self) -> Option<ItemId> {
        self.selected
    }

    /// Incremented once per committed mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: ItemId) -> Option<&SceneItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn selected_item(&self) -> Option<&SceneItem> {
        self.selected.and_then(|id| self.get(id))
    }
}

/// Checks scene-wide id uniqueness and group sizes
pub fn validate_items(items: &[SceneItem]) -> Result<(), SceneError> {
    let mut seen = HashSet::new();
    for item in items {
        if let SceneItem::Group(group) = item {
            if group.children().len() < 2 {
                return Err(SceneError::GroupTooSmall(group.children().len()));
            }
        }
        for id in item.ids() {
            if !seen.insert(id) {
                return Err(SceneError::DuplicateId(id));
            }
        }
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct SceneStore {
    current: SceneSnapshot,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cheap copy of the current state for readers
    pub fn snapshot(&self) -> SceneSnapshot {
        self.current.clone()
    }

    pub fn items(&self) -> &[SceneItem] {
        self.current.items()
    }

    pub fn selected_id(&self) -> Option<ItemId> {
        self.current.selected
    }

    pub fn selected_item(&self) -> Option<&SceneItem> {
        self.current.selected_item()
    }

    pub fn revision(&self) -> u64 {
        self.current.revision
    }

    pub fn get(&self, id: ItemId) -> Option<&SceneItem> {
        self.current.get(id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.current.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.items.is_empty()
    }

    /// Component/material pairs of every placed leaf object, the input of
    /// the sustainability score
    pub fn placed_parts(&self) -> Vec<(ComponentKind, MaterialKind)> {
        self.items()
            .iter()
            .flat_map(|item| item.flatten())
            .filter(|object| object.is_placed())
            .map(|object| (object.component, object.material))
            .collect()
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        validate_items(self.items())
    }

    /// Swaps in a complete new state
    fn commit(&mut self, items: Vec<SceneItem>, selected: Option<ItemId>) {
        debug_assert!(
            validate_items(&items).is_ok(),
            "scene invariant violated: {:?}",
            validate_items(&items)
        );
        self.current = SceneSnapshot {
            items: Arc::new(items),
            selected,
            revision: self.current.revision + 1,
        };
        log::debug!(
            "Scene revision {}: {} items, selected {:?}",
            self.current.revision,
            self.current.items.len(),
            self.current.selected
        );
    }

    /// Commits a new selection without touching the item list
    fn commit_selection(&mut self, selected: Option<ItemId>) {
        self.current = SceneSnapshot {
            items: Arc::clone(&self.current.items),
            selected,
            revision: self.current.revision + 1,
        };
    }

    /// Appends a new object and selects it.
    ///
    /// Without a transform the object is unplaced and waits for the
    /// placement engine.
    pub fn add_object(
        &mut self,
        component: ComponentKind,
        material: MaterialKind,
        transform: Option<Transform>,
    ) -> ItemId {
        let object = SceneObject {
            id: ItemId::new(),
            component,
            material,
            transform,
        };
        let id = object.id;

        let mut items = self.items().to_vec();
        items.push(SceneItem::Object(object));
        self.commit(items, Some(id));
        id
    }

    /// Appends an already formed group and selects it
    pub fn add_group(&mut self, group: SceneGroup) -> ItemId {
        let id = group.id();
        let mut items = self.items().to_vec();
        items.push(SceneItem::Group(group));
        self.commit(items, Some(id));
        id
    }

    /// Selects `id`, which need not exist; callers re-check with [`get`](Self::get)
    pub fn select_item(&mut self, id: ItemId) {
        self.commit_selection(Some(id));
    }

    /// Removes the selected top-level item and clears the selection.
    ///
    /// Returns the removed item, or `None` when nothing (live) was selected.
    pub fn delete_selected(&mut self) -> Option<SceneItem> {
        let selected = self.selected_id()?;

        let mut removed = None;
        let items: Vec<SceneItem> = self
            .items()
            .iter()
            .filter(|item| {
                if item.id() == selected {
                    removed = Some((*item).clone());
                    false
                } else {
                    true
                }
            })
            .cloned()
            .collect();

        self.commit(items, None);
        removed
    }

    /// Sets the material of the selected object, or of every child of the
    /// selected group. Returns `false` when nothing live is selected.
    pub fn set_material_for_selected(&mut self, material: MaterialKind) -> bool {
        let Some(selected) = self.selected_id() else {
            return false;
        };
        if !self.contains(selected) {
            return false;
        }

        let items = self
            .items()
            .iter()
            .map(|item| match item {
                SceneItem::Object(object) if object.id == selected => SceneItem::Object(SceneObject {
                    material,
                    ..object.clone()
                }),
                SceneItem::Group(group) if group.id() == selected => {
                    SceneItem::Group(group.clone().with_material(material))
                }
                other => other.clone(),
            })
            .collect();

        self.commit(items, Some(selected));
        true
    }

    /// Overwrites the transform of the top-level item `id`. Group children
    /// are never addressed directly.
    pub fn update_transform(&mut self, id: ItemId, transform: Transform) -> Result<(), SceneError> {
        if !self.contains(id) {
            return Err(SceneError::UnknownItem(id));
        }

        let items = self
            .items()
            .iter()
            .map(|item| {
                let mut item = item.clone();
                if item.id() == id {
                    item.set_transform(transform);
                }
                item
            })
            .collect();

        self.commit(items, self.selected_id());
        Ok(())
    }

    /// Replaces the two top-level items `sources` with `group` and selects it.
    ///
    /// The group's children must already carry group-local transforms.
    pub fn glue(&mut self, group: SceneGroup, sources: [ItemId; 2]) -> Result<ItemId, SceneError> {
        let [a, b] = sources;
        if a == b {
            return Err(SceneError::SelfGlue(a));
        }
        for id in sources {
            if !self.contains(id) {
                return Err(SceneError::UnknownItem(id));
            }
        }

        let group_id = group.id();
        let mut items: Vec<SceneItem> = self
            .items()
            .iter()
            .filter(|item| !sources.contains(&item.id()))
            .cloned()
            .collect();
        items.push(SceneItem::Group(group));

        self.commit(items, Some(group_id));
        Ok(group_id)
    }

    /// Removes group `group_id`, appends `children` (already in world space)
    /// as top-level objects, and clears the selection
    pub fn deglue(&mut self, group_id: ItemId, children: Vec<SceneObject>) -> Result<(), SceneError> {
        match self.get(group_id) {
            None => return Err(SceneError::UnknownItem(group_id)),
            Some(SceneItem::Object(_)) => return Err(SceneError::NotAGroup(group_id)),
            Some(SceneItem::Group(_)) => {}
        }
        if let Some(unplaced) = children.iter().find(|c| !c.is_placed()) {
            return Err(SceneError::Unplaced(unplaced.id));
        }

        let mut items: Vec<SceneItem> = self
            .items()
            .iter()
            .filter(|item| item.id() != group_id)
            .cloned()
            .collect();
        items.extend(children.into_iter().map(SceneItem::Object));

        self.commit(items, None);
        Ok(())
    }

    /// Deep-clones `source` under fresh ids, shifts the clone by `offset`
    /// (placed items only), appends it and selects it
    pub fn duplicate(&mut self, source: ItemId, offset: Vec3) -> Result<ItemId, SceneError> {
        let mut clone = self
            .get(source)
            .ok_or(SceneError::UnknownItem(source))?
            .with_fresh_ids();

        if let Some(transform) = clone.transform() {
            clone.set_transform(transform.translated(offset));
        }

        let id = clone.id();
        let mut items = self.items().to_vec();
        items.push(clone);

        self.commit(items, Some(id));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed_at(store: &mut SceneStore, component: ComponentKind, x: f64) -> ItemId {
        store.add_object(
            component,
            MaterialKind::Wood,
            Some(Transform::from_position(Vec3::new(x, 0.0, 0.0))),
        )
    }

    fn glue_pair(store: &mut SceneStore) -> (ItemId, ItemId, ItemId) {
        let a = placed_at(store, ComponentKind::Frame, 0.0);
        let b = placed_at(store, ComponentKind::Seat, 1.0);
        let children: Vec<SceneObject> = [a, b]
            .iter()
            .map(|id| store.get(*id).unwrap().as_object().unwrap().clone())
            .collect();
        let group = SceneGroup::new(children, Transform::identity()).unwrap();
        let g = store.glue(group, [a, b]).unwrap();
        (a, b, g)
    }

    #[test]
    fn test_add_object_selects_it() {
        let mut store = SceneStore::new();
        let id = store.add_object(ComponentKind::Frame, MaterialKind::Wood, None);
        assert_eq!(store.selected_id(), Some(id));
        assert!(!store.get(id).unwrap().as_object().unwrap().is_placed());
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_add_group_selects_it() {
        let mut store = SceneStore::new();
        let children = vec![
            SceneObject::placed(ComponentKind::Box, MaterialKind::Wood, Transform::identity()),
            SceneObject::placed(
                ComponentKind::Box,
                MaterialKind::Wood,
                Transform::from_position(Vec3::new(1.0, 0.0, 0.0)),
            ),
        ];
        let group = SceneGroup::new(children, Transform::identity()).unwrap();
        let id = store.add_group(group);
        assert_eq!(store.selected_id(), Some(id));
        assert!(store.selected_item().unwrap().is_group());
    }

    #[test]
    fn test_select_missing_id_leaves_items_alone() {
        let mut store = SceneStore::new();
        placed_at(&mut store, ComponentKind::Box, 0.0);
        let before = store.items().to_vec();

        let ghost = ItemId::new();
        store.select_item(ghost);
        assert_eq!(store.selected_id(), Some(ghost));
        assert!(store.selected_item().is_none());
        assert_eq!(store.items(), before.as_slice());
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut store = SceneStore::new();
        let a = placed_at(&mut store, ComponentKind::Box, 0.0);
        let b = placed_at(&mut store, ComponentKind::Box, 3.0);

        store.select_item(a);
        let removed = store.delete_selected().unwrap();
        assert_eq!(removed.id(), a);
        assert_eq!(store.selected_id(), None);
        assert_eq!(store.len(), 1);
        assert!(store.contains(b));

        // Nothing selected: no-op, no new revision
        let rev = store.revision();
        assert!(store.delete_selected().is_none());
        assert_eq!(store.revision(), rev);
    }

    #[test]
    fn test_delete_selected_group_removes_whole_group() {
        let mut store = SceneStore::new();
        let (_, _, g) = glue_pair(&mut store);
        assert_eq!(store.selected_id(), Some(g));
        store.delete_selected();
        assert!(store.is_empty());
    }

    #[test]
    fn test_material_for_selected_group_is_uniform() {
        let mut store = SceneStore::new();
        let (_, _, g) = glue_pair(&mut store);
        assert!(store.set_material_for_selected(MaterialKind::RecycledSteel));
        let group = store.get(g).unwrap().as_group().unwrap();
        assert!(group
            .children()
            .iter()
            .all(|c| c.material == MaterialKind::RecycledSteel));
    }

    #[test]
    fn test_material_for_selected_object_only() {
        let mut store = SceneStore::new();
        let a = placed_at(&mut store, ComponentKind::Box, 0.0);
        let b = placed_at(&mut store, ComponentKind::Box, 3.0);
        store.select_item(a);
        assert!(store.set_material_for_selected(MaterialKind::Metal));
        assert_eq!(store.get(a).unwrap().flatten()[0].material, MaterialKind::Metal);
        assert_eq!(store.get(b).unwrap().flatten()[0].material, MaterialKind::Wood);
    }

    #[test]
    fn test_update_transform_unknown_item() {
        let mut store = SceneStore::new();
        let ghost = ItemId::new();
        assert_eq!(
            store.update_transform(ghost, Transform::identity()),
            Err(SceneError::UnknownItem(ghost))
        );
    }

    #[test]
    fn test_update_transform_on_group_leaves_children_local() {
        let mut store = SceneStore::new();
        let (_, _, g) = glue_pair(&mut store);
        let before = store.get(g).unwrap().flatten().to_vec();
        store
            .update_transform(g, Transform::from_position(Vec3::new(5.0, 0.0, 0.0)))
            .unwrap();
        let item = store.get(g).unwrap();
        assert_eq!(item.position(), Some(Vec3::new(5.0, 0.0, 0.0)));
        assert_eq!(item.flatten(), before.as_slice());
    }

    #[test]
    fn test_glue_replaces_sources() {
        let mut store = SceneStore::new();
        let (a, b, g) = glue_pair(&mut store);
        assert_eq!(store.len(), 1);
        assert!(!store.contains(a));
        assert!(!store.contains(b));
        assert!(store.get(g).unwrap().is_group());
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_glue_rejects_self_and_unknown() {
        let mut store = SceneStore::new();
        let a = placed_at(&mut store, ComponentKind::Box, 0.0);
        let b = placed_at(&mut store, ComponentKind::Box, 1.0);
        let children = vec![
            store.get(a).unwrap().as_object().unwrap().clone(),
            store.get(b).unwrap().as_object().unwrap().clone(),
        ];
        let group = SceneGroup::new(children, Transform::identity()).unwrap();

        assert_eq!(store.glue(group.clone(), [a, a]), Err(SceneError::SelfGlue(a)));
        let ghost = ItemId::new();
        assert_eq!(store.glue(group, [a, ghost]), Err(SceneError::UnknownItem(ghost)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_deglue_appends_children_and_clears_selection() {
        let mut store = SceneStore::new();
        let (a, b, g) = glue_pair(&mut store);
        let children = store.get(g).unwrap().as_group().unwrap().world_children();
        store.deglue(g, children).unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.contains(a));
        assert!(store.contains(b));
        assert!(!store.contains(g));
        assert_eq!(store.selected_id(), None);
    }

    #[test]
    fn test_deglue_on_object_is_rejected() {
        let mut store = SceneStore::new();
        let a = placed_at(&mut store, ComponentKind::Box, 0.0);
        assert_eq!(store.deglue(a, vec![]), Err(SceneError::NotAGroup(a)));
    }

    #[test]
    fn test_duplicate_object_offsets_and_selects() {
        let mut store = SceneStore::new();
        let a = placed_at(&mut store, ComponentKind::Box, 0.0);
        let copy = store.duplicate(a, Vec3::new(2.0, 0.0, 2.0)).unwrap();

        assert_ne!(copy, a);
        assert_eq!(store.selected_id(), Some(copy));
        assert_eq!(store.get(copy).unwrap().position(), Some(Vec3::new(2.0, 0.0, 2.0)));
        assert_eq!(store.get(a).unwrap().position(), Some(Vec3::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_duplicate_group_gets_fresh_child_ids() {
        let mut store = SceneStore::new();
        let (_, _, g) = glue_pair(&mut store);
        let copy = store.duplicate(g, Vec3::new(2.0, 0.0, 2.0)).unwrap();
        assert!(store.validate().is_ok());

        let original = store.get(g).unwrap().as_group().unwrap();
        let cloned = store.get(copy).unwrap().as_group().unwrap();
        for (o, c) in original.children().iter().zip(cloned.children()) {
            assert_ne!(o.id, c.id);
            assert_eq!(o.transform, c.transform);
        }
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_mutation() {
        let mut store = SceneStore::new();
        placed_at(&mut store, ComponentKind::Box, 0.0);
        let snapshot = store.snapshot();
        placed_at(&mut store, ComponentKind::Box, 4.0);

        assert_eq!(snapshot.items().len(), 1);
        assert_eq!(store.len(), 2);
        assert!(store.revision() > snapshot.revision());
    }

    #[test]
    fn test_placed_parts_flattens_groups() {
        let mut store = SceneStore::new();
        glue_pair(&mut store);
        store.add_object(ComponentKind::Lego, MaterialKind::Plastic, None);
        let parts = store.placed_parts();
        assert_eq!(
            parts,
            vec![
                (ComponentKind::Frame, MaterialKind::Wood),
                (ComponentKind::Seat, MaterialKind::Wood)
            ]
        );
    }
}
