//! # Selection Bridge
//!
//! Keeps the transform gizmo in step with the store's selection and routes
//! pointer and drag events back into the store.
//!
//! Protocol:
//! - A pointer release that is not the tail of a drag picks the closest item
//!   and selects its top-level owner. A miss leaves the selection alone.
//! - After any committed change the gizmo is attached to the selected item
//!   if it is still alive and placed, and detached otherwise.
//! - Drag frames are corrected and shown on the gizmo only. The drag end is
//!   the single point where a manipulated transform is committed.

use crate::catalog::AssetProvider;
use crate::error::SceneError;
use crate::math::{Ray, Transform};
use crate::placement::DragResolver;
use crate::scene::{ItemId, SceneStore};

use super::commands::TransformMode;
use super::gizmo::TransformGizmo;
use super::picking::pick;

pub struct SelectionBridge {
    gizmo: Box<dyn TransformGizmo>,
    synced: Option<(u64, Option<ItemId>)>,
    dragging: bool,
    swallow_release: bool,
}

impl SelectionBridge {
    pub fn new(gizmo: Box<dyn TransformGizmo>) -> Self {
        Self {
            gizmo,
            synced: None,
            dragging: false,
            swallow_release: false,
        }
    }

    pub fn gizmo(&self) -> &dyn TransformGizmo {
        self.gizmo.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_mode(&mut self, mode: TransformMode) {
        self.gizmo.set_mode(mode);
    }

    /// Re-attaches or detaches the gizmo when the store moved on since the
    /// last sync. Returns `true` when anything was re-evaluated.
    pub fn sync(&mut self, store: &SceneStore) -> bool {
        let key = (store.revision(), store.selected_id());
        if self.synced == Some(key) {
            return false;
        }
        self.synced = Some(key);

        let target = store
            .selected_item()
            .and_then(|item| item.transform().map(|transform| (item.id(), transform)));

        match target {
            Some((id, transform)) => self.gizmo.attach(id, transform),
            None => {
                if self.gizmo.attached().is_some() {
                    log::debug!("Detaching gizmo, selection {:?} is gone", store.selected_id());
                }
                self.gizmo.detach();
            }
        }
        true
    }

    /// Handles a pointer release. Returns the newly selected id on a hit.
    pub fn pointer_release(
        &mut self,
        store: &mut SceneStore,
        assets: &dyn AssetProvider,
        ray: &Ray,
    ) -> Option<ItemId> {
        if std::mem::take(&mut self.swallow_release) || self.dragging {
            return None;
        }

        let hit = pick(store.items(), assets, ray)?;
        store.select_item(hit.item);
        self.sync(store);
        Some(hit.item)
    }

    /// Applies drag-time correction to a gizmo frame and shows the result.
    ///
    /// Returns `None` when the gizmo is not attached. Never commits.
    pub fn drag_update(
        &mut self,
        store: &SceneStore,
        assets: &dyn AssetProvider,
        resolver: &DragResolver,
        proposed: Transform,
    ) -> Result<Option<Transform>, SceneError> {
        let Some(id) = self.gizmo.attached() else {
            return Ok(None);
        };

        let corrected = resolver.correct(store, assets, id, proposed)?;
        self.gizmo.set_transform(corrected);
        self.dragging = true;
        Ok(Some(corrected))
    }

    /// Commits the gizmo's current transform to the store
    pub fn drag_end(&mut self, store: &mut SceneStore) -> Result<Option<(ItemId, Transform)>, SceneError> {
        let was_dragging = std::mem::replace(&mut self.dragging, false);
        self.swallow_release = was_dragging;

        let (Some(id), Some(transform)) = (self.gizmo.attached(), self.gizmo.current_transform()) else {
            return Ok(None);
        };
        if !was_dragging {
            return Ok(None);
        }

        store.update_transform(id, transform)?;
        self.sync(store);
        Ok(Some((id, transform)))
    }

    /// Abandons a drag and snaps the gizmo back to the committed transform
    pub fn cancel_drag(&mut self, store: &SceneStore) {
        self.dragging = false;
        self.synced = None;
        self.sync(store);
    }
}

impl std::fmt::Debug for SelectionBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionBridge")
            .field("gizmo", &self.gizmo.name())
            .field("attached", &self.gizmo.attached())
            .field("dragging", &self.dragging)
            .finish()
    }
}
