//! # Transform Gizmo
//!
//! The interactive translate/rotate/scale handle is owned by the renderer.
//! The core only needs to attach it to an item, detach it, switch its mode,
//! and read back the transform it produced.

use std::any::Any;

use crate::math::Transform;
use crate::scene::ItemId;

use super::commands::TransformMode;

/// Contract the selection bridge drives a transform gizmo through.
///
/// Implementations are expected to move the attached visual freely while the
/// user drags; nothing reaches the scene store until the bridge commits the
/// drag end.
pub trait TransformGizmo {
    /// Attach to the visual of a top-level item at its committed transform
    fn attach(&mut self, id: ItemId, transform: Transform);

    /// Detach from whatever is attached; no-op when detached
    fn detach(&mut self);

    /// Currently attached item
    fn attached(&self) -> Option<ItemId>;

    /// Transform the gizmo currently shows for the attached item
    fn current_transform(&self) -> Option<Transform>;

    /// Overwrite the shown transform, e.g. after drag-time correction
    fn set_transform(&mut self, transform: Transform);

    fn set_mode(&mut self, mode: TransformMode);

    fn mode(&self) -> TransformMode;

    fn name(&self) -> &str {
        "Transform Gizmo"
    }

    /// Support for downcasting to concrete types
    fn as_any(&self) -> &dyn Any;
}

/// Headless gizmo that records its state; used by the demo and in tests
#[derive(Debug, Clone, Default)]
pub struct HeadlessGizmo {
    attached: Option<(ItemId, Transform)>,
    mode: TransformMode,
    attach_count: usize,
}

impl HeadlessGizmo {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the gizmo has been (re)attached
    pub fn attach_count(&self) -> usize {
        self.attach_count
    }
}

impl TransformGizmo for HeadlessGizmo {
    fn attach(&mut self, id: ItemId, transform: Transform) {
        self.attached = Some((id, transform));
        self.attach_count += 1;
    }

    fn detach(&mut self) {
        self.attached = None;
    }

    fn attached(&self) -> Option<ItemId> {
        self.attached.map(|(id, _)| id)
    }

    fn current_transform(&self) -> Option<Transform> {
        self.attached.map(|(_, transform)| transform)
    }

    fn set_transform(&mut self, transform: Transform) {
        if let Some((_, current)) = &mut self.attached {
            *current = transform;
        }
    }

    fn set_mode(&mut self, mode: TransformMode) {
        self.mode = mode;
    }

    fn mode(&self) -> TransformMode {
        self.mode
    }

    fn name(&self) -> &str {
        "Headless Gizmo"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
