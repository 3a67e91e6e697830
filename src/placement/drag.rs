//! Drag-time collision response.
//!
//! Applied to every intermediate gizmo frame. The correction is a single
//! separating-axis pass, not a solve: chains of three or more overlapping
//! items can take several ticks to separate. The floor always wins over a
//! push-out, so a corrected frame never sinks below it.

use crate::catalog::AssetProvider;
use crate::config::{DragConfig, SandboxConfig};
use crate::error::SceneError;
use crate::math::{Aabb, Transform, Vec3};
use crate::scene::{item_bounds_at, item_world_bounds, ItemId, SceneItem, SceneStore};

#[derive(Debug, Clone)]
pub struct DragResolver {
    config: DragConfig,
    floor_height: f64,
}

impl DragResolver {
    pub fn new(config: DragConfig, floor_height: f64) -> Self {
        Self {
            config,
            floor_height,
        }
    }

    pub fn from_config(config: &SandboxConfig) -> Self {
        Self::new(config.drag.clone(), config.floor_height)
    }

    /// Corrects a proposed transform for the top-level item `id` against the
    /// last committed scene. The store is only read; committing is the
    /// caller's job once the drag ends.
    pub fn correct(
        &self,
        store: &SceneStore,
        assets: &dyn AssetProvider,
        id: ItemId,
        proposed: Transform,
    ) -> Result<Transform, SceneError> {
        let item = store.get(id).ok_or(SceneError::UnknownItem(id))?;
        let committed = item.transform().unwrap_or_default();

        let mut transform = Transform {
            scale: self.uniform_scale(committed.scale, proposed.scale),
            ..proposed
        };

        transform = self.lift_to_floor(assets, item, transform);

        for other in store.items().iter().filter(|other| other.id() != id) {
            let Some(obstacle) = item_world_bounds(assets, other) else {
                continue;
            };
            let moving = item_bounds_at(assets, item, &transform);
            if moving.intersects(&obstacle) {
                transform = transform.translated(push_out(&moving, &obstacle));
            }
        }

        // A downward push-out may have crossed the floor again
        Ok(self.lift_to_floor(assets, item, transform))
    }

    fn lift_to_floor(&self, assets: &dyn AssetProvider, item: &SceneItem, transform: Transform) -> Transform {
        let bounds = item_bounds_at(assets, item, &transform);
        if bounds.min.y < self.floor_height {
            transform.translated(Vec3::new(0.0, self.floor_height - bounds.min.y, 0.0))
        } else {
            transform
        }
    }

    /// Collapses a scale to one clamped value on every axis. The axis that
    /// moved furthest from the committed scale wins, so dragging any single
    /// scale handle scales the whole item.
    pub fn uniform_scale(&self, committed: Vec3, proposed: Vec3) -> Vec3 {
        let deltas = [
            ((proposed.x - committed.x).abs(), proposed.x),
            ((proposed.y - committed.y).abs(), proposed.y),
            ((proposed.z - committed.z).abs(), proposed.z),
        ];
        let (_, driver) = deltas
            .iter()
            .copied()
            .fold((-1.0, proposed.x), |best, d| if d.0 > best.0 { d } else { best });

        let s = driver.abs().clamp(self.config.min_scale, self.config.max_scale);
        Vec3::new(s, s, s)
    }
}

/// Translation moving `moving` out of `obstacle` along the axis of least
/// overlap, away from the obstacle's center
fn push_out(moving: &Aabb, obstacle: &Aabb) -> Vec3 {
    let overlap = moving.overlap(obstacle);
    let away = moving.center() - obstacle.center();
    let sign = |d: f64| if d < 0.0 { -1.0 } else { 1.0 };

    if overlap.x <= overlap.y && overlap.x <= overlap.z {
        Vec3::new(sign(away.x) * overlap.x, 0.0, 0.0)
    } else if overlap.y <= overlap.z {
        Vec3::new(0.0, sign(away.y) * overlap.y, 0.0)
    } else {
        Vec3::new(0.0, 0.0, sign(away.z) * overlap.z)
    }
}
