//! Spawn-time placement: seed, floor snap and spiral search.

use cgmath::{InnerSpace, Zero};

use crate::catalog::AssetProvider;
use crate::config::{PlacementConfig, SandboxConfig};
use crate::error::SceneError;
use crate::math::{spiral_offsets, Aabb, Ray, Transform, Vec3};
use crate::scene::{item_bounds_at, item_world_bounds, leaf_world_bounds, ItemId, SceneItem, SceneStore};

/// Where the search starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Seed {
    /// The configured default seed position
    Default,
    /// Where the ray first strikes an existing item or the floor
    Ray(Ray),
    /// An explicit world position, e.g. a duplicate's offset position
    Position(Vec3),
}

/// Result of resolving one item's spawn transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementOutcome {
    pub transform: Transform,
    /// Spiral ring the accepted cell came from
    pub ring: u32,
    /// `true` when every ring collided and the last candidate was accepted
    pub exhausted: bool,
}

#[derive(Debug, Clone)]
pub struct PlacementEngine {
    config: PlacementConfig,
    floor_height: f64,
}

impl PlacementEngine {
    pub fn new(config: PlacementConfig, floor_height: f64) -> Self {
        Self {
            config,
            floor_height,
        }
    }

    pub fn from_config(config: &SandboxConfig) -> Self {
        Self::new(config.placement.clone(), config.floor_height)
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Resolves a non-overlapping, floor-snapped transform for `id` and
    /// commits it through [`SceneStore::update_transform`]
    pub fn place(
        &self,
        store: &mut SceneStore,
        assets: &dyn AssetProvider,
        id: ItemId,
        seed: Seed,
    ) -> Result<PlacementOutcome, SceneError> {
        let outcome = self.resolve(store, assets, id, seed)?;
        store.update_transform(id, outcome.transform)?;
        Ok(outcome)
    }

    /// Re-places a freshly duplicated item, seeded by its own (already
    /// offset) position
    pub fn place_duplicate(
        &self,
        store: &mut SceneStore,
        assets: &dyn AssetProvider,
        id: ItemId,
    ) -> Result<PlacementOutcome, SceneError> {
        let position = store
            .get(id)
            .ok_or(SceneError::UnknownItem(id))?
            .position()
            .ok_or(SceneError::Unplaced(id))?;
        self.place(store, assets, id, Seed::Position(position))
    }

    /// Computes the placement of `id` without touching the store
    pub fn resolve(
        &self,
        store: &SceneStore,
        assets: &dyn AssetProvider,
        id: ItemId,
        seed: Seed,
    ) -> Result<PlacementOutcome, SceneError> {
        let item = store.get(id).ok_or(SceneError::UnknownItem(id))?;
        let base = item.transform().unwrap_or_default();

        let obstacles: Vec<Aabb> = store
            .items()
            .iter()
            .filter(|other| other.id() != id)
            .filter_map(|other| item_world_bounds(assets, other))
            .map(|bounds| bounds.expanded(self.config.padding))
            .collect();

        let start = Transform {
            position: self.seed_position(store, assets, item, &base, seed),
            ..base
        };

        let mut last = start;
        let mut last_ring = 0;
        for cell in spiral_offsets(self.config.max_rings, self.config.spiral_step) {
            let candidate = self.snap_to_floor(assets, item, start.translated(Vec3::new(cell.x, 0.0, cell.z)));
            let padded = item_bounds_at(assets, item, &candidate).expanded(self.config.padding);

            if !obstacles.iter().any(|obstacle| obstacle.intersects(&padded)) {
                log::debug!(
                    "Placed {} at ({:.2}, {:.2}, {:.2}) in ring {}",
                    id,
                    candidate.position.x,
                    candidate.position.y,
                    candidate.position.z,
                    cell.ring
                );
                return Ok(PlacementOutcome {
                    transform: candidate,
                    ring: cell.ring,
                    exhausted: false,
                });
            }

            last = candidate;
            last_ring = cell.ring;
        }

        log::warn!(
            "No free cell within {} rings for {}, accepting overlapping position",
            self.config.max_rings,
            id
        );
        Ok(PlacementOutcome {
            transform: last,
            ring: last_ring,
            exhausted: true,
        })
    }

    /// Moves `transform` vertically so the item's lowest point sits on the floor
    pub fn snap_to_floor(&self, assets: &dyn AssetProvider, item: &SceneItem, transform: Transform) -> Transform {
        let bounds = item_bounds_at(assets, item, &transform);
        transform.translated(Vec3::new(0.0, self.floor_height - bounds.min.y, 0.0))
    }

    fn seed_position(
        &self,
        store: &SceneStore,
        assets: &dyn AssetProvider,
        item: &SceneItem,
        base: &Transform,
        seed: Seed,
    ) -> Vec3 {
        match seed {
            Seed::Default => self.config.default_seed(),
            Seed::Position(position) => position,
            Seed::Ray(ray) => self
                .ray_seed(store, assets, item, base, &ray)
                .unwrap_or_else(|| self.config.default_seed()),
        }
    }

    /// Nearest hit of `ray` against existing leaves or the floor. An item hit
    /// pushes the seed off the struck face by the new item's half extent.
    fn ray_seed(
        &self,
        store: &SceneStore,
        assets: &dyn AssetProvider,
        item: &SceneItem,
        base: &Transform,
        ray: &Ray,
    ) -> Option<Vec3> {
        let item_hit = store
            .items()
            .iter()
            .filter(|other| other.id() != item.id())
            .flat_map(|other| leaf_world_bounds(assets, other))
            .filter_map(|(_, bounds)| bounds.intersect_ray(ray).map(|t| (t, bounds)))
            .min_by(|a, b| a.0.total_cmp(&b.0));
        let ground_hit = ray.intersect_ground(self.floor_height);

        match (item_hit, ground_hit) {
            (Some((t, bounds)), ground) if ground.map_or(true, |g| t <= g) => {
                let point = ray.point_at(t);
                let normal = bounds.face_normal_at(point);

                let at_origin = Transform {
                    position: Vec3::zero(),
                    ..*base
                };
                let half = item_bounds_at(assets, item, &at_origin).size() * 0.5;
                let push = normal.x.abs() * half.x + normal.y.abs() * half.y + normal.z.abs() * half.z;

                Some(point + normal.normalize() * (push + self.config.surface_offset))
            }
            (_, Some(t)) => Some(ray.point_at(t)),
            (_, None) => None,
        }
    }
}
