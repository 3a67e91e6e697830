//! # Sandbox
//!
//! The facade a UI layer drives. It owns the scene store, the placement and
//! drag engines, the selection bridge and the camera, and turns user-level
//! commands into store mutations.
//!
//! Every command reports a [`CommandOutcome`]. Unmet preconditions such as
//! "nothing selected" or "nothing touching" are [`CommandOutcome::NoOp`]
//! with a message for the user; `Err` is reserved for broken invariants.

use std::fmt;

use crate::catalog::{AssetProvider, ComponentKind, MaterialKind};
use crate::config::SandboxConfig;
use crate::error::SceneError;
use crate::glue::{self, DeglueOutcome, GlueOutcome};
use crate::interaction::{
    HeadlessGizmo, InputAction, OrbitCamera, SelectionBridge, TransformGizmo,
};
use crate::math::Transform;
use crate::placement::{DragResolver, PlacementEngine, PlacementOutcome, Seed};
use crate::scene::{item_world_bounds, ItemId, SceneSnapshot, SceneStore};
use crate::score::{self, ScoreResult};

/// User-visible status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage(String);

impl StatusMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The scene or its selection changed
    Applied(StatusMessage),
    /// Preconditions were not met; the scene is unchanged
    NoOp(StatusMessage),
}

impl CommandOutcome {
    fn applied(text: impl Into<String>) -> Self {
        CommandOutcome::Applied(StatusMessage::new(text))
    }

    fn noop(text: impl Into<String>) -> Self {
        CommandOutcome::NoOp(StatusMessage::new(text))
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, CommandOutcome::Applied(_))
    }

    pub fn message(&self) -> &StatusMessage {
        match self {
            CommandOutcome::Applied(message) | CommandOutcome::NoOp(message) => message,
        }
    }
}

pub struct Sandbox<A: AssetProvider> {
    config: SandboxConfig,
    assets: A,
    store: SceneStore,
    placement: PlacementEngine,
    drag: DragResolver,
    bridge: SelectionBridge,
    camera: OrbitCamera,
}

impl<A: AssetProvider> Sandbox<A> {
    /// Sandbox with a headless gizmo and the default camera
    pub fn new(config: SandboxConfig, assets: A) -> Self {
        Self::with_gizmo(config, assets, Box::new(HeadlessGizmo::new()))
    }

    pub fn with_gizmo(config: SandboxConfig, assets: A, gizmo: Box<dyn TransformGizmo>) -> Self {
        Self {
            placement: PlacementEngine::from_config(&config),
            drag: DragResolver::from_config(&config),
            config,
            assets,
            store: SceneStore::new(),
            bridge: SelectionBridge::new(gizmo),
            camera: OrbitCamera::default(),
        }
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    pub fn assets(&self) -> &A {
        &self.assets
    }

    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    /// What the renderer reads once per frame
    pub fn snapshot(&self) -> SceneSnapshot {
        self.store.snapshot()
    }

    pub fn bridge(&self) -> &SelectionBridge {
        &self.bridge
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn score(&self) -> ScoreResult {
        score::compute(&self.store.placed_parts())
    }

    /// Adds a part where the camera is looking
    pub fn add_component(
        &mut self,
        component: ComponentKind,
        material: MaterialKind,
    ) -> Result<CommandOutcome, SceneError> {
        let seed = Seed::Ray(self.camera.look_ray());
        self.add_component_at(component, material, seed)
    }

    /// Adds a part and resolves its placement from an explicit seed
    pub fn add_component_at(
        &mut self,
        component: ComponentKind,
        material: MaterialKind,
        seed: Seed,
    ) -> Result<CommandOutcome, SceneError> {
        if !component.allowed_materials().contains(&material) {
            return Ok(CommandOutcome::noop(format!(
                "{} cannot be made of {}",
                component.display_name(),
                material.display_name()
            )));
        }

        let id = self.store.add_object(component, material, None);
        let outcome = self.placement.place(&mut self.store, &self.assets, id, seed)?;
        self.bridge.sync(&self.store);

        Ok(CommandOutcome::applied(placement_message(
            &format!("Added {} ({})", component.display_name(), material.display_name()),
            &outcome,
        )))
    }

    /// Selects `id` directly, e.g. from an outliner list
    pub fn select(&mut self, id: ItemId) {
        self.store.select_item(id);
        self.bridge.sync(&self.store);
    }

    pub fn duplicate_selected(&mut self) -> Result<CommandOutcome, SceneError> {
        let Some(source) = self.live_selection() else {
            return Ok(CommandOutcome::noop("Select something to duplicate"));
        };

        let copy = self
            .store
            .duplicate(source, self.placement.config().duplicate_offset())?;
        let outcome = self.placement.place_duplicate(&mut self.store, &self.assets, copy)?;
        self.bridge.sync(&self.store);

        log::info!("Duplicated {} as {}", source, copy);
        Ok(CommandOutcome::applied(placement_message("Duplicated", &outcome)))
    }

    /// Glues the selection to the first other item whose bounds touch it
    pub fn glue_selected(&mut self) -> Result<CommandOutcome, SceneError> {
        let Some(selected) = self.live_selection() else {
            return Ok(CommandOutcome::noop("Select something to glue"));
        };
        let Some(partner) = self.touching_partner(selected) else {
            return Ok(CommandOutcome::noop("Nothing is touching the selected part"));
        };

        let outcome = match glue::glue(&mut self.store, &self.assets, selected, partner)? {
            GlueOutcome::Glued(_) => CommandOutcome::applied("Glued parts together"),
            GlueOutcome::NotTouching => CommandOutcome::noop("Nothing is touching the selected part"),
        };
        self.bridge.sync(&self.store);
        Ok(outcome)
    }

    pub fn deglue_selected(&mut self) -> Result<CommandOutcome, SceneError> {
        let Some(selected) = self.live_selection() else {
            return Ok(CommandOutcome::noop("Select a glued group to separate"));
        };

        let outcome = match glue::deglue(&mut self.store, selected)? {
            DeglueOutcome::Released(ids) => {
                CommandOutcome::applied(format!("Separated into {} parts", ids.len()))
            }
            DeglueOutcome::NotAGroup => CommandOutcome::noop("Only glued groups can be separated"),
        };
        self.bridge.sync(&self.store);
        Ok(outcome)
    }

    pub fn delete_selected(&mut self) -> Result<CommandOutcome, SceneError> {
        let had_selection = self.store.selected_id().is_some();
        let outcome = match self.store.delete_selected() {
            Some(item) => {
                log::info!("Deleted {}", item.id());
                CommandOutcome::applied("Deleted")
            }
            // The selected id was already gone; only the selection is cleared
            None if had_selection => CommandOutcome::applied("Selection cleared"),
            None => CommandOutcome::noop("Nothing selected"),
        };
        self.bridge.sync(&self.store);
        Ok(outcome)
    }

    pub fn set_material_for_selected(&mut self, material: MaterialKind) -> Result<CommandOutcome, SceneError> {
        if !self.store.set_material_for_selected(material) {
            return Ok(CommandOutcome::noop("Select something to change its material"));
        }
        Ok(CommandOutcome::applied(format!("Material set to {}", material.display_name())))
    }

    /// Pointer released at `screen_pos` inside a viewport of `screen_size`
    pub fn pointer_release(&mut self, screen_pos: (f64, f64), screen_size: (f64, f64)) -> Option<ItemId> {
        let ray = self.camera.screen_to_ray(screen_pos, screen_size);
        self.bridge.pointer_release(&mut self.store, &self.assets, &ray)
    }

    /// One gizmo drag frame; returns the corrected transform to display
    pub fn drag_update(&mut self, proposed: Transform) -> Result<Option<Transform>, SceneError> {
        self.bridge.sync(&self.store);
        self.bridge
            .drag_update(&self.store, &self.assets, &self.drag, proposed)
    }

    pub fn drag_end(&mut self) -> Result<CommandOutcome, SceneError> {
        Ok(match self.bridge.drag_end(&mut self.store)? {
            Some(_) => CommandOutcome::applied("Moved"),
            None => CommandOutcome::noop("Nothing was dragged"),
        })
    }

    pub fn cancel_drag(&mut self) {
        self.bridge.cancel_drag(&self.store);
    }

    pub fn handle_action(&mut self, action: InputAction) -> Result<CommandOutcome, SceneError> {
        log::debug!("Handling {:?}", action);
        match action {
            InputAction::Delete => self.delete_selected(),
            InputAction::Glue => self.glue_selected(),
            InputAction::Deglue => self.deglue_selected(),
            InputAction::Duplicate => self.duplicate_selected(),
            InputAction::SetTransformMode(mode) => {
                self.bridge.set_mode(mode);
                Ok(CommandOutcome::applied(format!("Transform mode: {}", mode)))
            }
        }
    }

    fn live_selection(&self) -> Option<ItemId> {
        self.store.selected_item().map(|item| item.id())
    }

    fn touching_partner(&self, selected: ItemId) -> Option<ItemId> {
        let bounds = item_world_bounds(&self.assets, self.store.get(selected)?)?;
        self.store
            .items()
            .iter()
            .filter(|item| item.id() != selected)
            .find(|item| {
                item_world_bounds(&self.assets, item).is_some_and(|other| other.intersects(&bounds))
            })
            .map(|item| item.id())
    }
}

impl<A: AssetProvider> fmt::Debug for Sandbox<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sandbox")
            .field("items", &self.store.len())
            .field("selected", &self.store.selected_id())
            .field("revision", &self.store.revision())
            .field("bridge", &self.bridge)
            .finish()
    }
}

fn placement_message(prefix: &str, outcome: &PlacementOutcome) -> String {
    if outcome.exhausted {
        format!("{}, but there was no free space nearby", prefix)
    } else {
        prefix.to_string()
    }
}
