//! # Scene Items
//!
//! The tagged data model for placed parts. A scene is a flat list of
//! [`SceneItem`]s; each is either a single [`SceneObject`] or a glued
//! [`SceneGroup`] of objects. Groups never contain groups.

use std::fmt;

use uuid::Uuid;

use crate::catalog::{ComponentKind, MaterialKind};
use crate::error::SceneError;
use crate::math::{Transform, Vec3};

/// Scene-wide unique identifier of an object or group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ItemId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One placed, glue-able part.
///
/// `transform` is `None` until the placement engine has resolved where the
/// object goes; that is the only transient state the scene allows.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub id: ItemId,
    pub component: ComponentKind,
    pub material: MaterialKind,
    pub transform: Option<Transform>,
}

impl SceneObject {
    /// New object awaiting placement
    pub fn unplaced(component: ComponentKind, material: MaterialKind) -> Self {
        Self {
            id: ItemId::new(),
            component,
            material,
            transform: None,
        }
    }

    /// New object with a known transform
    pub fn placed(component: ComponentKind, material: MaterialKind, transform: Transform) -> Self {
        Self {
            id: ItemId::new(),
            component,
            material,
            transform: Some(transform),
        }
    }

    pub fn is_placed(&self) -> bool {
        self.transform.is_some()
    }

    /// Copy of this object under a new id
    pub fn with_fresh_id(&self) -> Self {
        Self {
            id: ItemId::new(),
            ..self.clone()
        }
    }
}

/// A rigid union of at least two objects.
///
/// `transform` is the group's world frame. Every child's transform is
/// expressed relative to that frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGroup {
    id: ItemId,
    children: Vec<SceneObject>,
    pub transform: Transform,
}

impl SceneGroup {
    /// Builds a group under a fresh id.
    ///
    /// Fails when there are fewer than two children, when a child has no
    /// transform, or when two children share an id.
    pub fn new(children: Vec<SceneObject>, transform: Transform) -> Result<Self, SceneError> {
        if children.len() < 2 {
            return Err(SceneError::GroupTooSmall(children.len()));
        }
        for (i, child) in children.iter().enumerate() {
            if !child.is_placed() {
                return Err(SceneError::Unplaced(child.id));
            }
            if children[..i].iter().any(|c| c.id == child.id) {
                return Err(SceneError::DuplicateId(child.id));
            }
        }

        Ok(Self {
            id: ItemId::new(),
            children,
            transform,
        })
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Children in insertion order, transforms relative to the group
    pub fn children(&self) -> &[SceneObject] {
        &self.children
    }

    /// Same group with every child switched to `material`
    pub fn with_material(mut self, material: MaterialKind) -> Self {
        for child in &mut self.children {
            child.material = material;
        }
        self
    }

    /// Deep copy with a new id for the group and for every child. Children
    /// keep their local transforms.
    pub fn with_fresh_ids(&self) -> Self {
        Self {
            id: ItemId::new(),
            children: self.children.iter().map(SceneObject::with_fresh_id).collect(),
            transform: self.transform,
        }
    }

    /// Children with their transforms composed into world space, keeping
    /// their ids, components and materials
    pub fn world_children(&self) -> Vec<SceneObject> {
        self.children
            .iter()
            .map(|child| SceneObject {
                transform: child.transform.map(|local| self.transform.compose(&local)),
                ..child.clone()
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneItem {
    Object(SceneObject),
    Group(SceneGroup),
}

impl SceneItem {
    pub fn id(&self) -> ItemId {
        match self {
            SceneItem::Object(object) => object.id,
            SceneItem::Group(group) => group.id,
        }
    }

    /// World transform of the item; `None` for an unplaced object
    pub fn transform(&self) -> Option<Transform> {
        match self {
            SceneItem::Object(object) => object.transform,
            SceneItem::Group(group) => Some(group.transform),
        }
    }

    pub(crate) fn set_transform(&mut self, transform: Transform) {
        match self {
            SceneItem::Object(object) => object.transform = Some(transform),
            SceneItem::Group(group) => group.transform = transform,
        }
    }

    pub fn position(&self) -> Option<Vec3> {
        self.transform().map(|t| t.position)
    }

    pub fn is_group(&self) -> bool {
        matches!(self, SceneItem::Group(_))
    }

    pub fn as_object(&self) -> Option<&SceneObject> {
        match self {
            SceneItem::Object(object) => Some(object),
            SceneItem::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&SceneGroup> {
        match self {
            SceneItem::Group(group) => Some(group),
            SceneItem::Object(_) => None,
        }
    }

    /// The leaf objects making up this item: the object itself, or the
    /// group's children
    pub fn flatten(&self) -> &[SceneObject] {
        match self {
            SceneItem::Object(object) => std::slice::from_ref(object),
            SceneItem::Group(group) => &group.children,
        }
    }

    /// Leaf objects with world-space transforms
    pub fn world_leaves(&self) -> Vec<SceneObject> {
        match self {
            SceneItem::Object(object) => vec![object.clone()],
            SceneItem::Group(group) => group.world_children(),
        }
    }

    /// Every id this item owns, its own first
    pub fn ids(&self) -> Vec<ItemId> {
        match self {
            SceneItem::Object(object) => vec![object.id],
            SceneItem::Group(group) => std::iter::once(group.id)
                .chain(group.children.iter().map(|c| c.id))
                .collect(),
        }
    }

    /// Deep copy with fresh ids throughout
    pub fn with_fresh_ids(&self) -> SceneItem {
        match self {
            SceneItem::Object(object) => SceneItem::Object(object.with_fresh_id()),
            SceneItem::Group(group) => SceneItem::Group(group.with_fresh_ids()),
        }
    }
}

impl From<SceneObject> for SceneItem {
    fn from(object: SceneObject) -> Self {
        SceneItem::Object(object)
    }
}

impl From<SceneGroup> for SceneItem {
    fn from(group: SceneGroup) -> Self {
        SceneItem::Group(group)
    }
}
