//! Error types for the sandbox core.
//!
//! User-level no-ops (glue without a touching partner, deglue on a plain
//! object, delete with nothing selected) are not errors; they surface as
//! [`CommandOutcome::NoOp`](crate::sandbox::CommandOutcome::NoOp). The
//! enums below cover programming errors and bad external input.

use std::path::PathBuf;

use thiserror::Error;

use crate::scene::ItemId;

/// Violations of scene invariants or references to items that do not exist
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("no top-level item with id {0}")]
    UnknownItem(ItemId),

    #[error("a group needs at least 2 children, got {0}")]
    GroupTooSmall(usize),

    #[error("id {0} appears more than once in the scene")]
    DuplicateId(ItemId),

    #[error("item {0} is not a group")]
    NotAGroup(ItemId),

    #[error("item {0} has not been placed yet")]
    Unplaced(ItemId),

    #[error("cannot glue item {0} to itself")]
    SelfGlue(ItemId),

    #[error("transform has a collapsed axis and cannot be inverted")]
    DegenerateTransform,
}

/// Unknown catalog identifiers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown component kind '{0}'")]
    UnknownComponent(String),

    #[error("unknown material kind '{0}'")]
    UnknownMaterial(String),
}

/// Problems loading or validating a [`SandboxConfig`](crate::config::SandboxConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
