// src/lib.rs
//! Buildspace
//!
//! Scene composition core for an educational 3D building sandbox: placed
//! parts and glued groups, collision-aware placement, glue/deglue transform
//! reconciliation and the selection/gizmo bridge.

pub mod catalog;
pub mod config;
pub mod error;
pub mod glue;
pub mod interaction;
pub mod math;
pub mod placement;
pub mod prelude;
pub mod sandbox;
pub mod scene;
pub mod score;

// Re-export main types for convenience
pub use config::SandboxConfig;
pub use sandbox::{CommandOutcome, Sandbox};

/// Creates a sandbox with default settings and catalog-shaped assets
pub fn default() -> Sandbox<catalog::CatalogAssets> {
    Sandbox::new(SandboxConfig::default(), catalog::CatalogAssets::new())
}
