//! # Placement and Collision
//!
//! Turns "a new item was requested" into a concrete world transform that
//! rests on the floor and keeps a padding margin from everything already in
//! the scene, and keeps interactively dragged items out of each other.
//!
//! ## Key Components
//!
//! - [`PlacementEngine`] - Seeded, floor-snapped spiral search for new and duplicated items
//! - [`DragResolver`] - Per-tick scale clamp, floor push and single-axis push-out
//!
//! Placement gives up gracefully: when every ring of the spiral collides the
//! last candidate is accepted and the outcome is flagged as exhausted.

pub mod drag;
pub mod engine;

pub use drag::DragResolver;
pub use engine::{PlacementEngine, PlacementOutcome, Seed};
