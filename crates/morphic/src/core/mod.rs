#![allow(clippy::new_without_default)]
//! Core types and traits for the morphic engine.

// Core modules - public
/// Time-boxed value interpolation.
pub mod animation;
/// Debug dump utilities.
pub mod dump;
/// Core error types.
pub mod error;
/// Input event types.
pub mod event;
/// Engine configuration.
pub mod preferences;
/// Raster canvas and drawing interfaces.
pub mod render;
/// Drop shadow rasters.
pub mod shadow;
/// Testing utilities.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Core modules - internal
/// The morph arena.
pub mod arena;
/// Fluent morph construction.
pub mod builder;
/// Core context traits and implementations.
pub mod context;
/// Damage rectangle bookkeeping.
pub mod damage;
/// Pointer dispatch and drag-and-drop.
pub mod hand;
/// Node ID types.
pub mod id;
/// Per-morph data stored in the arena.
pub mod node;
/// Cooperative per-morph stepping.
pub mod step;
/// The world and its frame loop.
pub mod world;

// Public exports from internal modules
pub use arena::Core;
pub use builder::Morph;
pub use context::{Context, ReadContext};
pub use hand::{Hand, HandState, Situation};
pub use id::{AnimationId, NodeId};
pub use node::Node;
pub use world::{Surface, World};
