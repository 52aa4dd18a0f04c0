//! Morphic: a retained-mode, raster-rendered GUI engine.
//!
//! A tree of morphs draws itself into a single bitmap, receives pointer and
//! keyboard events, supports drag-and-drop and animates. Only the regions
//! that changed since the last frame are repainted.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`World`] - The root of a scene: owns the canvas, the hand and the frame loop
//! - [`Core`] - The morph arena with tree, geometry and damage operations
//! - [`Widget`] - The trait implemented by all morph behaviours
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry and colour primitives
//! - [`widgets`] - Built-in frame and scroll-frame widgets

#![warn(missing_docs)]

// Internal core module - re-export specific items below
mod core;

// Public modules
pub mod geom;
pub mod widget;
pub mod widgets;

#[cfg(any(test, feature = "testing"))]
pub use core::testing;
pub use core::{
    AnimationId, Context, Core, Hand, HandState, Morph, Node, NodeId, ReadContext, Situation,
    Surface, World,
};
pub use core::{animation, dump, error, event, preferences, render, shadow};

pub use widget::{EventOutcome, Widget};
