//! Geometry and colour value types for the morphic engine.
//!
//! Everything here is a small `Copy` value. Coordinates are `f64` logical
//! pixels with the y axis pointing down.

/// RGBA colour values.
mod color;
/// Two dimensional points.
mod point;
/// Axis-aligned rectangles.
mod rect;

pub use color::Color;
pub use point::Point;
pub use rect::Rect;
