//! Geometry and colour primitives, re-exported from `morphic-geom`.

pub use morphic_geom::{Color, Point, Rect};
