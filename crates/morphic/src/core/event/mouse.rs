//! Pointer input primitives.

use crate::{event::key::Mods, geom::Point};

/// Pointer buttons the hand distinguishes.
#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Button {
    /// Primary button.
    Left,
    /// Secondary button, or the primary one with control held.
    Right,
}

impl Button {
    /// Resolve a physical press. A control-click counts as a right click.
    pub fn effective(self, mods: Mods) -> Self {
        if mods.ctrl { Self::Right } else { self }
    }
}

/// A pointer event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mouse {
    /// Button pressed.
    Down {
        /// Pointer position in world coordinates.
        pos: Point,
        /// Physical button.
        button: Button,
        /// Keyboard modifiers at press time.
        mods: Mods,
    },
    /// Pointer moved.
    Move {
        /// Pointer position in world coordinates.
        pos: Point,
    },
    /// Button released.
    Up {
        /// Pointer position in world coordinates.
        pos: Point,
    },
    /// Host-detected double click.
    DoubleClick {
        /// Pointer position in world coordinates.
        pos: Point,
    },
    /// Wheel or trackpad scroll, in wheel steps.
    Scroll {
        /// Vertical wheel steps.
        dy: f64,
        /// Horizontal wheel steps.
        dx: f64,
    },
}
