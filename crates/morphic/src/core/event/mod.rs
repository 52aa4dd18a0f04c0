/// Files dropped from the host.
pub mod drop;
/// Keyboard input.
pub mod key;
/// Pointer input.
pub mod mouse;

use crate::geom::Point;

/// Everything a host feeds into a world.
#[derive(Debug, Clone)]
pub enum Event {
    /// A pointer action.
    Mouse(mouse::Mouse),
    /// A key went down.
    KeyDown(key::Key),
    /// A key came up.
    KeyUp(key::Key),
    /// A key produced input.
    KeyPress(key::Key),
    /// Files were dropped at a position.
    Drop {
        /// Pointer position in world coordinates.
        pos: Point,
        /// The dropped files, in host order.
        files: Vec<drop::DroppedFile>,
    },
    /// Plain text was dropped at a position.
    DropText {
        /// Pointer position in world coordinates.
        pos: Point,
        /// The dropped text.
        text: String,
    },
    /// The host surface changed size.
    Resize(Point),
}
