//! Built-in widgets.

/// Angle-to-value mapping for dials.
pub mod dial;
/// Clipping frames.
pub mod frame;
/// Scrolling frames.
pub mod scroll;

pub use dial::dial_value;
pub use frame::Frame;
pub use scroll::{ScrollContents, ScrollFrame};

use crate::widget::Widget;

/// A rectangle filled with its morph's colour and nothing more.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Widget for Plain {
    fn duplicate(&self) -> Option<Box<dyn Widget>> {
        Some(Box::new(*self))
    }
}
