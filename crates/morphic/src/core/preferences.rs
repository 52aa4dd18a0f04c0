//! Per-world engine configuration.
//!
//! Preferences are a plain value handed to [`World`](crate::World) at
//! construction. Two worlds in one process can be configured independently.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    geom::{Color, Point},
};

/// Tunable engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Pointer travel in pixels before an armed morph is picked up.
    pub grab_threshold: f64,
    /// Damage rectangles closer than this are merged during condensation.
    pub damage_proximity: f64,
    /// Above this many damage rectangles, a frame repaints their union.
    pub damage_collapse_limit: usize,
    /// Render drag shadows with a gaussian blur instead of a hard outline.
    pub use_blurred_shadows: bool,
    /// Offset of the drag shadow from the dragged morph.
    pub shadow_offset: Point,
    /// Blur radius of drag shadows when blurring is on.
    pub shadow_blur: f64,
    /// Opacity the drag shadow is painted with.
    pub shadow_alpha: f64,
    /// Colour of drag shadows.
    pub shadow_color: Color,
    /// Thickness of scroll bars. Auto-scroll edge bands are three times this.
    pub scroll_bar_size: f64,
    /// Pixels scrolled per wheel step.
    pub mouse_scroll_amount: f64,
    /// Offer developer context menus instead of user menus.
    pub dev_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            grab_threshold: 5.0,
            damage_proximity: 20.0,
            damage_collapse_limit: 1000,
            use_blurred_shadows: true,
            shadow_offset: Point::new(7.0, 7.0),
            shadow_blur: 8.0,
            shadow_alpha: 0.2,
            shadow_color: Color::BLACK,
            scroll_bar_size: 12.0,
            mouse_scroll_amount: 40.0,
            dev_mode: false,
        }
    }
}

impl Preferences {
    /// Parse preferences from JSON. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let prefs: Self = serde_json::from_str(s)?;
        prefs.validate()?;
        Ok(prefs)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings the engine can not honour.
    pub fn validate(&self) -> Result<()> {
        if !non_negative(self.grab_threshold) {
            return Err(Error::Preferences("grab_threshold must be >= 0".into()));
        }
        if !non_negative(self.damage_proximity) {
            return Err(Error::Preferences("damage_proximity must be >= 0".into()));
        }
        if self.damage_collapse_limit == 0 {
            return Err(Error::Preferences(
                "damage_collapse_limit must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.shadow_alpha) {
            return Err(Error::Preferences("shadow_alpha must be in 0..=1".into()));
        }
        if !non_negative(self.shadow_blur) {
            return Err(Error::Preferences("shadow_blur must be >= 0".into()));
        }
        Ok(())
    }
}

/// True for finite-or-infinite values at or above zero. NaN fails.
fn non_negative(v: f64) -> bool {
    v >= 0.0
}
