use serde::{Deserialize, Serialize};

/// An sRGB colour with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity in `0.0..=1.0`.
    pub a: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0.0);

    /// An opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// A colour with explicit opacity.
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// The same colour with a different opacity.
    pub fn with_alpha(&self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..*self
        }
    }

    /// True if nothing would be painted with this colour.
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Channels as 8-bit RGBA, with opacity scaled by `alpha`.
    pub fn to_rgba8(&self, alpha: f64) -> [u8; 4] {
        let a = (self.a * alpha).clamp(0.0, 1.0);
        [self.r, self.g, self.b, (a * 255.0).round() as u8]
    }

    /// Build a colour from 8-bit RGBA channels.
    pub fn from_rgba8(px: [u8; 4]) -> Self {
        Self::rgba(px[0], px[1], px[2], f64::from(px[3]) / 255.0)
    }

    /// Blend towards black by `fraction` (`0.0..=1.0`).
    pub fn darker(&self, fraction: f64) -> Self {
        self.mixed(fraction, Self::BLACK)
    }

    /// Blend towards white by `fraction` (`0.0..=1.0`).
    pub fn lighter(&self, fraction: f64) -> Self {
        self.mixed(fraction, Self::WHITE)
    }

    /// Linear blend of the colour channels towards `other`. Opacity is kept.
    pub fn mixed(&self, fraction: f64, other: Self) -> Self {
        let f = fraction.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) * (1.0 - f) + f64::from(b) * f).round() as u8;
        Self::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            self.a,
        )
    }
}
