//! Demo widgets and scenes for morphic.

/// A blinking indicator stepped at a fixed rate.
pub mod blinker;
/// The gallery scene and its scripted tour.
pub mod gallery;
/// A rotary knob driven by pointer angle.
pub mod knob;

#[cfg(test)]
mod tests;
