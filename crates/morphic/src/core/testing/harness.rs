use std::{
    mem,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use super::surface::RecordingSurface;
use crate::{
    Morph, NodeId, World,
    error::Result,
    event::{
        key::{Key, Mods},
        mouse::{Button, Mouse},
    },
    geom::{Color, Point, Rect},
    preferences::Preferences,
};

/// Interval between cycles when a harness lets time pass.
const FRAME: Duration = Duration::from_millis(10);

/// A world with a pinned clock and a recording surface. Tests drive it with
/// pointer gestures and inspect the canvas and presented regions.
pub struct Harness {
    /// The world under test.
    pub world: World,
    /// Rectangles presented since the last call to `take_presented`.
    pub presented: Arc<Mutex<Vec<Rect>>>,
}

impl Harness {
    /// A 400x300 world with default preferences.
    pub fn new() -> Self {
        Self::wrap(World::new(Point::new(400.0, 300.0)))
    }

    /// A world of the given size with default preferences.
    pub fn with_size(extent: Point) -> Self {
        Self::wrap(World::new(extent))
    }

    /// A world of the given size with custom preferences.
    pub fn with_preferences(extent: Point, prefs: Preferences) -> Result<Self> {
        Ok(Self::wrap(World::with_preferences(extent, prefs)?))
    }

    /// Pin the clock and attach a recording surface.
    fn wrap(mut world: World) -> Self {
        let (presented, surface) = RecordingSurface::create();
        world.set_surface(surface);
        world.pin_clock(Instant::now());
        Self { world, presented }
    }

    /// The world root.
    pub fn root(&self) -> NodeId {
        self.world.id()
    }

    /// Create a morph and add it to the world.
    pub fn add(&mut self, morph: impl Into<Morph>) -> Result<NodeId> {
        self.world.add(morph)
    }

    /// Create a morph and add it to `parent`.
    pub fn add_to(&mut self, parent: NodeId, morph: impl Into<Morph>) -> Result<NodeId> {
        let id = self.world.core.create(morph);
        self.world.core.add(parent, id)?;
        Ok(id)
    }

    /// Run one cycle without moving the clock.
    pub fn cycle(&mut self) -> Result<()> {
        self.world.do_one_cycle()
    }

    /// Move the clock forward by `by`, one cycle per elapsed frame.
    pub fn advance(&mut self, by: Duration) -> Result<()> {
        let mut left = by;
        while left > Duration::ZERO {
            let step = left.min(FRAME);
            self.world.advance_clock(step);
            self.world.do_one_cycle()?;
            left -= step;
        }
        Ok(())
    }

    /// Press the left button at `pos`.
    pub fn press(&mut self, pos: Point) {
        self.press_with(pos, Button::Left, Mods::NONE);
    }

    /// Press a button with modifiers held.
    pub fn press_with(&mut self, pos: Point, button: Button, mods: Mods) {
        self.world.mouse(Mouse::Down { pos, button, mods });
    }

    /// Move the pointer.
    pub fn move_to(&mut self, pos: Point) {
        self.world.mouse(Mouse::Move { pos });
    }

    /// Release the held button.
    pub fn release(&mut self, pos: Point) {
        self.world.mouse(Mouse::Up { pos });
    }

    /// Left press and release at `pos`.
    pub fn click(&mut self, pos: Point) {
        self.press(pos);
        self.release(pos);
    }

    /// Right press and release at `pos`.
    pub fn right_click(&mut self, pos: Point) {
        self.press_with(pos, Button::Right, Mods::NONE);
        self.release(pos);
    }

    /// A host double click at `pos`.
    pub fn double_click(&mut self, pos: Point) {
        self.world.mouse(Mouse::DoubleClick { pos });
    }

    /// Wheel steps at the current pointer position.
    pub fn scroll(&mut self, dy: f64, dx: f64) {
        self.world.mouse(Mouse::Scroll { dy, dx });
    }

    /// Press at `from` and move to `to` in four steps, keeping the button
    /// held.
    pub fn hold_and_move(&mut self, from: Point, to: Point) {
        self.press(from);
        for i in 1..=4 {
            let t = f64::from(i) / 4.0;
            self.move_to(from + (to - from) * t);
        }
    }

    /// A complete drag from `from` to `to`, ending with a release.
    pub fn drag(&mut self, from: Point, to: Point) {
        self.hold_and_move(from, to);
        self.release(to);
    }

    /// Send a key down, press and up.
    pub fn key(&mut self, k: impl Into<Key>) -> Result<()> {
        let k = k.into();
        self.world.key_down(k)?;
        self.world.key_press(k);
        self.world.key_up(k);
        Ok(())
    }

    /// The canvas colour under `p`.
    pub fn pixel(&self, p: Point) -> Option<Color> {
        self.world.canvas().pixel_at(p)
    }

    /// Collect the rectangles presented since the last call.
    pub fn take_presented(&self) -> Vec<Rect> {
        self.presented
            .lock()
            .map(|mut p| mem::take(&mut *p))
            .unwrap_or_default()
    }

    /// Collect the world's notices.
    pub fn notices(&mut self) -> Vec<String> {
        self.world.take_notices()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
