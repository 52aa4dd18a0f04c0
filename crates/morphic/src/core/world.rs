use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::{
    Core, animation, dump, hand,
    id::NodeId,
    render::{self, Canvas},
    step,
};
use crate::{
    Context, Morph, ReadContext,
    error::Result,
    event::{
        Event,
        drop::DroppedFile,
        key::{Key, KeyCode, Mods},
        mouse::{Button, Mouse},
    },
    geom::{Point, Rect},
    preferences::Preferences,
    render::Render,
    widget::{EventOutcome, Widget},
};

/// Where repaired regions of the world raster are shown.
///
/// The world calls `present` once per repaired rectangle at the end of each
/// cycle, after the canvas holds the new pixels.
pub trait Surface {
    /// Copy `rect` of `canvas` to the display.
    fn present(&mut self, canvas: &Canvas, rect: Rect) -> Result<()>;
}

/// The world root's widget. Every event that bubbles this far stops here.
pub(crate) struct WorldWidget;

impl Widget for WorldWidget {
    fn name(&self) -> String {
        "world".into()
    }

    fn render(&self, r: &mut Render<'_>, ctx: &dyn ReadContext) -> Result<()> {
        r.fill(ctx.color());
        Ok(())
    }

    fn mouse_down_left(&mut self, _pos: Point, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Handle)
    }

    fn mouse_down_right(&mut self, _pos: Point, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Handle)
    }

    fn mouse_click_left(&mut self, _pos: Point, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Handle)
    }

    fn mouse_click_right(&mut self, _pos: Point, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Handle)
    }

    fn mouse_double_click(
        &mut self,
        _pos: Point,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        Ok(EventOutcome::Handle)
    }

    fn mouse_scroll(&mut self, _dy: f64, _dx: f64, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Handle)
    }

    fn process_key_down(&mut self, _key: Key, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Handle)
    }

    fn process_key_up(&mut self, _key: Key, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Handle)
    }

    fn process_key_press(&mut self, _key: Key, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Handle)
    }

    fn dropped_text(
        &mut self,
        _text: &str,
        name: Option<&str>,
        ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        if let Some(name) = name {
            ctx.inform(&format!("nothing here accepts {name}"));
        }
        Ok(EventOutcome::Handle)
    }

    fn begin_bulk_drop(&mut self, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Handle)
    }

    fn end_bulk_drop(&mut self, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Handle)
    }
}

/// A morph world bound to a raster canvas.
///
/// The world owns the arena (with the hand inside it), the backing canvas
/// and an optional display surface. Hosts feed it events with
/// [`World::event`] and call [`World::do_one_cycle`] at a steady cadence;
/// each cycle steps morphs, advances animations and repaints damaged
/// regions.
pub struct World {
    /// The morph arena.
    pub core: Core,
    /// Backing store for the whole world.
    canvas: Canvas,
    /// Display target for repaired regions.
    surface: Option<Box<dyn Surface>>,
    /// Regions repainted by the last cycle.
    last_repaired: Vec<Rect>,
}

impl World {
    /// A world of the given size with default preferences.
    pub fn new(extent: Point) -> Self {
        let mut world = Self {
            core: Core::new(extent, Preferences::default()),
            canvas: canvas_for(extent),
            surface: None,
            last_repaired: Vec::new(),
        };
        world.core.full_changed(world.core.world());
        world
    }

    /// A world of the given size with custom preferences.
    pub fn with_preferences(extent: Point, prefs: Preferences) -> Result<Self> {
        prefs.validate()?;
        let mut world = Self::new(extent);
        world.core.prefs = prefs;
        Ok(world)
    }

    /// Install the display target.
    pub fn set_surface(&mut self, surface: impl Surface + 'static) {
        self.surface = Some(Box::new(surface));
    }

    /// The world root.
    pub fn id(&self) -> NodeId {
        self.core.world()
    }

    /// The backing raster.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Regions repainted by the last cycle, condensed.
    pub fn last_repaired(&self) -> &[Rect] {
        &self.last_repaired
    }

    /// Create a morph and add it to the world as the topmost child.
    pub fn add(&mut self, morph: impl Into<Morph>) -> Result<NodeId> {
        let id = self.core.create(morph);
        self.core.add(self.core.world(), id)?;
        Ok(id)
    }

    /// Feed a host event into the world.
    pub fn event(&mut self, e: Event) -> Result<()> {
        match e {
            Event::Mouse(m) => {
                self.mouse(m);
                Ok(())
            }
            Event::KeyDown(k) => self.key_down(k),
            Event::KeyUp(k) => {
                self.key_up(k);
                Ok(())
            }
            Event::KeyPress(k) => {
                self.key_press(k);
                Ok(())
            }
            Event::Drop { pos, files } => {
                self.drop_files(pos, &files);
                Ok(())
            }
            Event::DropText { pos, text } => {
                hand::process_drop_text(&mut self.core, pos, &text);
                Ok(())
            }
            Event::Resize(extent) => {
                self.resize(extent);
                Ok(())
            }
        }
    }

    /// Dispatch a pointer event through the hand.
    pub fn mouse(&mut self, m: Mouse) {
        match m {
            Mouse::Down { pos, button, mods } => {
                hand::process_mouse_down(&mut self.core, pos, button, mods);
            }
            Mouse::Move { pos } => hand::process_mouse_move(&mut self.core, pos),
            Mouse::Up { pos } => hand::process_mouse_up(&mut self.core, pos),
            Mouse::DoubleClick { pos } => hand::process_double_click(&mut self.core, pos),
            Mouse::Scroll { dy, dx } => hand::process_mouse_scroll(&mut self.core, dy, dx),
        }
    }

    /// A key went down. Escape while carrying a morph cancels the drag;
    /// everything else goes to the focused morph and bubbles to the world.
    pub fn key_down(&mut self, k: Key) -> Result<()> {
        if k == KeyCode::Esc && self.core.hand().grabbed().is_some() {
            return self.cancel_drag();
        }
        let target = self.key_target();
        self.core.bubble(target, |w, ctx| w.process_key_down(k, ctx));
        Ok(())
    }

    /// A key came up.
    pub fn key_up(&mut self, k: Key) {
        let target = self.key_target();
        self.core.bubble(target, |w, ctx| w.process_key_up(k, ctx));
    }

    /// A key produced input.
    pub fn key_press(&mut self, k: Key) {
        let target = self.key_target();
        self.core.bubble(target, |w, ctx| w.process_key_press(k, ctx));
    }

    /// The focused morph, or the world when nothing has focus.
    fn key_target(&self) -> NodeId {
        self.core
            .keyboard_focus()
            .filter(|id| self.core.contains(*id))
            .unwrap_or(self.core.world())
    }

    /// Deliver host files dropped at `pos`.
    pub fn drop_files(&mut self, pos: Point, files: &[DroppedFile]) {
        hand::process_drop(&mut self.core, pos, files);
    }

    /// Press and release the left button at `pos`.
    pub fn click(&mut self, pos: Point) {
        self.mouse(Mouse::Down {
            pos,
            button: Button::Left,
            mods: Mods::NONE,
        });
        self.mouse(Mouse::Up { pos });
    }

    /// Advance the world by one frame: step morphs, advance animations,
    /// land sliding drags, then repaint damaged regions.
    pub fn do_one_cycle(&mut self) -> Result<()> {
        let now = self.core.now();
        step::step_frame(&mut self.core, now);
        animation::step_animations(&mut self.core, now);
        hand::step_slide(&mut self.core);
        self.update_broken()
    }

    /// Repaint every queued damage rectangle and present it.
    ///
    /// Damage is condensed first. Each rectangle is cleared, the world is
    /// drawn into it, and whatever the hand carries is drawn on top.
    pub fn update_broken(&mut self) -> Result<()> {
        let prefs = self.core.preferences();
        let (proximity, limit, shadow_alpha) = (
            prefs.damage_proximity,
            prefs.damage_collapse_limit,
            prefs.shadow_alpha,
        );
        let rects = self.core.damage.drain_condensed(proximity, limit);
        let world = self.core.world();
        let hand = self.core.hand_id();
        let visible = self.canvas.bounds();
        for rect in &rects {
            let clip = rect.intersect(&visible);
            if clip.is_empty() {
                continue;
            }
            self.canvas.clear_rect(clip);
            render::full_draw_on(&self.core, &mut self.canvas, world, clip);
            render::draw_hand(&self.core, &mut self.canvas, hand, clip, shadow_alpha);
            if let Some(surface) = self.surface.as_mut() {
                surface.present(&self.canvas, clip)?;
            }
        }
        if !rects.is_empty() {
            trace!(count = rects.len(), "repaired");
        }
        self.last_repaired = rects;
        Ok(())
    }

    /// Queue the whole world for repaint.
    pub fn full_changed(&mut self) {
        let world = self.core.world();
        self.core.full_changed(world);
    }

    /// Resize the world and its canvas. Everything is repainted and every
    /// morph is told about the new bounds.
    pub fn resize(&mut self, extent: Point) {
        let world = self.core.world();
        let origin = self.core.bounds(world).origin;
        let bounds = Rect::from_extent(origin, extent);
        self.core.set_bounds(world, bounds);
        self.canvas = canvas_for(extent);
        self.core.full_changed(world);
        debug!(?extent, "world resized");
        let bounds = self.core.bounds(world);
        for id in self.core.all_children(world) {
            self.core.call(id, |w, ctx| w.react_to_world_resize(bounds, ctx));
        }
    }

    /// Send whatever the hand carries back to where it came from.
    pub fn cancel_drag(&mut self) -> Result<()> {
        hand::slide_back(&mut self.core)
    }

    /// Pick `id` up with the hand.
    pub fn grab(&mut self, id: NodeId) -> Result<()> {
        hand::grab(&mut self.core, id)
    }

    /// Drop whatever the hand carries onto the morph under the pointer.
    pub fn drop_grabbed(&mut self) {
        hand::drop(&mut self.core);
    }

    /// Collect the notices recorded since the last call.
    pub fn take_notices(&mut self) -> Vec<String> {
        self.core.take_notices()
    }

    /// Freeze the frame clock at `now`. Stepping and animations then only
    /// advance through [`World::advance_clock`].
    pub fn pin_clock(&mut self, now: Instant) {
        self.core.pinned_time = Some(now);
    }

    /// Move a pinned clock forward, pinning it at the current time first if
    /// it was running free.
    pub fn advance_clock(&mut self, by: Duration) {
        let now = self.core.now();
        self.core.pinned_time = Some(now + by);
    }

    /// A colourised dump of the world tree.
    pub fn dump(&self) -> Result<String> {
        dump::dump(&self.core, self.core.world())
    }
}

/// A canvas covering a world of the given extent.
fn canvas_for(extent: Point) -> Canvas {
    let r = Rect::from_extent(Point::zero(), extent).spread();
    Canvas::for_rect(r)
}
