//! Widget trait and event outcome types.

use std::{
    any::{Any, type_name},
    collections::HashMap,
};

use convert_case::{Case, Casing};
use image::RgbaImage;

use crate::{
    Context, Morph, NodeId, ReadContext,
    error::Result,
    event::{key::Key, mouse::Button},
    geom::{Point, Rect},
    render::Render,
};

/// The result of an event handler.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventOutcome {
    /// The event was processed and propagation stops.
    Handle,
    /// The event was not handled and will bubble up the tree.
    Ignore,
}

/// Widgets are the behavior attached to morphs in the Core arena.
///
/// Every hook has a default, so a widget implements only what it responds
/// to. Event hooks returning [`EventOutcome::Ignore`] pass the event on to
/// the parent morph.
pub trait Widget: Any + Send {
    /// Name used in dumps and notices.
    fn name(&self) -> String {
        let name = type_name::<Self>();
        let short = name.rsplit("::").next().unwrap_or(name);
        let short = short.split('<').next().unwrap_or(short);
        short.to_case(Case::Snake)
    }

    /// Paint this morph, not its children. `r` is in local coordinates with
    /// the morph's top-left corner at the origin.
    fn render(&self, r: &mut Render<'_>, ctx: &dyn ReadContext) -> Result<()> {
        r.fill(ctx.color());
        Ok(())
    }

    /// Keep a raster of `render` output and blit it instead of re-rendering.
    fn is_caching_image(&self) -> bool {
        false
    }

    /// Only opaque pixels of this morph are hit by the pointer.
    fn is_free_form(&self) -> bool {
        false
    }

    /// Children are clipped to this morph's bounds.
    fn clips_children(&self) -> bool {
        false
    }

    /// Rearrange after the morph's extent changed.
    fn fix_layout(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// Periodic work, throttled by the morph's fps.
    fn step(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// Primary button pressed over this morph.
    fn mouse_down_left(&mut self, _pos: Point, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// Secondary button pressed over this morph.
    fn mouse_down_right(&mut self, _pos: Point, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// Primary button released over this morph without a drag.
    fn mouse_click_left(&mut self, _pos: Point, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// Secondary button released over this morph.
    fn mouse_click_right(&mut self, _pos: Point, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// Double click over this morph.
    fn mouse_double_click(
        &mut self,
        _pos: Point,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// True if the widget tracks pointer motion itself. Such morphs receive
    /// `mouse_move` while a button is held and are never armed for grabbing.
    fn handles_mouse_move(&self) -> bool {
        false
    }

    /// Pointer moved over this morph with `button` held.
    fn mouse_move(
        &mut self,
        _pos: Point,
        _button: Option<Button>,
        _ctx: &mut dyn Context,
    ) -> Result<()> {
        Ok(())
    }

    /// The pointer entered this morph or one of its descendants.
    fn mouse_enter(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// The pointer left this morph and its descendants.
    fn mouse_leave(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// The pointer entered with a button held, carrying `dragged` if the
    /// hand holds a morph.
    fn mouse_enter_dragging(
        &mut self,
        _dragged: Option<NodeId>,
        _ctx: &mut dyn Context,
    ) -> Result<()> {
        Ok(())
    }

    /// The pointer left with a button held.
    fn mouse_leave_dragging(
        &mut self,
        _dragged: Option<NodeId>,
        _ctx: &mut dyn Context,
    ) -> Result<()> {
        Ok(())
    }

    /// The pointer entered this morph's own bounds, even if obscured.
    fn mouse_enter_bounds(
        &mut self,
        _dragged: Option<NodeId>,
        _ctx: &mut dyn Context,
    ) -> Result<()> {
        Ok(())
    }

    /// The pointer left this morph's own bounds.
    fn mouse_leave_bounds(
        &mut self,
        _dragged: Option<NodeId>,
        _ctx: &mut dyn Context,
    ) -> Result<()> {
        Ok(())
    }

    /// Wheel scroll over this morph.
    fn mouse_scroll(&mut self, _dy: f64, _dx: f64, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// Redirect a grab to another morph. `None` applies the default rule:
    /// the nearest draggable ancestor, or the morph sitting directly in the
    /// world or a frame.
    fn root_for_grab(&self, _ctx: &dyn ReadContext) -> Option<NodeId> {
        None
    }

    /// About to be picked up by the hand.
    fn prepare_to_be_grabbed(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// `grabbed`, formerly a child of this morph, was picked up.
    fn react_to_grab_of(&mut self, _grabbed: NodeId, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// True if `dropped` may be dropped into this morph.
    fn wants_drop_of(&self, _dropped: NodeId, ctx: &dyn ReadContext) -> bool {
        ctx.accepts_drops()
    }

    /// Substitute another morph as the drop target.
    fn select_for_edit(&mut self, _ctx: &mut dyn Context) -> Result<Option<NodeId>> {
        Ok(None)
    }

    /// This morph was just dropped into a new parent.
    fn just_dropped(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// `dropped` was just added to this morph by the hand.
    fn react_to_drop_of(&mut self, _dropped: NodeId, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// This morph was created by dragging a template.
    fn react_to_template_copy(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// Menu offered on a right click, popped up at the hand.
    fn context_menu(&mut self, ctx: &mut dyn Context) -> Option<Morph> {
        if ctx.preferences().dev_mode {
            self.developers_menu(ctx)
        } else {
            self.user_menu(ctx)
        }
    }

    /// Context menu in developer mode.
    fn developers_menu(&mut self, _ctx: &mut dyn Context) -> Option<Morph> {
        None
    }

    /// Context menu outside developer mode.
    fn user_menu(&mut self, _ctx: &mut dyn Context) -> Option<Morph> {
        None
    }

    /// A key went down while this morph, or a descendant, had focus.
    fn process_key_down(&mut self, _key: Key, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// A key came up.
    fn process_key_up(&mut self, _key: Key, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// A key produced input.
    fn process_key_press(&mut self, _key: Key, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// A raster image file was dropped.
    fn dropped_image(
        &mut self,
        _image: &RgbaImage,
        _name: &str,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// An SVG file was dropped.
    fn dropped_svg(&mut self, _svg: &str, _name: &str, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// An audio file was dropped.
    fn dropped_audio(
        &mut self,
        _data: &[u8],
        _name: &str,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// Text was dropped, from a file when `name` is set.
    fn dropped_text(
        &mut self,
        _text: &str,
        _name: Option<&str>,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// A file of no recognised kind was dropped.
    fn dropped_binary(
        &mut self,
        _data: &[u8],
        _name: &str,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// Several files are about to be delivered.
    fn begin_bulk_drop(&mut self, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// All files of a bulk drop have been delivered.
    fn end_bulk_drop(&mut self, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// The world was resized to `bounds`.
    fn react_to_world_resize(&mut self, _bounds: Rect, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// A fresh copy of this widget for `full_copy` and template drags.
    /// Widgets that return `None` make their subtree uncopyable.
    fn duplicate(&self) -> Option<Box<dyn Widget>> {
        None
    }

    /// Remap node ids held by this widget after a copy. `map` takes every
    /// id in the copied subtree to its copy.
    fn update_references(&mut self, _map: &HashMap<NodeId, NodeId>) {}
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
