//! The hand: pointer state, hit-testing and the drag-and-drop protocol.
//!
//! The hand owns a morph of its own, kept outside the world tree. A grabbed
//! morph is reparented under it for the duration of the drag, so at every
//! instant the morph has exactly one parent: its origin, the hand, or its
//! drop target.

use std::{mem, sync::Arc, time::Duration};

use tracing::{debug, warn};

use super::{
    Core,
    animation::Easing,
    context::CoreContext,
    id::NodeId,
    node::DragCache,
    render, shadow,
};
use crate::{
    ReadContext,
    error::{Error, Result},
    event::{
        drop::{DroppedFile, Payload},
        key::Mods,
        mouse::Button,
    },
    geom::Point,
    render::Render,
    widget::Widget,
    widgets::scroll,
};

/// How long a cancelled drag takes to glide back to where it came from.
const SLIDE_BACK: Duration = Duration::from_millis(200);

/// Where a grabbed morph came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Situation {
    /// The parent it was taken from.
    pub origin: NodeId,
    /// Its position relative to that parent.
    pub position: Point,
}

/// What the hand is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandState {
    /// No button held and nothing carried.
    Idle,
    /// A button is held over a morph that will be picked up once the pointer
    /// travels past the grab threshold.
    Armed(NodeId),
    /// A morph is being carried.
    Dragging(NodeId),
}

/// Pointer state.
#[derive(Debug)]
pub struct Hand {
    /// Pointer position in world coordinates.
    pub(crate) position: Point,
    /// Button currently held.
    pub(crate) mouse_button: Option<Button>,
    /// The morph being carried.
    pub(crate) grabbed: Option<NodeId>,
    /// The morph a drag would pick up.
    pub(crate) morph_to_grab: Option<NodeId>,
    /// Where the button went down.
    pub(crate) grab_position: Option<Point>,
    /// Where the carried morph came from. Absent for template copies.
    pub(crate) grab_origin: Option<Situation>,
    /// The morph the button went down on.
    pub(crate) mouse_down_morph: Option<NodeId>,
    /// The hit morph and its ancestors, as of the last move.
    pub(crate) mouse_over_list: Vec<NodeId>,
    /// Every morph whose bounds held the pointer, as of the last move.
    pub(crate) mouse_over_bounds: Vec<NodeId>,
    /// Cleared when a right press is handled, suppressing the context menu.
    pub(crate) context_menu_enabled: bool,
    /// Morphs ignored by hit-testing and destroyed on the next press.
    pub(crate) temporaries: Vec<NodeId>,
    /// Set while a cancelled drag glides back to its origin.
    pub(crate) slide: Option<Situation>,
}

impl Default for Hand {
    fn default() -> Self {
        Self {
            position: Point::zero(),
            mouse_button: None,
            grabbed: None,
            morph_to_grab: None,
            grab_position: None,
            grab_origin: None,
            mouse_down_morph: None,
            mouse_over_list: Vec::new(),
            mouse_over_bounds: Vec::new(),
            context_menu_enabled: true,
            temporaries: Vec::new(),
            slide: None,
        }
    }
}

impl Hand {
    /// Pointer position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Button currently held.
    pub fn mouse_button(&self) -> Option<Button> {
        self.mouse_button
    }

    /// The morph being carried.
    pub fn grabbed(&self) -> Option<NodeId> {
        self.grabbed
    }

    /// Where the carried morph came from.
    pub fn grab_origin(&self) -> Option<Situation> {
        self.grab_origin
    }

    /// The hit chain of the last pointer move, innermost first.
    pub fn mouse_over_list(&self) -> &[NodeId] {
        &self.mouse_over_list
    }

    /// Morphs ignored by hit-testing.
    pub fn temporaries(&self) -> &[NodeId] {
        &self.temporaries
    }

    /// True while a cancelled drag glides home.
    pub fn is_sliding(&self) -> bool {
        self.slide.is_some()
    }

    /// Idle, armed or dragging.
    pub fn state(&self) -> HandState {
        match (self.grabbed, self.mouse_button, self.morph_to_grab) {
            (Some(g), _, _) => HandState::Dragging(g),
            (None, Some(_), Some(m)) => HandState::Armed(m),
            _ => HandState::Idle,
        }
    }

    /// Drop every reference into a destroyed subtree.
    pub(crate) fn forget(&mut self, gone: &[NodeId]) {
        let dead = |id: &NodeId| gone.contains(id);
        if self.grabbed.as_ref().is_some_and(dead) {
            self.grabbed = None;
            self.grab_origin = None;
            self.slide = None;
        }
        if self.morph_to_grab.as_ref().is_some_and(dead) {
            self.morph_to_grab = None;
        }
        if self.mouse_down_morph.as_ref().is_some_and(dead) {
            self.mouse_down_morph = None;
        }
        self.mouse_over_list.retain(|id| !dead(id));
        self.mouse_over_bounds.retain(|id| !dead(id));
        self.temporaries.retain(|id| !dead(id));
    }
}

/// Terminal widget of the hand's own morph. The hand draws nothing itself.
pub(crate) struct HandWidget;

impl Widget for HandWidget {
    fn name(&self) -> String {
        "hand".into()
    }

    fn render(&self, _r: &mut Render<'_>, _ctx: &dyn ReadContext) -> Result<()> {
        Ok(())
    }
}

/// The topmost morph under the pointer, or the world.
pub fn morph_at_pointer(core: &Core) -> NodeId {
    core.top_morph_at(core.world, core.hand.position, &core.hand.temporaries)
        .unwrap_or(core.world)
}

/// Every shown morph whose visible bounds contain the pointer, obscured or
/// not, pre-order.
pub fn all_morphs_at_pointer(core: &Core) -> Vec<NodeId> {
    let pos = core.hand.position;
    core.all_children(core.world)
        .into_iter()
        .filter(|id| !core.hand.temporaries.contains(id))
        .filter(|id| core.visible_bounds(*id).contains_point(pos))
        .filter(|id| {
            core.all_parents(*id)
                .iter()
                .all(|p| core.nodes[*p].visible)
        })
        .collect()
}

/// The innermost morph under the pointer that wants `dropped`. The world
/// takes anything nobody else wants.
pub fn drop_target_for(core: &Core, dropped: NodeId) -> NodeId {
    core.all_parents(morph_at_pointer(core))
        .into_iter()
        .find(|t| core.wants_drop_of(*t, dropped))
        .unwrap_or(core.world)
}

/// Move the pointer, carrying whatever the hand holds.
fn move_to(core: &mut Core, pos: Point) {
    let delta = pos - core.hand.position;
    core.hand.position = pos;
    let hand = core.hand_id;
    if core.hand.slide.is_some() {
        // The carried morph glides on its own.
        let node = &mut core.nodes[hand];
        node.bounds = node.bounds.with_origin(pos);
    } else {
        core.move_by(hand, delta);
    }
}

/// Pick a morph up.
///
/// The morph leaves its parent for the hand, with a snapshot of its subtree
/// and an optional shadow cached for cheap redraw. A morph not under the
/// pointer is centred on it first. Animations moving the morph are
/// cancelled.
pub fn grab(core: &mut Core, id: NodeId) -> Result<()> {
    if id == core.world || id == core.hand_id {
        return Err(Error::World("grabbed"));
    }
    if !core.contains(id) {
        return Err(Error::NodeNotFound(format!("{id:?}")));
    }
    if core.hand.grabbed.is_some() {
        return Ok(());
    }
    core.cancel_animations_of(id);
    let old_parent = core.parent_of(id);
    let situation = old_parent.map(|origin| Situation {
        origin,
        position: core.bounds(id).origin - core.bounds(origin).origin,
    });
    core.call(id, |w, ctx| w.prepare_to_be_grabbed(ctx));
    if !core.contains(id) {
        return Ok(());
    }
    let pos = core.hand.position;
    if !core.full_bounds(id).contains_point(pos) {
        core.set_center(id, pos);
    }
    let cache = drag_cache(core, id);
    core.nodes[id].drag = Some(cache);
    core.hand.grabbed = Some(id);
    if let Err(e) = core.add(core.hand_id, id) {
        core.hand.grabbed = None;
        core.nodes[id].drag = None;
        return Err(e);
    }
    core.hand.grab_origin = situation;
    debug!(node = ?id, name = %core.name_of(id), "grabbed");
    if let Some(parent) = old_parent {
        core.call(parent, |w, ctx| w.react_to_grab_of(id, ctx));
    }
    Ok(())
}

/// Snapshot a morph's subtree, and its shadow unless it opts out.
fn drag_cache(core: &Core, id: NodeId) -> DragCache {
    let node = &core.nodes[id];
    let position = node.bounds.origin;
    let (image, area) = render::full_image(core, id);
    let shadow = (!node.no_drop_shadow).then(|| {
        let prefs = &core.prefs;
        let (source, at) = if node.full_shadow_source {
            (image.clone(), area.origin)
        } else {
            (render::morph_image(core, id), node.bounds.spread().origin)
        };
        let offset = prefs.shadow_offset;
        if prefs.use_blurred_shadows {
            let margin = prefs.shadow_blur.max(0.0).ceil();
            let img = shadow::shadow_image_blurred(&source, offset, prefs.shadow_blur, prefs.shadow_color);
            (Arc::new(img), at + offset - Point::new(margin, margin) - position)
        } else {
            let img = shadow::shadow_image(&source, offset, prefs.shadow_color);
            (Arc::new(img), at + offset - position)
        }
    });
    DragCache {
        image: Arc::new(image),
        offset: area.origin - position,
        shadow,
    }
}

/// Drop the carried morph onto whatever wants it under the pointer.
pub fn drop(core: &mut Core) {
    let Some(id) = core.hand.grabbed else {
        return;
    };
    let target = drop_target_for(core, id);
    let target = select_for_edit(core, target);
    land(core, id, target);
}

/// Let a drop target substitute another morph for itself.
fn select_for_edit(core: &mut Core, target: NodeId) -> NodeId {
    let out = core.with_widget_mut(target, |w, core| {
        let mut ctx = CoreContext::new(core, target);
        w.select_for_edit(&mut ctx)
    });
    match out {
        Ok(Ok(Some(other))) if core.contains(other) => other,
        Ok(Err(e)) => {
            core.report(target, &e);
            target
        }
        _ => target,
    }
}

/// Move the carried morph from the hand into `target`, discard its drag
/// snapshot and notify both sides.
fn land(core: &mut Core, id: NodeId, target: NodeId) {
    // Added while the snapshot is still present, so the area it covered is
    // damaged.
    let target = match core.add(target, id) {
        Ok(()) => target,
        Err(e) => {
            warn!(node = ?id, "drop into {} failed: {e}", core.name_of(target));
            let world = core.world;
            if let Err(e) = core.add(world, id) {
                warn!(node = ?id, "drop into the world failed: {e}");
            }
            world
        }
    };
    if let Some(node) = core.nodes.get_mut(id) {
        node.drag = None;
    }
    core.changed(id);
    core.hand.grabbed = None;
    core.hand.grab_origin = None;
    core.hand.slide = None;
    debug!(node = ?id, target = %core.name_of(target), "dropped");
    core.call(id, |w, ctx| w.just_dropped(ctx));
    core.call(target, |w, ctx| w.react_to_drop_of(id, ctx));
}

/// Cancel the current drag.
///
/// The carried morph glides back to where it was grabbed and is re-added to
/// its origin once it arrives. A copy made from a template has nowhere to
/// return to and is destroyed.
pub fn slide_back(core: &mut Core) -> Result<()> {
    let Some(id) = core.hand.grabbed else {
        return Ok(());
    };
    if core.hand.slide.is_some() {
        return Ok(());
    }
    let Some(situation) = core.hand.grab_origin else {
        debug!(node = ?id, "drag of a copy cancelled");
        return core.destroy(id);
    };
    let destination = core.bounds(situation.origin).origin + situation.position;
    core.hand.slide = Some(situation);
    core.glide(id, destination, SLIDE_BACK, Easing::Sinusoidal, None);
    debug!(node = ?id, "sliding back");
    Ok(())
}

/// Land a sliding morph once its glide is over.
pub(crate) fn step_slide(core: &mut Core) {
    if core.hand.slide.is_none() {
        return;
    }
    if core.hand.grabbed.is_some_and(|g| !core.is_animating(g)) {
        complete_slide(core);
    }
}

/// Put a sliding morph back into its origin right away.
fn complete_slide(core: &mut Core) {
    let Some(situation) = core.hand.slide.take() else {
        return;
    };
    let Some(id) = core.hand.grabbed else {
        return;
    };
    core.cancel_animations_of(id);
    let origin = if core.world_of(situation.origin).is_some() {
        situation.origin
    } else {
        core.world
    };
    core.set_position(id, core.bounds(origin).origin + situation.position);
    land(core, id, origin);
}

/// Destroy the morphs registered as temporaries.
fn destroy_temporaries(core: &mut Core) {
    for id in mem::take(&mut core.hand.temporaries) {
        if let Err(e) = core.destroy(id) {
            warn!("destroying temporary failed: {e}");
        }
    }
}

/// True if the widget tracks pointer motion itself.
fn handles_mouse_move(core: &Core, id: NodeId) -> bool {
    core.nodes
        .get(id)
        .and_then(|n| n.widget.as_deref())
        .is_some_and(|w| w.handles_mouse_move())
}

/// A button went down.
///
/// Temporaries and overlays the press is not aimed at are destroyed. Unless
/// the hit morph tracks motion itself, its grab root is armed for a drag.
/// The press is then offered to the hit morph, bubbling outwards. A press
/// while carrying something drops it instead.
pub fn process_mouse_down(core: &mut Core, pos: Point, button: Button, mods: Mods) {
    complete_slide(core);
    move_to(core, pos);
    destroy_temporaries(core);
    core.hand.context_menu_enabled = true;
    core.hand.morph_to_grab = None;
    core.hand.grab_position = None;
    if core.hand.grabbed.is_some() {
        drop(core);
        core.hand.mouse_button = None;
        return;
    }
    let mut morph = morph_at_pointer(core);
    if let Some(menu) = core.active_menu {
        if !core.all_parents(morph).contains(&menu) {
            core.close_overlays();
        }
    }
    if let Some(handle) = core.active_handle {
        if morph != handle {
            core.close_overlays();
        }
    }
    if !core.contains(morph) {
        morph = morph_at_pointer(core);
    }
    if !handles_mouse_move(core, morph) {
        core.hand.morph_to_grab = Some(core.root_for_grab(morph));
        core.hand.grab_position = Some(pos);
    }
    let button = button.effective(mods);
    core.hand.mouse_button = Some(button);
    core.hand.mouse_down_morph = Some(morph);
    let handler = core.bubble(morph, |w, ctx| match button {
        Button::Left => w.mouse_down_left(pos, ctx),
        Button::Right => w.mouse_down_right(pos, ctx),
    });
    if button == Button::Right && handler.is_some_and(|h| h != core.world) {
        core.hand.context_menu_enabled = false;
    }
}

/// The pointer moved.
///
/// Delivers motion to morphs that track it, promotes an armed press to a
/// drag once past the grab threshold, and derives enter and leave events by
/// comparing the hit chain and the bounds under the pointer with those of
/// the previous move.
pub fn process_mouse_move(core: &mut Core, pos: Point) {
    move_to(core, pos);
    let top = morph_at_pointer(core);
    if core.hand.grabbed.is_none() {
        if handles_mouse_move(core, top) {
            let button = core.hand.mouse_button;
            core.call(top, |w, ctx| w.mouse_move(pos, button, ctx));
        }
        try_grab(core, pos);
    }
    let over_new = core.all_parents(top);
    let over_old = mem::take(&mut core.hand.mouse_over_list);
    let dragging = core.hand.mouse_button.is_some();
    let carried = core.hand.grabbed;
    for old in over_old.iter().filter(|m| !over_new.contains(m)) {
        core.call(*old, |w, ctx| w.mouse_leave(ctx));
        if dragging {
            core.call(*old, |w, ctx| w.mouse_leave_dragging(carried, ctx));
        }
    }
    for new in over_new.iter().filter(|m| !over_old.contains(m)) {
        core.call(*new, |w, ctx| w.mouse_enter(ctx));
        if dragging {
            core.call(*new, |w, ctx| w.mouse_enter_dragging(carried, ctx));
        }
    }
    if carried.is_some() {
        scroll::consider_auto_scroll(core, &over_new);
    }
    core.hand.mouse_over_list = over_new.into_iter().filter(|m| core.contains(*m)).collect();

    let bounds_new = all_morphs_at_pointer(core);
    let bounds_old = mem::take(&mut core.hand.mouse_over_bounds);
    for old in bounds_old.iter().filter(|m| !bounds_new.contains(m)) {
        core.call(*old, |w, ctx| w.mouse_leave_bounds(carried, ctx));
    }
    for new in bounds_new.iter().filter(|m| !bounds_old.contains(m)) {
        core.call(*new, |w, ctx| w.mouse_enter_bounds(carried, ctx));
    }
    core.hand.mouse_over_bounds = bounds_new.into_iter().filter(|m| core.contains(*m)).collect();
}

/// Pick up the armed morph once the pointer has travelled far enough.
fn try_grab(core: &mut Core, pos: Point) {
    if core.hand.mouse_button != Some(Button::Left) {
        return;
    }
    let (Some(target), Some(down)) = (core.hand.morph_to_grab, core.hand.grab_position) else {
        return;
    };
    if down.distance_to(pos) <= core.prefs.grab_threshold {
        return;
    }
    core.hand.morph_to_grab = None;
    let Some(node) = core.nodes.get(target) else {
        return;
    };
    let (draggable, template) = (node.draggable, node.template);
    // Grab relative to where the press happened, then catch up.
    move_to(core, down);
    // A template hands out copies even when it is also marked draggable.
    if template {
        if let Err(e) = grab_copy(core, target) {
            core.report(target, &e);
        }
    } else if draggable {
        let morph = select_for_edit(core, target);
        if let Err(e) = grab(core, morph) {
            core.report(target, &e);
        }
    }
    move_to(core, pos);
}

/// Grab a fresh copy of a template, leaving the template in place.
fn grab_copy(core: &mut Core, template: NodeId) -> Result<()> {
    let copy = core.full_copy(template)?;
    core.set_template(copy, false);
    core.set_draggable(copy, true);
    core.call(copy, |w, ctx| w.react_to_template_copy(ctx));
    grab(core, copy)?;
    core.hand.grab_origin = None;
    Ok(())
}

/// A button came up.
///
/// Ends a drag with a drop. Otherwise the release is delivered as a click,
/// and a right click that no morph claimed at press time opens the nearest
/// context menu.
pub fn process_mouse_up(core: &mut Core, pos: Point) {
    complete_slide(core);
    move_to(core, pos);
    let morph = morph_at_pointer(core);
    if core.hand.grabbed.is_some() {
        drop(core);
    } else {
        match core.hand.mouse_button {
            Some(Button::Left) => {
                core.bubble(morph, |w, ctx| w.mouse_click_left(pos, ctx));
            }
            Some(Button::Right) => {
                if core.hand.context_menu_enabled {
                    open_context_menu(core, morph);
                }
                core.bubble(morph, |w, ctx| w.mouse_click_right(pos, ctx));
            }
            None => {}
        }
    }
    core.hand.mouse_button = None;
    core.hand.morph_to_grab = None;
    core.hand.grab_position = None;
    core.hand.mouse_down_morph = None;
}

/// Pop up the context menu of `morph` or its nearest ancestor that has one.
fn open_context_menu(core: &mut Core, morph: NodeId) {
    let mut current = Some(morph);
    while let Some(id) = current {
        let menu = core
            .with_widget_mut(id, |w, core| {
                let mut ctx = CoreContext::new(core, id);
                w.context_menu(&mut ctx)
            })
            .ok()
            .flatten();
        if let Some(menu) = menu {
            let at = core.hand.position;
            if let Err(e) = core.pop_up(menu, at) {
                warn!("context menu failed: {e}");
            }
            return;
        }
        current = core.parent_of(id);
    }
}

/// A double click, offered to the morph under the pointer and bubbled.
pub fn process_double_click(core: &mut Core, pos: Point) {
    move_to(core, pos);
    let morph = morph_at_pointer(core);
    core.bubble(morph, |w, ctx| w.mouse_double_click(pos, ctx));
}

/// A wheel scroll, offered to the morph under the pointer and bubbled.
pub fn process_mouse_scroll(core: &mut Core, dy: f64, dx: f64) {
    let morph = morph_at_pointer(core);
    core.bubble(morph, |w, ctx| w.mouse_scroll(dy, dx, ctx));
}

/// Files dropped by the host.
///
/// Each file is classified and offered to the matching hook of the morph
/// under the pointer, bubbling outwards. Several files are bracketed by
/// bulk-drop notifications. A file that fails to decode is delivered as
/// binary data with a notice.
pub fn process_drop(core: &mut Core, pos: Point, files: &[DroppedFile]) {
    move_to(core, pos);
    let target = morph_at_pointer(core);
    let bulk = files.len() > 1;
    if bulk {
        core.bubble(target, |w, ctx| w.begin_bulk_drop(ctx));
    }
    for file in files {
        let payload = file.classify().unwrap_or_else(|e| {
            core.inform(&format!("{}: {e}", file.name));
            Payload::Binary(file.data.clone())
        });
        let name = file.name.as_str();
        match &payload {
            Payload::Image(img) => core.bubble(target, |w, ctx| w.dropped_image(img, name, ctx)),
            Payload::Svg(svg) => core.bubble(target, |w, ctx| w.dropped_svg(svg, name, ctx)),
            Payload::Audio(data) => core.bubble(target, |w, ctx| w.dropped_audio(data, name, ctx)),
            Payload::Text(text) => {
                core.bubble(target, |w, ctx| w.dropped_text(text, Some(name), ctx))
            }
            Payload::Binary(data) => {
                core.bubble(target, |w, ctx| w.dropped_binary(data, name, ctx))
            }
        };
    }
    if bulk {
        core.bubble(target, |w, ctx| w.end_bulk_drop(ctx));
    }
}

/// Plain text dropped by the host.
pub fn process_drop_text(core: &mut Core, pos: Point, text: &str) {
    move_to(core, pos);
    let target = morph_at_pointer(core);
    core.bubble(target, |w, ctx| w.dropped_text(text, None, ctx));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Morph, geom::Rect, preferences::Preferences, widgets::Plain};

    fn setup() -> (Core, NodeId) {
        let mut core = Core::new(Point::new(200.0, 200.0), Preferences::default());
        let a = core.create(
            Morph::new(Plain)
                .bounds(Rect::from_xywh(10.0, 10.0, 40.0, 40.0))
                .draggable(),
        );
        let world = core.world();
        core.add(world, a).unwrap();
        (core, a)
    }

    #[test]
    fn arm_then_grab_past_threshold() {
        let (mut core, a) = setup();
        process_mouse_down(&mut core, Point::new(20.0, 20.0), Button::Left, Mods::NONE);
        assert_eq!(core.hand().state(), HandState::Armed(a));
        process_mouse_move(&mut core, Point::new(22.0, 22.0));
        assert_eq!(core.hand().state(), HandState::Armed(a));
        process_mouse_move(&mut core, Point::new(30.0, 30.0));
        assert_eq!(core.hand().state(), HandState::Dragging(a));
        assert_eq!(core.parent_of(a), Some(core.hand_id()));
        assert_eq!(core.bounds(a).origin, Point::new(20.0, 20.0));
        assert_eq!(
            core.hand().grab_origin(),
            Some(Situation {
                origin: core.world(),
                position: Point::new(10.0, 10.0)
            })
        );
    }

    #[test]
    fn grab_centres_a_morph_away_from_the_pointer() -> Result<()> {
        let (mut core, a) = setup();
        move_to(&mut core, Point::new(150.0, 150.0));
        grab(&mut core, a)?;
        assert_eq!(core.bounds(a).center(), Point::new(150.0, 150.0));
        Ok(())
    }

    #[test]
    fn the_world_can_not_be_grabbed() {
        let (mut core, _) = setup();
        let world = core.world();
        assert_eq!(grab(&mut core, world), Err(Error::World("grabbed")));
    }

    #[test]
    fn drop_lands_in_the_world() -> Result<()> {
        let (mut core, a) = setup();
        move_to(&mut core, Point::new(20.0, 20.0));
        grab(&mut core, a)?;
        move_to(&mut core, Point::new(100.0, 100.0));
        drop(&mut core);
        assert_eq!(core.parent_of(a), Some(core.world()));
        assert_eq!(core.bounds(a).origin, Point::new(90.0, 90.0));
        assert!(core.node(a).is_some_and(|n| n.drag.is_none()));
        assert_eq!(core.hand().state(), HandState::Idle);
        core.validate_tree()
    }

    #[test]
    fn temporaries_are_ignored_then_destroyed() -> Result<()> {
        let (mut core, a) = setup();
        let tip = core.add_temporary(Morph::new(Plain).bounds(Rect::from_xywh(0.0, 0.0, 100.0, 100.0)))?;
        move_to(&mut core, Point::new(20.0, 20.0));
        assert_eq!(morph_at_pointer(&core), a);
        process_mouse_down(&mut core, Point::new(20.0, 20.0), Button::Left, Mods::NONE);
        assert!(!core.contains(tip));
        Ok(())
    }
}
