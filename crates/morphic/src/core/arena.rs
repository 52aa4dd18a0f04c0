use std::{
    any::{Any, TypeId},
    collections::HashMap,
    mem,
    sync::Arc,
    time::{Duration, Instant},
};

use slotmap::SlotMap;
use tracing::{debug, trace, warn};

use super::{
    animation::{Animation, Animations, Easing, OnComplete},
    builder::Morph,
    context::{CoreContext, CoreReadContext},
    damage::Damage,
    hand::{Hand, HandWidget},
    id::{AnimationId, NodeId},
    node::Node,
    render,
    step::NextStep,
    world::WorldWidget,
};
use crate::{
    Context, ReadContext,
    error::{Error, Result},
    geom::{Color, Point, Rect},
    preferences::Preferences,
    widget::{EventOutcome, Widget},
};

/// Default colour of the world background.
const WORLD_COLOR: Color = Color::rgb(205, 205, 205);

/// The morph arena: tree structure, geometry, damage and the state shared
/// between dispatch, stepping and repaint.
pub struct Core {
    /// Node storage arena.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// The world root.
    pub(crate) world: NodeId,
    /// The hand's own morph. It is a separate root so whatever it carries
    /// is never hit by the pointer.
    pub(crate) hand_id: NodeId,
    /// Pointer state.
    pub(crate) hand: Hand,
    /// Regions awaiting repaint.
    pub(crate) damage: Damage,
    /// Running animations.
    pub(crate) animations: Animations,
    /// Morph receiving key events.
    pub(crate) keyboard_focus: Option<NodeId>,
    /// Open context menu.
    pub(crate) active_menu: Option<NodeId>,
    /// Open manipulation handle.
    pub(crate) active_handle: Option<NodeId>,
    /// Configuration for this world.
    pub(crate) prefs: Preferences,
    /// User-visible notices not yet collected by the host.
    pub(crate) notices: Vec<String>,
    /// Frame clock override.
    pub(crate) pinned_time: Option<Instant>,
}

impl Core {
    /// Build an arena holding a world of the given size and its hand.
    pub fn new(extent: Point, prefs: Preferences) -> Self {
        let mut nodes = SlotMap::with_key();
        let world = nodes.insert(
            Morph::new(WorldWidget)
                .bounds(Rect::from_extent(Point::zero(), extent))
                .color(WORLD_COLOR)
                .accepts_drops()
                .into_node(),
        );
        let hand_id = nodes.insert(
            Morph::new(HandWidget)
                .bounds(Rect::from_extent(Point::zero(), Point::zero()))
                .into_node(),
        );
        Self {
            nodes,
            world,
            hand_id,
            hand: Hand::default(),
            damage: Damage::new(),
            animations: Animations::default(),
            keyboard_focus: None,
            active_menu: None,
            active_handle: None,
            prefs,
            notices: Vec::new(),
            pinned_time: None,
        }
    }

    /// The world root.
    pub fn world(&self) -> NodeId {
        self.world
    }

    /// The hand's own morph.
    pub fn hand_id(&self) -> NodeId {
        self.hand_id
    }

    /// Pointer state.
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Engine configuration.
    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Regions queued for the next repaint.
    pub fn damage(&self) -> &Damage {
        &self.damage
    }

    /// The frame clock: wall-clock time unless pinned.
    pub fn now(&self) -> Instant {
        self.pinned_time.unwrap_or_else(Instant::now)
    }

    /// Number of live morphs, including the world and the hand.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the world and hand are permanent.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True if `id` refers to a live morph.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Node data for a morph.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Widget name of a morph, or an empty string for missing ids.
    pub fn name_of(&self, id: NodeId) -> &str {
        self.nodes.get(id).map_or("", |n| n.name.as_str())
    }

    /// Borrow a morph's widget as its concrete type.
    pub fn widget_ref<W: Widget>(&self, id: NodeId) -> Option<&W> {
        let widget: &dyn Any = self.nodes.get(id)?.widget.as_deref()?;
        widget.downcast_ref::<W>()
    }

    /// Mutably borrow a morph's widget as its concrete type.
    pub fn widget_mut<W: Widget>(&mut self, id: NodeId) -> Option<&mut W> {
        let widget: &mut dyn Any = self.nodes.get_mut(id)?.widget.as_deref_mut()?;
        widget.downcast_mut::<W>()
    }

    /// A read-only context bound to a live morph.
    pub(crate) fn read_context(&self, id: NodeId) -> Option<CoreReadContext<'_>> {
        self.contains(id).then(|| CoreReadContext::new(self, id))
    }

    /// Create a detached morph.
    pub fn create(&mut self, morph: impl Into<Morph>) -> NodeId {
        let id = self.nodes.insert(morph.into().into_node());
        trace!(node = ?id, name = %self.name_of(id), "created");
        id
    }

    /// Append `child` as the topmost child of `parent`.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.add_at(parent, child, usize::MAX)
    }

    /// Insert `child` into `parent` at `index`, clamped to the child count.
    ///
    /// The child is detached from any previous parent first. Both the
    /// vacated and the new region are damaged.
    pub fn add_at(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<()> {
        self.require(parent)?;
        self.require(child)?;
        if child == self.world {
            return Err(Error::World("reparented"));
        }
        if child == self.hand_id {
            return Err(Error::Invalid("the hand can not be reparented".into()));
        }
        if self.all_parents(parent).contains(&child) {
            return Err(Error::Cycle(format!(
                "{} into {}",
                self.name_of(child),
                self.name_of(parent)
            )));
        }
        self.full_changed(child);
        self.unlink(child);
        let siblings = &mut self.nodes[parent].children;
        siblings.insert(index.min(siblings.len()), child);
        self.nodes[child].parent = Some(parent);
        self.full_changed(child);
        self.assert_tree();
        Ok(())
    }

    /// Remove a morph from its parent, leaving it alive but detached.
    pub fn detach(&mut self, child: NodeId) -> Result<()> {
        self.require(child)?;
        if child == self.world {
            return Err(Error::World("detached"));
        }
        self.full_changed(child);
        self.unlink(child);
        self.assert_tree();
        Ok(())
    }

    /// Destroy a morph and its subtree.
    ///
    /// The vacated region is damaged, and focus, overlays and hand state
    /// pointing into the subtree are cleared. Animations targeting it stop.
    /// Destroying a morph that no longer exists is a no-op.
    pub fn destroy(&mut self, id: NodeId) -> Result<()> {
        if id == self.world || id == self.hand_id {
            return Err(Error::World("destroyed"));
        }
        if !self.contains(id) {
            return Ok(());
        }
        self.full_changed(id);
        self.unlink(id);
        let gone = self.all_children(id);
        for g in &gone {
            for aid in self.animations.targeting(*g) {
                if let Some(a) = self.animations.get_mut(aid) {
                    a.cancel();
                }
            }
            self.nodes.remove(*g);
        }
        for slot in [
            &mut self.keyboard_focus,
            &mut self.active_menu,
            &mut self.active_handle,
        ] {
            if slot.is_some_and(|s| gone.contains(&s)) {
                *slot = None;
            }
        }
        self.hand.forget(&gone);
        debug!(node = ?id, count = gone.len(), "destroyed");
        self.assert_tree();
        Ok(())
    }

    /// Deep copy a subtree.
    ///
    /// Widgets are copied with `Widget::duplicate`, then every copy gets a
    /// chance to remap ids that pointed into the original subtree. The copy
    /// is detached; if any widget refuses to be copied nothing is created.
    pub fn full_copy(&mut self, id: NodeId) -> Result<NodeId> {
        self.require(id)?;
        if id == self.world {
            return Err(Error::World("copied"));
        }
        let originals = self.all_children(id);
        let mut widgets = Vec::with_capacity(originals.len());
        for o in &originals {
            let node = &self.nodes[*o];
            let widget = node
                .widget
                .as_ref()
                .and_then(|w| w.duplicate())
                .ok_or_else(|| Error::NotCopyable(node.name.clone()))?;
            widgets.push(widget);
        }
        let mut map = HashMap::with_capacity(originals.len());
        for (o, widget) in originals.iter().zip(widgets) {
            let copy = self.nodes[*o].copy_with(widget);
            map.insert(*o, self.nodes.insert(copy));
        }
        for o in &originals {
            let copy = map[o];
            let children: Vec<NodeId> = self.nodes[*o].children.iter().map(|c| map[c]).collect();
            for c in &children {
                self.nodes[*c].parent = Some(copy);
            }
            self.nodes[copy].children = children;
        }
        for copy in map.values() {
            if let Some(w) = self.nodes[*copy].widget.as_mut() {
                w.update_references(&map);
            }
        }
        debug!(node = ?id, count = map.len(), "copied");
        Ok(map[&id])
    }

    /// Return the parent of a morph.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Children of a morph in draw order.
    pub fn children_of(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// A morph and all of its descendants, pre-order.
    pub fn all_children(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                out.push(id);
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }

    /// A morph and its ancestors, innermost first.
    pub fn all_parents(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.contains(id).then_some(id);
        while let Some(id) = current {
            out.push(id);
            current = self.parent_of(id);
        }
        out
    }

    /// True if any descendant of `id`, not counting `id`, satisfies `pred`.
    pub fn any_child(&self, id: NodeId, pred: impl Fn(&Node) -> bool) -> bool {
        self.all_children(id)
            .iter()
            .skip(1)
            .any(|c| pred(&self.nodes[*c]))
    }

    /// The nearest morph, starting at `id` itself, whose widget is a `W`.
    pub fn parent_that_is<W: Widget>(&self, id: NodeId) -> Option<NodeId> {
        self.parent_with_type(id, TypeId::of::<W>())
    }

    /// The nearest morph, starting at `id` itself, whose widget has type
    /// `ty`.
    pub fn parent_with_type(&self, id: NodeId, ty: TypeId) -> Option<NodeId> {
        self.all_parents(id)
            .into_iter()
            .find(|p| self.nodes[*p].widget_type == ty)
    }

    /// The topmost ancestor of a morph.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        self.all_parents(id).last().copied().unwrap_or(id)
    }

    /// The world, if `id` is attached to it.
    pub fn world_of(&self, id: NodeId) -> Option<NodeId> {
        (self.root_of(id) == self.world).then_some(self.world)
    }

    /// Absolute bounds of a morph. Missing morphs report an empty rectangle.
    pub fn bounds(&self, id: NodeId) -> Rect {
        self.nodes.get(id).map(|n| n.bounds).unwrap_or_default()
    }

    /// Bounds of a morph merged with those of its visible descendants.
    /// Clipping morphs report their own bounds.
    pub fn full_bounds(&self, id: NodeId) -> Rect {
        let Some(node) = self.nodes.get(id) else {
            return Rect::default();
        };
        if node.clips_children {
            return node.bounds;
        }
        node.children
            .iter()
            .filter(|c| self.nodes.get(**c).is_some_and(|n| n.visible))
            .fold(node.bounds, |acc, c| acc.union(&self.full_bounds(*c)))
    }

    /// Bounds of a morph cut down by every clipping ancestor.
    pub fn visible_bounds(&self, id: NodeId) -> Rect {
        self.all_parents(id)
            .iter()
            .skip(1)
            .map(|p| &self.nodes[*p])
            .filter(|n| n.clips_children)
            .fold(self.bounds(id), |acc, n| acc.intersect(&n.bounds))
    }

    /// Queue damage for a morph's visible bounds.
    pub fn changed(&mut self, id: NodeId) {
        if let Some(rect) = self.damage_for(id, false) {
            self.damage.push(rect);
        }
    }

    /// Queue damage for a morph's full bounds.
    pub fn full_changed(&mut self, id: NodeId) {
        if let Some(rect) = self.damage_for(id, true) {
            self.damage.push(rect);
        }
    }

    /// Damage produced by a morph, or `None` if it is not tracking changes
    /// or is not on screen. Morphs in the hand damage the area their drag
    /// snapshot covers.
    fn damage_for(&self, id: NodeId, full: bool) -> Option<Rect> {
        let node = self.nodes.get(id)?;
        if !node.track_changes {
            return None;
        }
        let root = self.root_of(id);
        if root == self.hand_id {
            let grabbed = self.hand.grabbed()?;
            let g = self.nodes.get(grabbed)?;
            let rect = match &g.drag {
                Some(cache) => cache.bounds_at(g.bounds.origin),
                None => self.full_bounds(grabbed),
            };
            return Some(rect.spread());
        }
        if root != self.world {
            return None;
        }
        let rect = if full {
            self.full_bounds(id)
        } else {
            self.visible_bounds(id)
        };
        Some(rect.spread())
    }

    /// Stop or resume damage tracking for a morph.
    pub fn set_track_changes(&mut self, id: NodeId, track: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.track_changes = track;
        }
    }

    /// Move a morph so its top-left corner lands on `p`.
    pub fn set_position(&mut self, id: NodeId, p: Point) {
        let delta = p - self.bounds(id).origin;
        self.move_by(id, delta);
    }

    /// Move a morph so its centre lands on `p`.
    pub fn set_center(&mut self, id: NodeId, p: Point) {
        let delta = p - self.bounds(id).center();
        self.move_by(id, delta);
    }

    /// Translate a morph and its whole subtree.
    pub fn move_by(&mut self, id: NodeId, delta: Point) {
        if delta.is_zero() || !self.contains(id) {
            return;
        }
        self.full_changed(id);
        for d in self.all_children(id) {
            let node = &mut self.nodes[d];
            node.bounds = node.bounds.translate_by(delta);
        }
        self.full_changed(id);
    }

    /// Resize a morph, keeping its position, then let its widget fix the
    /// layout.
    pub fn set_extent(&mut self, id: NodeId, extent: Point) {
        let extent = extent.max(Point::zero());
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if node.bounds.extent() == extent {
            return;
        }
        self.changed(id);
        let node = &mut self.nodes[id];
        node.bounds = Rect::from_extent(node.bounds.origin, extent);
        self.call(id, |w, ctx| w.fix_layout(ctx));
        self.rerender(id);
    }

    /// Move and resize a morph.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        self.set_position(id, bounds.origin);
        self.set_extent(id, bounds.extent());
    }

    /// Change a morph's fill colour.
    pub fn set_color(&mut self, id: NodeId, color: Color) {
        match self.nodes.get_mut(id) {
            Some(node) if node.color != color => node.color = color,
            _ => return,
        }
        self.rerender(id);
    }

    /// Change a morph's opacity, clamped to `0..=1`.
    pub fn set_alpha(&mut self, id: NodeId, alpha: f64) {
        let alpha = alpha.clamp(0.0, 1.0);
        match self.nodes.get_mut(id) {
            Some(node) if node.alpha != alpha => node.alpha = alpha,
            _ => return,
        }
        self.rerender(id);
    }

    /// Show or hide a morph.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if visible { self.show(id) } else { self.hide(id) }
    }

    /// Hide a morph. Its full bounds are damaged while still visible.
    pub fn hide(&mut self, id: NodeId) {
        if !self.nodes.get(id).is_some_and(|n| n.visible) {
            return;
        }
        self.full_changed(id);
        self.nodes[id].visible = false;
    }

    /// Show a hidden morph.
    pub fn show(&mut self, id: NodeId) {
        match self.nodes.get_mut(id) {
            Some(node) if !node.visible => node.visible = true,
            _ => return,
        }
        self.full_changed(id);
    }

    /// Allow or forbid the hand to pick a morph up. Templates still hand out
    /// copies.
    pub fn set_draggable(&mut self, id: NodeId, draggable: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.draggable = draggable;
        }
    }

    /// Mark a morph as a template. Templates are not draggable themselves.
    pub fn set_template(&mut self, id: NodeId, template: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.template = template;
            if template {
                node.draggable = false;
            }
        }
    }

    /// Set a morph's default drop acceptance.
    pub fn set_accepts_drops(&mut self, id: NodeId, accepts: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.accepts_drops = accepts;
        }
    }

    /// Replace a morph's non-interactive regions.
    pub fn set_holes(&mut self, id: NodeId, holes: Vec<Rect>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.holes = holes;
        }
    }

    /// Limit a morph's step rate.
    pub fn set_fps(&mut self, id: NodeId, fps: f64) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.fps = fps.max(0.0);
        }
    }

    /// Register a callback to run before a morph's next step.
    pub fn set_next_step(&mut self, id: NodeId, f: NextStep) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.on_next_step = Some(f);
        }
    }

    /// Move a morph by the least amount that puts its full bounds inside
    /// `area`, edge by edge. Left and top win when it does not fit.
    pub fn keep_within(&mut self, id: NodeId, area: Rect) {
        let off = self.full_bounds(id).right() - area.right();
        if off > 0.0 {
            self.move_by(id, Point::new(-off, 0.0));
        }
        let off = self.full_bounds(id).left() - area.left();
        if off < 0.0 {
            self.move_by(id, Point::new(-off, 0.0));
        }
        let off = self.full_bounds(id).bottom() - area.bottom();
        if off > 0.0 {
            self.move_by(id, Point::new(0.0, -off));
        }
        let off = self.full_bounds(id).top() - area.top();
        if off < 0.0 {
            self.move_by(id, Point::new(0.0, -off));
        }
    }

    /// Drop a morph's cached raster and queue its damage.
    pub fn rerender(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        node.cached_image.borrow_mut().take();
        self.changed(id);
    }

    /// The topmost visible morph under `p` in the subtree at `root`.
    ///
    /// Children are scanned back to front. Holes and the transparent pixels
    /// of free-form morphs do not count as hits, and clipping morphs hide
    /// the parts of their children outside their bounds. Subtrees rooted at
    /// `excluded` morphs are skipped.
    pub fn top_morph_at(&self, root: NodeId, p: Point, excluded: &[NodeId]) -> Option<NodeId> {
        let node = self.nodes.get(root)?;
        if !node.visible || excluded.contains(&root) {
            return None;
        }
        if node.clips_children && !node.bounds.contains_point(p) {
            return None;
        }
        for child in node.children.iter().rev() {
            if let Some(hit) = self.top_morph_at(*child, p, excluded) {
                return Some(hit);
            }
        }
        let hit = node.bounds.contains_point(p)
            && !node.in_hole(p)
            && (!node.free_form || self.is_opaque_at(root, p));
        hit.then_some(root)
    }

    /// True if the morph's own rendering has a non-transparent pixel at `p`.
    /// Only caching widgets are tested against their kept raster; others are
    /// rendered afresh so the test matches what is on screen.
    fn is_opaque_at(&self, id: NodeId, p: Point) -> bool {
        let origin = self.bounds(id).origin;
        let caching = self
            .nodes
            .get(id)
            .and_then(|n| n.widget.as_deref())
            .is_some_and(|w| w.is_caching_image());
        let image = if caching {
            render::cached_image(self, id)
        } else {
            Arc::new(render::render_image(self, id))
        };
        let local = (p - origin).floor();
        if local.x < 0.0 || local.y < 0.0 {
            return false;
        }
        image
            .get_pixel_checked(local.x as u32, local.y as u32)
            .is_some_and(|px| px[3] > 0)
    }

    /// The morph a press on `id` would pick up.
    ///
    /// Walks outwards from `id` until a widget redirects the grab, the morph
    /// is draggable, or its parent is the world or a clipping frame.
    pub fn root_for_grab(&self, id: NodeId) -> NodeId {
        let mut current = id;
        loop {
            let redirect = self.nodes.get(current).and_then(|n| {
                let ctx = CoreReadContext::new(self, current);
                n.widget.as_deref()?.root_for_grab(&ctx)
            });
            if let Some(target) = redirect {
                return target;
            }
            let Some(node) = self.nodes.get(current) else {
                return current;
            };
            let Some(parent) = node.parent else {
                return current;
            };
            if node.draggable || parent == self.world || self.nodes[parent].clips_children {
                return current;
            }
            current = parent;
        }
    }

    /// Ask a morph whether it wants `dropped`.
    pub fn wants_drop_of(&self, id: NodeId, dropped: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| {
            let ctx = CoreReadContext::new(self, id);
            n.widget
                .as_deref()
                .is_some_and(|w| w.wants_drop_of(dropped, &ctx))
        })
    }

    /// Return the morph receiving key events.
    pub fn keyboard_focus(&self) -> Option<NodeId> {
        self.keyboard_focus
    }

    /// Send key events to `id`, or to nobody.
    pub fn set_keyboard_focus(&mut self, id: Option<NodeId>) {
        self.keyboard_focus = id.filter(|id| self.contains(*id));
    }

    /// The open context menu.
    pub fn active_menu(&self) -> Option<NodeId> {
        self.active_menu
    }

    /// The open manipulation handle.
    pub fn active_handle(&self) -> Option<NodeId> {
        self.active_handle
    }

    /// Add `menu` to the world at `at`, kept within the world, replacing
    /// any open menu or handle.
    pub fn pop_up(&mut self, menu: Morph, at: Point) -> Result<NodeId> {
        self.close_overlays();
        let id = self.create(menu);
        self.add(self.world, id)?;
        self.set_position(id, at);
        self.keep_within(id, self.bounds(self.world));
        self.active_menu = Some(id);
        debug!(menu = ?id, "menu popped up");
        Ok(id)
    }

    /// Make `id` the active handle. Any open menu or other handle is
    /// destroyed.
    pub fn set_active_handle(&mut self, id: Option<NodeId>) {
        if self.active_handle != id {
            self.close_overlays();
        }
        self.active_handle = id.filter(|id| self.contains(*id));
    }

    /// Destroy the open menu and handle.
    pub(crate) fn close_overlays(&mut self) {
        for overlay in [self.active_menu.take(), self.active_handle.take()]
            .into_iter()
            .flatten()
        {
            if let Err(e) = self.destroy(overlay) {
                warn!("closing overlay failed: {e}");
            }
        }
    }

    /// Add a morph to the world that the hand ignores and destroys on the
    /// next press.
    pub fn add_temporary(&mut self, morph: Morph) -> Result<NodeId> {
        let id = self.create(morph);
        self.add(self.world, id)?;
        self.hand.temporaries.push(id);
        Ok(id)
    }

    /// Start an animation, capturing its starting value now.
    pub fn animate(&mut self, mut animation: Animation) -> AnimationId {
        animation.start(self, self.now());
        self.animations.push(animation)
    }

    /// Deactivate an animation without completing it.
    pub fn cancel_animation(&mut self, id: AnimationId) {
        if let Some(a) = self.animations.get_mut(id) {
            a.cancel();
        }
    }

    /// Jump an animation to its destination without running its completion
    /// callback.
    pub fn finish_animation(&mut self, id: AnimationId) {
        if let Some(mut a) = self.animations.take(id) {
            a.finish(self);
            self.animations.restore(id, a);
        }
    }

    /// Cancel every animation targeting a morph.
    pub fn cancel_animations_of(&mut self, target: NodeId) {
        for id in self.animations.targeting(target) {
            self.cancel_animation(id);
        }
    }

    /// True if an active animation targets `target`.
    pub fn is_animating(&self, target: NodeId) -> bool {
        self.animations
            .targeting(target)
            .into_iter()
            .any(|id| self.animations.get(id).is_some_and(Animation::is_active))
    }

    /// Number of queued animations.
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Animate a morph's position to `destination` with a horizontal and a
    /// vertical animation. The vertical one finishes the horizontal one on
    /// completion, so both axes land together.
    pub fn glide(
        &mut self,
        id: NodeId,
        destination: Point,
        duration: Duration,
        easing: Easing,
        on_complete: Option<OnComplete>,
    ) -> (AnimationId, AnimationId) {
        let origin = self.bounds(id).origin;
        let horizontal = self.animate(
            Animation::new(
                id,
                |ctx| ctx.position().x,
                |ctx, x| {
                    let y = ctx.position().y;
                    ctx.set_position(Point::new(x, y));
                },
                destination.x - origin.x,
                duration,
            )
            .easing(easing),
        );
        let vertical = self.animate(
            Animation::new(
                id,
                |ctx| ctx.position().y,
                |ctx, y| {
                    let x = ctx.position().x;
                    ctx.set_position(Point::new(x, y));
                },
                destination.y - origin.y,
                duration,
            )
            .easing(easing)
            .on_complete(move |ctx| {
                ctx.finish_animation(horizontal);
                if let Some(f) = on_complete {
                    f(ctx);
                }
            }),
        );
        (horizontal, vertical)
    }

    /// Record a user-visible notice.
    pub fn inform(&mut self, message: &str) {
        debug!(message, "notice");
        self.notices.push(message.to_string());
    }

    /// Collect the notices recorded since the last call.
    pub fn take_notices(&mut self) -> Vec<String> {
        mem::take(&mut self.notices)
    }

    /// Run a closure with a morph's widget taken out of the arena.
    ///
    /// The closure may freely mutate the core, including destroying the
    /// morph; the widget is only put back if its node still exists.
    pub(crate) fn with_widget_mut<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> Result<R> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| Error::NodeNotFound(format!("{id:?}")))?;
        let mut widget = node
            .widget
            .take()
            .ok_or_else(|| Error::Internal(format!("re-entrant widget access: {}", node.name)))?;
        let out = f(widget.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
        }
        Ok(out)
    }

    /// Run a hook on one morph. Hook failures become notices.
    pub(crate) fn call(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut dyn Context) -> Result<()>,
    ) {
        let out = self.with_widget_mut(id, |w, core| {
            let mut ctx = CoreContext::new(core, id);
            f(w, &mut ctx)
        });
        match out {
            Ok(Ok(())) => {}
            Ok(Err(e)) => self.report(id, &e),
            Err(e) => trace!(node = ?id, "hook skipped: {e}"),
        }
    }

    /// Offer an event to `start` and then each of its ancestors until one
    /// handles it, returning the morph that did. A failing handler counts
    /// as handling the event.
    pub(crate) fn bubble(
        &mut self,
        start: NodeId,
        mut f: impl FnMut(&mut dyn Widget, &mut dyn Context) -> Result<EventOutcome>,
    ) -> Option<NodeId> {
        let mut target = Some(start);
        while let Some(id) = target {
            let out = self.with_widget_mut(id, |w, core| {
                let mut ctx = CoreContext::new(core, id);
                f(w, &mut ctx)
            });
            match out {
                Ok(Ok(EventOutcome::Handle)) => return Some(id),
                Ok(Ok(EventOutcome::Ignore)) | Err(_) => {}
                Ok(Err(e)) => {
                    self.report(id, &e);
                    return Some(id);
                }
            }
            target = self.parent_of(id);
        }
        None
    }

    /// Log a hook failure and turn it into a notice.
    pub(crate) fn report(&mut self, id: NodeId, e: &Error) {
        let name = self.name_of(id).to_string();
        warn!(node = %name, "hook failed: {e}");
        self.inform(&format!("{name}: {e}"));
    }

    /// Fail with `NodeNotFound` unless `id` is live.
    fn require(&self, id: NodeId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(Error::NodeNotFound(format!("{id:?}")))
        }
    }

    /// Remove a morph from its parent's child list without damage.
    fn unlink(&mut self, child: NodeId) {
        let parent = self.nodes[child].parent.take();
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(p)) {
            p.children.retain(|c| *c != child);
        }
    }

    /// Check the parent and child links of every morph.
    ///
    /// Every child points back at its parent, appears once in its parent's
    /// list, and no morph is its own ancestor.
    pub fn validate_tree(&self) -> Result<()> {
        for (id, node) in &self.nodes {
            for (i, c) in node.children.iter().enumerate() {
                if self.parent_of(*c) != Some(id) {
                    return Err(Error::Internal(format!("{c:?} does not point back at {id:?}")));
                }
                if node.children[..i].contains(c) {
                    return Err(Error::Internal(format!("{c:?} listed twice under {id:?}")));
                }
            }
            let listed = node
                .parent
                .is_none_or(|p| self.nodes.get(p).is_some_and(|p| p.children.contains(&id)));
            if !listed {
                return Err(Error::Internal(format!("{id:?} missing from its parent")));
            }
            let mut hops = 0;
            let mut current = node.parent;
            while let Some(p) = current {
                hops += 1;
                if hops > self.nodes.len() {
                    return Err(Error::Cycle(format!("{id:?}")));
                }
                current = self.parent_of(p);
            }
        }
        Ok(())
    }

    /// Debug builds check tree links after every structural change.
    fn assert_tree(&self) {
        if cfg!(debug_assertions) {
            if let Err(e) = self.validate_tree() {
                panic!("tree invariant violated: {e}");
            }
        }
    }
}
