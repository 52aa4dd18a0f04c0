use std::{
    any::TypeId,
    time::{Duration, Instant},
};

use super::{
    Core,
    animation::{Animation, Easing, OnComplete},
    builder::Morph,
    hand,
    id::{AnimationId, NodeId},
    node::Node,
    step::{self, NextStep},
};
use crate::{
    error::Result,
    geom::{Color, Point, Rect},
    preferences::Preferences,
};

/// Read-only context available to widgets while rendering and answering
/// queries.
pub trait ReadContext {
    /// The morph this context is bound to.
    fn node_id(&self) -> NodeId;

    /// The world root.
    fn world_id(&self) -> NodeId;

    /// The hand's own morph, which holds whatever is being dragged.
    fn hand_id(&self) -> NodeId;

    /// Node data for any live morph.
    fn node(&self, id: NodeId) -> Option<&Node>;

    /// Return the parent of a morph, or `None` for roots and missing ids.
    fn parent_of(&self, id: NodeId) -> Option<NodeId>;

    /// Children of a morph in draw order.
    fn children_of(&self, id: NodeId) -> Vec<NodeId>;

    /// A morph and all of its descendants, pre-order.
    fn all_children_of(&self, id: NodeId) -> Vec<NodeId>;

    /// A morph and all of its ancestors, innermost first.
    fn all_parents_of(&self, id: NodeId) -> Vec<NodeId>;

    /// The nearest ancestor of `id`, or `id` itself, whose widget has the
    /// given type.
    fn parent_with_type(&self, id: NodeId, ty: TypeId) -> Option<NodeId>;

    /// Bounds of a morph together with its visible descendants.
    fn full_bounds_of(&self, id: NodeId) -> Rect;

    /// Current pointer position.
    fn hand_position(&self) -> Point;

    /// The morph held by the hand, if any.
    fn grabbed(&self) -> Option<NodeId>;

    /// The morph receiving key events, if any.
    fn keyboard_focus(&self) -> Option<NodeId>;

    /// Engine configuration for this world.
    fn preferences(&self) -> &Preferences;

    /// The frame clock.
    fn now(&self) -> Instant;

    /// True if an active animation targets `id`.
    fn is_animating(&self, id: NodeId) -> bool;

    /// The bound morph's parent.
    fn parent(&self) -> Option<NodeId> {
        self.parent_of(self.node_id())
    }

    /// The bound morph's children.
    fn children(&self) -> Vec<NodeId> {
        self.children_of(self.node_id())
    }

    /// Bounds of any morph. Missing morphs report an empty rectangle.
    fn bounds_of(&self, id: NodeId) -> Rect {
        self.node(id).map(Node::bounds).unwrap_or_default()
    }

    /// The bound morph's bounds.
    fn bounds(&self) -> Rect {
        self.bounds_of(self.node_id())
    }

    /// The bound morph's top-left corner.
    fn position(&self) -> Point {
        self.bounds().origin
    }

    /// The bound morph's size.
    fn extent(&self) -> Point {
        self.bounds().extent()
    }

    /// The bound morph's fill colour.
    fn color(&self) -> Color {
        self.node(self.node_id())
            .map_or(Color::TRANSPARENT, Node::color)
    }

    /// The bound morph's default drop acceptance.
    fn accepts_drops(&self) -> bool {
        self.node(self.node_id()).is_some_and(Node::accepts_drops)
    }

    /// True if `id` is the world root.
    fn is_world(&self, id: NodeId) -> bool {
        id == self.world_id()
    }
}

/// Mutable context available to widgets while handling events and steps.
pub trait Context: ReadContext {
    /// Move a morph and its subtree so its top-left corner lands on `p`.
    fn set_position_of(&mut self, id: NodeId, p: Point);

    /// Translate a morph and its subtree.
    fn move_by_of(&mut self, id: NodeId, delta: Point);

    /// Resize a morph, then let it fix its layout.
    fn set_extent_of(&mut self, id: NodeId, extent: Point);

    /// Move and resize a morph.
    fn set_bounds_of(&mut self, id: NodeId, bounds: Rect);

    /// Change a morph's fill colour.
    fn set_color_of(&mut self, id: NodeId, color: Color);

    /// Change a morph's opacity.
    fn set_alpha_of(&mut self, id: NodeId, alpha: f64);

    /// Show or hide a morph.
    fn set_visible_of(&mut self, id: NodeId, visible: bool);

    /// Allow or forbid the hand to pick a morph up.
    fn set_draggable_of(&mut self, id: NodeId, draggable: bool);

    /// Make a morph accept or refuse drops by default.
    fn set_accepts_drops_of(&mut self, id: NodeId, accepts: bool);

    /// Replace a morph's non-interactive regions.
    fn set_holes_of(&mut self, id: NodeId, holes: Vec<Rect>);

    /// Move a morph the least distance that puts it inside `area`.
    fn keep_within_of(&mut self, id: NodeId, area: Rect);

    /// Queue damage for a morph's visible bounds.
    fn changed_of(&mut self, id: NodeId);

    /// Queue damage for a morph's full bounds.
    fn full_changed_of(&mut self, id: NodeId);

    /// Drop a morph's cached raster and queue its damage.
    fn rerender_of(&mut self, id: NodeId);

    /// Create a detached morph.
    fn create(&mut self, morph: Morph) -> NodeId;

    /// Append `child` to `parent`, detaching it from any previous parent.
    fn add(&mut self, parent: NodeId, child: NodeId) -> Result<()>;

    /// Insert `child` into `parent` at `index`.
    fn add_at(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<()>;

    /// Destroy a morph and its subtree. Destroying a missing morph is a
    /// no-op.
    fn destroy(&mut self, id: NodeId) -> Result<()>;

    /// Deep copy a subtree, returning the detached copy.
    fn full_copy(&mut self, id: NodeId) -> Result<NodeId>;

    /// Send key events to `id`, or to nobody.
    fn set_keyboard_focus(&mut self, id: Option<NodeId>);

    /// Start an animation.
    fn animate(&mut self, animation: Animation) -> AnimationId;

    /// Deactivate an animation without completing it.
    fn cancel_animation(&mut self, id: AnimationId);

    /// Jump an animation to its destination without running its completion
    /// callback.
    fn finish_animation(&mut self, id: AnimationId);

    /// Animate a morph's position to `destination`.
    fn glide_of(
        &mut self,
        id: NodeId,
        destination: Point,
        duration: Duration,
        easing: Easing,
        on_complete: Option<OnComplete>,
    ) -> (AnimationId, AnimationId);

    /// Register a callback to run before a morph's next step, replacing any
    /// earlier one.
    fn next_step_of(&mut self, id: NodeId, f: NextStep);

    /// Limit a morph's step rate.
    fn set_fps_of(&mut self, id: NodeId, fps: f64);

    /// Record a user-visible notice.
    fn inform(&mut self, message: &str);

    /// Open a menu at `at`, replacing any open menu and handle.
    fn pop_up(&mut self, menu: Morph, at: Point) -> Result<NodeId>;

    /// Add a morph to the world that the hand ignores and destroys on the
    /// next button press.
    fn add_temporary(&mut self, morph: Morph) -> Result<NodeId>;

    /// Make `id` the active handle, destroying any open menu or handle.
    fn set_active_handle(&mut self, id: Option<NodeId>);

    /// Pick a morph up with the hand.
    fn grab(&mut self, id: NodeId) -> Result<()>;

    /// Move the bound morph.
    fn set_position(&mut self, p: Point) {
        self.set_position_of(self.node_id(), p)
    }

    /// Translate the bound morph.
    fn move_by(&mut self, delta: Point) {
        self.move_by_of(self.node_id(), delta)
    }

    /// Resize the bound morph.
    fn set_extent(&mut self, extent: Point) {
        self.set_extent_of(self.node_id(), extent)
    }

    /// Recolour the bound morph.
    fn set_color(&mut self, color: Color) {
        self.set_color_of(self.node_id(), color)
    }

    /// Queue damage for the bound morph.
    fn changed(&mut self) {
        self.changed_of(self.node_id())
    }

    /// Drop the bound morph's cached raster.
    fn rerender(&mut self) {
        self.rerender_of(self.node_id())
    }

    /// Create a morph as the bound morph's topmost child.
    fn add_child(&mut self, morph: Morph) -> Result<NodeId> {
        let id = self.create(morph);
        self.add(self.node_id(), id)?;
        Ok(id)
    }

    /// Glide the bound morph.
    fn glide(&mut self, destination: Point, duration: Duration, easing: Easing) {
        self.glide_of(self.node_id(), destination, duration, easing, None);
    }

    /// Run `f` before the bound morph's next step.
    fn next_step(&mut self, f: NextStep) {
        self.next_step_of(self.node_id(), f)
    }

    /// Run callbacks before successive steps of the bound morph.
    fn next_steps(&mut self, steps: Vec<NextStep>) {
        if let Some(f) = step::chain(steps) {
            self.next_step(f);
        }
    }

    /// Limit the bound morph's step rate.
    fn set_fps(&mut self, fps: f64) {
        self.set_fps_of(self.node_id(), fps)
    }
}

/// Mutable context bound to one morph.
pub struct CoreContext<'a> {
    /// Core state reference.
    core: &'a mut Core,
    /// Node bound to this context.
    node_id: NodeId,
}

impl<'a> CoreContext<'a> {
    /// Create a new context for a node.
    pub fn new(core: &'a mut Core, node_id: NodeId) -> Self {
        Self { core, node_id }
    }
}

/// Read-only context bound to one morph.
pub struct CoreReadContext<'a> {
    /// Core state reference.
    core: &'a Core,
    /// Node bound to this context.
    node_id: NodeId,
}

impl<'a> CoreReadContext<'a> {
    /// Create a new read-only context for a node.
    pub fn new(core: &'a Core, node_id: NodeId) -> Self {
        Self { core, node_id }
    }
}

/// Implement `ReadContext` by forwarding to `self.core`.
macro_rules! forward_read_context {
    ($ty:ty) => {
        impl ReadContext for $ty {
            fn node_id(&self) -> NodeId {
                self.node_id
            }

            fn world_id(&self) -> NodeId {
                self.core.world()
            }

            fn hand_id(&self) -> NodeId {
                self.core.hand_id()
            }

            fn node(&self, id: NodeId) -> Option<&Node> {
                self.core.node(id)
            }

            fn parent_of(&self, id: NodeId) -> Option<NodeId> {
                self.core.parent_of(id)
            }

            fn children_of(&self, id: NodeId) -> Vec<NodeId> {
                self.core.children_of(id)
            }

            fn all_children_of(&self, id: NodeId) -> Vec<NodeId> {
                self.core.all_children(id)
            }

            fn all_parents_of(&self, id: NodeId) -> Vec<NodeId> {
                self.core.all_parents(id)
            }

            fn parent_with_type(&self, id: NodeId, ty: TypeId) -> Option<NodeId> {
                self.core.parent_with_type(id, ty)
            }

            fn full_bounds_of(&self, id: NodeId) -> Rect {
                self.core.full_bounds(id)
            }

            fn hand_position(&self) -> Point {
                self.core.hand().position()
            }

            fn grabbed(&self) -> Option<NodeId> {
                self.core.hand().grabbed()
            }

            fn keyboard_focus(&self) -> Option<NodeId> {
                self.core.keyboard_focus()
            }

            fn preferences(&self) -> &Preferences {
                self.core.preferences()
            }

            fn now(&self) -> Instant {
                self.core.now()
            }

            fn is_animating(&self, id: NodeId) -> bool {
                self.core.is_animating(id)
            }
        }
    };
}

forward_read_context!(CoreContext<'_>);
forward_read_context!(CoreReadContext<'_>);

impl Context for CoreContext<'_> {
    fn set_position_of(&mut self, id: NodeId, p: Point) {
        self.core.set_position(id, p);
    }

    fn move_by_of(&mut self, id: NodeId, delta: Point) {
        self.core.move_by(id, delta);
    }

    fn set_extent_of(&mut self, id: NodeId, extent: Point) {
        self.core.set_extent(id, extent);
    }

    fn set_bounds_of(&mut self, id: NodeId, bounds: Rect) {
        self.core.set_bounds(id, bounds);
    }

    fn set_color_of(&mut self, id: NodeId, color: Color) {
        self.core.set_color(id, color);
    }

    fn set_alpha_of(&mut self, id: NodeId, alpha: f64) {
        self.core.set_alpha(id, alpha);
    }

    fn set_visible_of(&mut self, id: NodeId, visible: bool) {
        self.core.set_visible(id, visible);
    }

    fn set_draggable_of(&mut self, id: NodeId, draggable: bool) {
        self.core.set_draggable(id, draggable);
    }

    fn set_accepts_drops_of(&mut self, id: NodeId, accepts: bool) {
        self.core.set_accepts_drops(id, accepts);
    }

    fn set_holes_of(&mut self, id: NodeId, holes: Vec<Rect>) {
        self.core.set_holes(id, holes);
    }

    fn keep_within_of(&mut self, id: NodeId, area: Rect) {
        self.core.keep_within(id, area);
    }

    fn changed_of(&mut self, id: NodeId) {
        self.core.changed(id);
    }

    fn full_changed_of(&mut self, id: NodeId) {
        self.core.full_changed(id);
    }

    fn rerender_of(&mut self, id: NodeId) {
        self.core.rerender(id);
    }

    fn create(&mut self, morph: Morph) -> NodeId {
        self.core.create(morph)
    }

    fn add(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.core.add(parent, child)
    }

    fn add_at(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<()> {
        self.core.add_at(parent, child, index)
    }

    fn destroy(&mut self, id: NodeId) -> Result<()> {
        self.core.destroy(id)
    }

    fn full_copy(&mut self, id: NodeId) -> Result<NodeId> {
        self.core.full_copy(id)
    }

    fn set_keyboard_focus(&mut self, id: Option<NodeId>) {
        self.core.set_keyboard_focus(id);
    }

    fn animate(&mut self, animation: Animation) -> AnimationId {
        self.core.animate(animation)
    }

    fn cancel_animation(&mut self, id: AnimationId) {
        self.core.cancel_animation(id);
    }

    fn finish_animation(&mut self, id: AnimationId) {
        self.core.finish_animation(id);
    }

    fn glide_of(
        &mut self,
        id: NodeId,
        destination: Point,
        duration: Duration,
        easing: Easing,
        on_complete: Option<OnComplete>,
    ) -> (AnimationId, AnimationId) {
        self.core.glide(id, destination, duration, easing, on_complete)
    }

    fn next_step_of(&mut self, id: NodeId, f: NextStep) {
        self.core.set_next_step(id, f);
    }

    fn set_fps_of(&mut self, id: NodeId, fps: f64) {
        self.core.set_fps(id, fps);
    }

    fn inform(&mut self, message: &str) {
        self.core.inform(message);
    }

    fn pop_up(&mut self, menu: Morph, at: Point) -> Result<NodeId> {
        self.core.pop_up(menu, at)
    }

    fn add_temporary(&mut self, morph: Morph) -> Result<NodeId> {
        self.core.add_temporary(morph)
    }

    fn set_active_handle(&mut self, id: Option<NodeId>) {
        self.core.set_active_handle(id);
    }

    fn grab(&mut self, id: NodeId) -> Result<()> {
        hand::grab(self.core, id)
    }
}
