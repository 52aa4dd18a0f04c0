//! Scrolling frames.
//!
//! A scroll frame is a clipping frame holding a single contents frame. The
//! contents is at least as large as the scroll frame and grows to enclose
//! whatever is dropped into it; scrolling moves it within the frame.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use tracing::trace;

use crate::{
    Context, Core, Morph, NodeId, ReadContext,
    core::context::CoreContext,
    error::{Error, Result},
    geom::{Color, Point, Rect},
    widget::{EventOutcome, Widget},
};

/// How long a dragged morph must hover in the edge band before scrolling
/// starts.
const AUTO_SCROLL_DELAY: Duration = Duration::from_millis(500);

/// Default fill of the frame.
const FRAME_COLOR: Color = Color::rgb(240, 240, 240);

/// Default fill of the contents.
const CONTENTS_COLOR: Color = Color::rgb(255, 255, 255);

/// Auto-scroll state of a scroll frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoScroll {
    /// Not scrolling.
    Idle,
    /// A compatible morph entered the edge band at `since`.
    Armed {
        /// When the morph entered the band.
        since: Instant,
    },
}

/// A clipping frame that scrolls a contents frame.
pub struct ScrollFrame {
    /// The scrolled contents frame.
    contents: NodeId,
    /// Edge-band auto-scrolling.
    auto_scroll: AutoScroll,
}

impl ScrollFrame {
    /// Create a detached scroll frame at `bounds`, with empty contents of
    /// the same size. Returns the frame.
    pub fn create(core: &mut Core, bounds: Rect) -> Result<NodeId> {
        let world = core.world();
        let mut ctx = CoreContext::new(core, world);
        Self::create_in(&mut ctx, bounds)
    }

    /// As [`ScrollFrame::create`], from inside a widget hook.
    pub fn create_in(ctx: &mut dyn Context, bounds: Rect) -> Result<NodeId> {
        let contents = ctx.create(
            Morph::new(ScrollContents)
                .bounds(bounds)
                .color(CONTENTS_COLOR)
                .accepts_drops(),
        );
        let frame = ctx.create(
            Morph::new(Self {
                contents,
                auto_scroll: AutoScroll::Idle,
            })
            .bounds(bounds)
            .color(FRAME_COLOR),
        );
        ctx.add(frame, contents)?;
        Ok(frame)
    }

    /// The scrolled contents frame.
    pub fn contents(&self) -> NodeId {
        self.contents
    }

    /// Current auto-scroll state.
    pub fn auto_scroll(&self) -> AutoScroll {
        self.auto_scroll
    }

    /// One auto-scroll step: scroll towards the pointer while a carried
    /// morph hovers in the edge band, and disarm once it leaves.
    fn step_auto_scroll(&mut self, ctx: &mut dyn Context) {
        let AutoScroll::Armed { since } = self.auto_scroll else {
            return;
        };
        let pos = ctx.hand_position();
        let bounds = ctx.bounds();
        let inner = bounds.inset_by(ctx.preferences().scroll_bar_size * 3.0);
        if ctx.grabbed().is_none() || !bounds.contains_point(pos) || inner.contains_point(pos) {
            trace!("auto-scroll disarmed");
            self.auto_scroll = AutoScroll::Idle;
            return;
        }
        if ctx.now().saturating_duration_since(since) < AUTO_SCROLL_DELAY {
            return;
        }
        let frame = ctx.node_id();
        if pos.y < inner.top() {
            scroll_y(ctx, frame, self.contents, inner.top() - pos.y);
        } else if pos.y >= inner.bottom() {
            scroll_y(ctx, frame, self.contents, inner.bottom() - pos.y);
        }
        if pos.x < inner.left() {
            scroll_x(ctx, frame, self.contents, inner.left() - pos.x);
        } else if pos.x >= inner.right() {
            scroll_x(ctx, frame, self.contents, inner.right() - pos.x);
        }
    }
}

impl Widget for ScrollFrame {
    fn clips_children(&self) -> bool {
        true
    }

    fn fix_layout(&mut self, ctx: &mut dyn Context) -> Result<()> {
        let frame = ctx.node_id();
        adjust_bounds_in(ctx, frame, self.contents);
        Ok(())
    }

    fn step(&mut self, ctx: &mut dyn Context) -> Result<()> {
        self.step_auto_scroll(ctx);
        Ok(())
    }

    fn mouse_scroll(&mut self, dy: f64, dx: f64, ctx: &mut dyn Context) -> Result<EventOutcome> {
        let amount = ctx.preferences().mouse_scroll_amount;
        let frame = ctx.node_id();
        scroll_y(ctx, frame, self.contents, dy * amount);
        scroll_x(ctx, frame, self.contents, dx * amount);
        Ok(EventOutcome::Handle)
    }

    fn wants_drop_of(&self, _dropped: NodeId, ctx: &dyn ReadContext) -> bool {
        ctx.node(self.contents).is_some_and(|n| n.accepts_drops())
    }

    fn duplicate(&self) -> Option<Box<dyn Widget>> {
        Some(Box::new(Self {
            contents: self.contents,
            auto_scroll: AutoScroll::Idle,
        }))
    }

    fn update_references(&mut self, map: &HashMap<NodeId, NodeId>) {
        if let Some(contents) = map.get(&self.contents) {
            self.contents = *contents;
        }
    }
}

/// The contents frame of a scroll frame.
///
/// Presses on its background pick up the scroll frame, and it grows to
/// enclose anything dropped into it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollContents;

impl Widget for ScrollContents {
    fn clips_children(&self) -> bool {
        true
    }

    fn root_for_grab(&self, ctx: &dyn ReadContext) -> Option<NodeId> {
        ctx.parent()
    }

    fn react_to_drop_of(&mut self, _dropped: NodeId, ctx: &mut dyn Context) -> Result<()> {
        if let Some(frame) = ctx.parent() {
            let contents = ctx.node_id();
            adjust_bounds_in(ctx, frame, contents);
        }
        Ok(())
    }

    fn react_to_grab_of(&mut self, _grabbed: NodeId, ctx: &mut dyn Context) -> Result<()> {
        if let Some(frame) = ctx.parent() {
            let contents = ctx.node_id();
            adjust_bounds_in(ctx, frame, contents);
        }
        Ok(())
    }

    fn duplicate(&self) -> Option<Box<dyn Widget>> {
        Some(Box::new(*self))
    }
}

/// The contents frame of a scroll frame.
pub fn contents_of(core: &Core, frame: NodeId) -> Option<NodeId> {
    core.widget_ref::<ScrollFrame>(frame).map(ScrollFrame::contents)
}

/// Look up a scroll frame's contents, failing for other morphs.
fn require_contents(core: &Core, frame: NodeId) -> Result<NodeId> {
    contents_of(core, frame).ok_or_else(|| {
        Error::Invalid(format!("{} is not a scroll frame", core.name_of(frame)))
    })
}

/// Scroll by `dx` and `dy` pixels. Positive values move the contents right
/// and down, revealing what lies to the left and above. The contents never
/// leaves a gap inside the frame.
pub fn scroll(core: &mut Core, frame: NodeId, dx: f64, dy: f64) -> Result<()> {
    let contents = require_contents(core, frame)?;
    let mut ctx = CoreContext::new(core, frame);
    scroll_x(&mut ctx, frame, contents, dx);
    scroll_y(&mut ctx, frame, contents, dy);
    Ok(())
}

/// Resize the contents to enclose the frame and all of its children.
pub fn adjust_bounds(core: &mut Core, frame: NodeId) -> Result<()> {
    let contents = require_contents(core, frame)?;
    let mut ctx = CoreContext::new(core, frame);
    adjust_bounds_in(&mut ctx, frame, contents);
    Ok(())
}

/// Grow or shrink `contents` to the union of `frame` and its children.
fn adjust_bounds_in(ctx: &mut dyn Context, frame: NodeId, contents: NodeId) {
    let enclosing = ctx
        .children_of(contents)
        .into_iter()
        .fold(ctx.bounds_of(frame), |acc, c| acc.union(&ctx.full_bounds_of(c)));
    if enclosing != ctx.bounds_of(contents) {
        ctx.set_bounds_of(contents, enclosing);
    }
}

/// Move the contents horizontally by `steps`, clamped so its edges never
/// come inside the frame.
fn scroll_x(ctx: &mut dyn Context, frame: NodeId, contents: NodeId, steps: f64) {
    if steps == 0.0 {
        return;
    }
    let (f, c) = (ctx.bounds_of(frame), ctx.bounds_of(contents));
    let mut x = c.left() + steps;
    if x + c.width() < f.right() {
        x = f.right() - c.width();
    }
    if x > f.left() {
        x = f.left();
    }
    if x != c.left() {
        ctx.set_position_of(contents, Point::new(x, c.top()));
    }
}

/// Move the contents vertically by `steps`, clamped like [`scroll_x`].
fn scroll_y(ctx: &mut dyn Context, frame: NodeId, contents: NodeId, steps: f64) {
    if steps == 0.0 {
        return;
    }
    let (f, c) = (ctx.bounds_of(frame), ctx.bounds_of(contents));
    let mut y = c.top() + steps;
    if y + c.height() < f.bottom() {
        y = f.bottom() - c.height();
    }
    if y > f.top() {
        y = f.top();
    }
    if y != c.top() {
        ctx.set_position_of(contents, Point::new(c.left(), y));
    }
}

/// Arm auto-scrolling on every scroll frame in `over` that would accept
/// the carried morph and has the pointer in its edge band.
pub(crate) fn consider_auto_scroll(core: &mut Core, over: &[NodeId]) {
    let Some(grabbed) = core.hand().grabbed() else {
        return;
    };
    let pos = core.hand().position();
    let inset = core.preferences().scroll_bar_size * 3.0;
    let now = core.now();
    for id in over {
        if core.widget_ref::<ScrollFrame>(*id).is_none() || !core.wants_drop_of(*id, grabbed) {
            continue;
        }
        if core.bounds(*id).inset_by(inset).contains_point(pos) {
            continue;
        }
        if let Some(frame) = core.widget_mut::<ScrollFrame>(*id) {
            if frame.auto_scroll == AutoScroll::Idle {
                trace!(frame = ?id, "auto-scroll armed");
                frame.auto_scroll = AutoScroll::Armed { since: now };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{preferences::Preferences, widgets::Plain};

    fn setup() -> Result<(Core, NodeId, NodeId)> {
        let mut core = Core::new(Point::new(400.0, 400.0), Preferences::default());
        let frame = ScrollFrame::create(&mut core, Rect::from_xywh(0.0, 0.0, 100.0, 100.0))?;
        core.add(core.world(), frame)?;
        let contents = contents_of(&core, frame).ok_or(Error::Internal("no contents".into()))?;
        Ok((core, frame, contents))
    }

    #[test]
    fn contents_grow_to_enclose_children() -> Result<()> {
        let (mut core, frame, contents) = setup()?;
        let item = core.create(Morph::new(Plain).bounds(Rect::from_xywh(50.0, 250.0, 20.0, 20.0)));
        core.add(contents, item)?;
        adjust_bounds(&mut core, frame)?;
        assert_eq!(core.bounds(contents), Rect::from_xywh(0.0, 0.0, 100.0, 270.0));
        Ok(())
    }

    #[test]
    fn scrolling_is_clamped() -> Result<()> {
        let (mut core, frame, contents) = setup()?;
        core.set_extent(contents, Point::new(100.0, 300.0));
        scroll(&mut core, frame, 0.0, -50.0)?;
        assert_eq!(core.bounds(contents).top(), -50.0);
        scroll(&mut core, frame, 0.0, -1000.0)?;
        assert_eq!(core.bounds(contents).top(), -200.0);
        scroll(&mut core, frame, 0.0, 1000.0)?;
        assert_eq!(core.bounds(contents).top(), 0.0);
        // Contents no wider than the frame never moves sideways.
        scroll(&mut core, frame, 30.0, 0.0)?;
        assert_eq!(core.bounds(contents).left(), 0.0);
        Ok(())
    }

    #[test]
    fn scroll_moves_children() -> Result<()> {
        let (mut core, frame, contents) = setup()?;
        let item = core.create(Morph::new(Plain).bounds(Rect::from_xywh(10.0, 150.0, 20.0, 20.0)));
        core.add(contents, item)?;
        adjust_bounds(&mut core, frame)?;
        scroll(&mut core, frame, 0.0, -70.0)?;
        assert_eq!(core.bounds(item).origin, Point::new(10.0, 80.0));
        Ok(())
    }

    #[test]
    fn only_scroll_frames_scroll() {
        let mut core = Core::new(Point::new(100.0, 100.0), Preferences::default());
        let world = core.world();
        assert!(matches!(scroll(&mut core, world, 0.0, 1.0), Err(Error::Invalid(_))));
    }

    #[test]
    fn copies_point_at_their_own_contents() -> Result<()> {
        let (mut core, frame, contents) = setup()?;
        let copy = core.full_copy(frame)?;
        let copied_contents = contents_of(&core, copy);
        assert!(copied_contents.is_some());
        assert_ne!(copied_contents, Some(contents));
        assert_eq!(core.parent_of(copied_contents.unwrap_or(contents)), Some(copy));
        Ok(())
    }
}
