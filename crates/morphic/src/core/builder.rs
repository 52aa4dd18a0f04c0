use crate::{
    core::node::Node,
    geom::{Color, Point, Rect},
    widget::Widget,
};

/// Fluent description of a morph that has not been created yet.
///
/// A `Morph` carries a widget plus the initial state of the node that will
/// hold it. Pass it to `Core::create` or `Context::create`; anything that
/// implements [`Widget`] converts into a `Morph` with default settings.
pub struct Morph {
    /// Behaviour of the new morph.
    widget: Box<dyn Widget>,
    /// Initial bounds.
    bounds: Rect,
    /// Fill colour, or the node default.
    color: Option<Color>,
    /// Opacity.
    alpha: f64,
    /// Initially visible.
    visible: bool,
    /// May be picked up.
    draggable: bool,
    /// Dragging yields a copy.
    template: bool,
    /// Default `wants_drop_of` answer.
    accepts_drops: bool,
    /// Non-interactive regions.
    holes: Vec<Rect>,
    /// Step rate limit.
    fps: f64,
    /// No shadow while dragged.
    no_drop_shadow: bool,
    /// Shadow traces the whole subtree.
    full_shadow_source: bool,
}

impl Morph {
    /// Describe a morph around `widget` at the default 50x40 size.
    pub fn new(widget: impl Widget) -> Self {
        Self::boxed(Box::new(widget))
    }

    /// Describe a morph around an already boxed widget.
    pub fn boxed(widget: Box<dyn Widget>) -> Self {
        Self {
            widget,
            bounds: Rect::from_xywh(0.0, 0.0, 50.0, 40.0),
            color: None,
            alpha: 1.0,
            visible: true,
            draggable: false,
            template: false,
            accepts_drops: false,
            holes: Vec::new(),
            fps: 0.0,
            no_drop_shadow: false,
            full_shadow_source: true,
        }
    }

    /// Set the bounds.
    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Move to `position`, keeping the size.
    pub fn at(mut self, position: Point) -> Self {
        self.bounds = self.bounds.with_origin(position);
        self
    }

    /// Resize, keeping the position.
    pub fn extent(mut self, extent: Point) -> Self {
        self.bounds = Rect::from_extent(self.bounds.origin, extent);
        self
    }

    /// Set the fill colour.
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the opacity.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Start hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Allow the hand to pick this morph up. Templates still hand out copies.
    pub fn draggable(mut self) -> Self {
        self.draggable = true;
        self
    }

    /// Dragging yields a copy. Templates are never draggable themselves.
    pub fn template(mut self) -> Self {
        self.template = true;
        self.draggable = false;
        self
    }

    /// Accept dropped morphs by default.
    pub fn accepts_drops(mut self) -> Self {
        self.accepts_drops = true;
        self
    }

    /// Add a non-interactive region, relative to the morph's position.
    pub fn hole(mut self, hole: Rect) -> Self {
        self.holes.push(hole);
        self
    }

    /// Limit stepping to `fps` calls per second.
    pub fn fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    /// Draw no shadow while dragged.
    pub fn no_drop_shadow(mut self) -> Self {
        self.no_drop_shadow = true;
        self
    }

    /// Derive the drag shadow from this morph alone, ignoring its children.
    pub fn own_shadow_source(mut self) -> Self {
        self.full_shadow_source = false;
        self
    }

    /// Build the arena node.
    pub(crate) fn into_node(self) -> Node {
        let mut node = Node::new(self.widget, self.bounds);
        if let Some(color) = self.color {
            node.color = color;
        }
        node.alpha = self.alpha;
        node.visible = self.visible;
        node.draggable = self.draggable;
        node.template = self.template;
        node.accepts_drops = self.accepts_drops;
        node.holes = self.holes;
        node.fps = self.fps;
        node.no_drop_shadow = self.no_drop_shadow;
        node.full_shadow_source = self.full_shadow_source;
        node
    }
}

impl<W: Widget> From<W> for Morph {
    fn from(widget: W) -> Self {
        Self::new(widget)
    }
}
