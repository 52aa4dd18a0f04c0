use std::{
    any::{Any, TypeId},
    cell::RefCell,
    sync::Arc,
    time::Instant,
};

use image::RgbaImage;

use crate::{
    core::{id::NodeId, step::NextStep},
    geom::{Color, Point, Rect},
    widget::Widget,
};

/// Morph data stored in the arena.
pub struct Node {
    /// Widget behavior and state. Empty while one of its hooks is running.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Concrete type of the widget, for `parent_that_is` queries.
    pub(crate) widget_type: TypeId,
    /// Widget name, for dumps and notices.
    pub(crate) name: String,

    /// Parent in the arena tree. `None` for roots and detached morphs.
    pub(crate) parent: Option<NodeId>,
    /// Children in draw order; the last child is topmost.
    pub(crate) children: Vec<NodeId>,

    /// Absolute bounds in world coordinates.
    pub(crate) bounds: Rect,
    /// Fill colour used by the default renderer.
    pub(crate) color: Color,
    /// Opacity applied to everything this morph paints.
    pub(crate) alpha: f64,
    /// Hidden morphs are neither drawn nor hit.
    pub(crate) visible: bool,
    /// May be picked up by the hand.
    pub(crate) draggable: bool,
    /// Dragging yields a copy and leaves this morph in place.
    pub(crate) template: bool,
    /// Default answer of `wants_drop_of`.
    pub(crate) accepts_drops: bool,
    /// Children are clipped to this morph's bounds.
    pub(crate) clips_children: bool,
    /// Hit-testing additionally requires an opaque pixel.
    pub(crate) free_form: bool,
    /// Dragging this morph does not draw a shadow.
    pub(crate) no_drop_shadow: bool,
    /// Drag shadows trace the whole subtree rather than this morph alone.
    pub(crate) full_shadow_source: bool,
    /// When false, mutations do not queue damage.
    pub(crate) track_changes: bool,
    /// Non-interactive regions, relative to the morph's position.
    pub(crate) holes: Vec<Rect>,

    /// Step rate limit in calls per second. Zero steps every frame.
    pub(crate) fps: f64,
    /// When `step` last ran.
    pub(crate) last_step: Option<Instant>,
    /// One-shot callback run before the next `step`.
    pub(crate) on_next_step: Option<NextStep>,

    /// Raster of this morph alone, for widgets that cache their image.
    pub(crate) cached_image: RefCell<Option<Arc<RgbaImage>>>,
    /// Snapshot taken at grab time, present only while in the hand.
    pub(crate) drag: Option<DragCache>,
}

/// Rasters captured when a morph is grabbed, so the hand can repaint it
/// cheaply on every pointer move.
#[derive(Clone)]
pub(crate) struct DragCache {
    /// The full subtree image.
    pub(crate) image: Arc<RgbaImage>,
    /// Offset of the image's top-left corner from the morph's position.
    pub(crate) offset: Point,
    /// Optional shadow raster with its offset from the morph's position.
    pub(crate) shadow: Option<(Arc<RgbaImage>, Point)>,
}

impl DragCache {
    /// Area covered by the snapshot and its shadow when the morph sits at
    /// `position`.
    pub(crate) fn bounds_at(&self, position: Point) -> Rect {
        let image = image_rect(&self.image, position + self.offset);
        match &self.shadow {
            Some((shadow, offset)) => image.union(&image_rect(shadow, position + *offset)),
            None => image,
        }
    }
}

/// The rectangle an image covers when its top-left corner sits at `at`.
pub(crate) fn image_rect(image: &RgbaImage, at: Point) -> Rect {
    Rect::from_extent(
        at,
        Point::new(f64::from(image.width()), f64::from(image.height())),
    )
}

impl Node {
    /// Build a node around a widget. Flags derived from the widget are
    /// captured once, here.
    pub(crate) fn new(widget: Box<dyn Widget>, bounds: Rect) -> Self {
        let any: &dyn Any = widget.as_ref();
        let widget_type = any.type_id();
        let name = widget.name();
        let clips_children = widget.clips_children();
        let free_form = widget.is_free_form();
        Self {
            widget: Some(widget),
            widget_type,
            name,
            parent: None,
            children: Vec::new(),
            bounds,
            color: Color::rgb(80, 80, 80),
            alpha: 1.0,
            visible: true,
            draggable: false,
            template: false,
            accepts_drops: false,
            clips_children,
            free_form,
            no_drop_shadow: false,
            full_shadow_source: true,
            track_changes: true,
            holes: Vec::new(),
            fps: 0.0,
            last_step: None,
            on_next_step: None,
            cached_image: RefCell::new(None),
            drag: None,
        }
    }

    /// A detached copy of this node's state around a new widget. Caches,
    /// step timing and tree links are not carried over.
    pub(crate) fn copy_with(&self, widget: Box<dyn Widget>) -> Self {
        Self {
            widget: Some(widget),
            widget_type: self.widget_type,
            name: self.name.clone(),
            parent: None,
            children: Vec::new(),
            bounds: self.bounds,
            color: self.color,
            alpha: self.alpha,
            visible: self.visible,
            draggable: self.draggable,
            template: self.template,
            accepts_drops: self.accepts_drops,
            clips_children: self.clips_children,
            free_form: self.free_form,
            no_drop_shadow: self.no_drop_shadow,
            full_shadow_source: self.full_shadow_source,
            track_changes: self.track_changes,
            holes: self.holes.clone(),
            fps: self.fps,
            last_step: None,
            on_next_step: None,
            cached_image: RefCell::new(None),
            drag: None,
        }
    }

    /// Return the node's widget name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Absolute bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Top-left corner.
    pub fn position(&self) -> Point {
        self.bounds.origin
    }

    /// Fill colour.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Opacity.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Return true if the node is drawn and hit-tested.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Return true if the hand may pick the node up.
    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Return true if dragging produces a copy.
    pub fn is_template(&self) -> bool {
        self.template
    }

    /// Return true if drops are accepted by default.
    pub fn accepts_drops(&self) -> bool {
        self.accepts_drops
    }

    /// Return true if children are clipped to this node's bounds.
    pub fn clips_children(&self) -> bool {
        self.clips_children
    }

    /// Non-interactive regions relative to the node's position.
    pub fn holes(&self) -> &[Rect] {
        &self.holes
    }

    /// Step rate limit.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// True if `p`, in world coordinates, falls inside one of the holes.
    pub(crate) fn in_hole(&self, p: Point) -> bool {
        let local = p - self.bounds.origin;
        self.holes.iter().any(|h| h.contains_point(local))
    }
}
