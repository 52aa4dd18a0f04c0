//! Raster canvas and the morph drawing pipeline.
//!
//! A [`Canvas`] is an RGBA raster addressed in world coordinates through an
//! offset, so offscreen images of a single morph and the world's backing
//! store share one set of drawing routines. Widgets never touch the canvas
//! directly: they draw through a [`Render`] that translates their local
//! coordinates and clips to the damaged region being repaired.

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use tracing::warn;

use crate::{
    core::{Core, context::CoreReadContext, id::NodeId},
    geom::{Color, Point, Rect},
};

/// An RGBA raster addressed in world coordinates.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Backing pixels with straight alpha.
    image: RgbaImage,
    /// World coordinate of pixel (0, 0).
    offset: Point,
}

impl Canvas {
    /// A transparent canvas whose top-left pixel sits at the world origin.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            offset: Point::zero(),
        }
    }

    /// A transparent canvas covering `rect`, rounded out to whole pixels.
    pub fn for_rect(rect: Rect) -> Self {
        let r = rect.spread();
        Self {
            image: RgbaImage::new(pixels(r.width()), pixels(r.height())),
            offset: r.origin,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The area covered, in world coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_extent(
            self.offset,
            Point::new(f64::from(self.width()), f64::from(self.height())),
        )
    }

    /// The backing raster.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the canvas, returning the backing raster.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// The colour of the pixel under `p`, if it is on the canvas.
    pub fn pixel_at(&self, p: Point) -> Option<Color> {
        let local = (p - self.offset).floor();
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let (x, y) = (local.x as u32, local.y as u32);
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(Color::from_rgba8(self.image.get_pixel(x, y).0))
    }

    /// Reset a region to transparent.
    pub fn clear_rect(&mut self, rect: Rect) {
        if let Some((x0, y0, x1, y1)) = self.span(rect) {
            for y in y0..y1 {
                for x in x0..x1 {
                    self.image.put_pixel(x, y, Rgba([0, 0, 0, 0]));
                }
            }
        }
    }

    /// Paint `rect` with `color`, composited over existing pixels.
    pub fn fill_rect(&mut self, rect: Rect, color: Color, alpha: f64, clip: Rect) {
        let src = color.to_rgba8(alpha);
        if src[3] == 0 {
            return;
        }
        if let Some((x0, y0, x1, y1)) = self.span(rect.intersect(&clip)) {
            for y in y0..y1 {
                for x in x0..x1 {
                    blend(self.image.get_pixel_mut(x, y), src, 1.0);
                }
            }
        }
    }

    /// Composite `img` with its top-left corner at `at`.
    pub fn draw_image(&mut self, img: &RgbaImage, at: Point, alpha: f64, clip: Rect) {
        if alpha <= 0.0 {
            return;
        }
        let at = at.round();
        let area = Rect::from_extent(
            at,
            Point::new(f64::from(img.width()), f64::from(img.height())),
        );
        let Some((x0, y0, x1, y1)) = self.span(area.intersect(&clip)) else {
            return;
        };
        let origin = at - self.offset;
        for y in y0..y1 {
            for x in x0..x1 {
                let sx = (f64::from(x) - origin.x) as u32;
                let sy = (f64::from(y) - origin.y) as u32;
                if let Some(src) = img.get_pixel_checked(sx, sy) {
                    blend(self.image.get_pixel_mut(x, y), src.0, alpha);
                }
            }
        }
    }

    /// The pixel range covered by a world rectangle, clamped to the canvas.
    fn span(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        if rect.is_empty() {
            return None;
        }
        let local = rect.translate_by(-self.offset);
        let x0 = local.left().round().max(0.0);
        let y0 = local.top().round().max(0.0);
        let x1 = local.right().round().min(f64::from(self.width()));
        let y1 = local.bottom().round().min(f64::from(self.height()));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

/// Whole pixels needed to cover a length.
fn pixels(len: f64) -> u32 {
    if len > 0.0 { len.ceil() as u32 } else { 0 }
}

/// Source-over compositing of a straight-alpha pixel.
fn blend(dst: &mut Rgba<u8>, src: [u8; 4], alpha: f64) {
    let sa = f64::from(src[3]) / 255.0 * alpha;
    if sa <= 0.0 {
        return;
    }
    let da = f64::from(dst[3]) / 255.0;
    let oa = sa + da * (1.0 - sa);
    for c in 0..3 {
        let v = (f64::from(src[c]) * sa + f64::from(dst[c]) * da * (1.0 - sa)) / oa;
        dst[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (oa * 255.0).round() as u8;
}

/// A painter scoped to one morph.
///
/// Coordinates are local: `(0, 0)` is the morph's top-left corner. Output
/// is clipped to the region being repaired.
pub struct Render<'a> {
    /// Destination raster.
    canvas: &'a mut Canvas,
    /// The morph's bounds in world coordinates.
    bounds: Rect,
    /// World-space clip.
    clip: Rect,
    /// Opacity multiplied into everything drawn.
    alpha: f64,
}

impl<'a> Render<'a> {
    /// A painter for a morph at `bounds`, clipped to `clip`.
    pub fn new(canvas: &'a mut Canvas, bounds: Rect, clip: Rect, alpha: f64) -> Self {
        Self {
            canvas,
            bounds,
            clip,
            alpha,
        }
    }

    /// The morph's size.
    pub fn extent(&self) -> Point {
        self.bounds.extent()
    }

    /// The morph's bounds in local coordinates.
    pub fn local_bounds(&self) -> Rect {
        Rect::from_extent(Point::zero(), self.extent())
    }

    /// Fill the whole morph.
    pub fn fill(&mut self, color: Color) {
        self.fill_rect(self.local_bounds(), color);
    }

    /// Fill a local rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let world = rect.translate_by(self.bounds.origin);
        self.canvas.fill_rect(world, color, self.alpha, self.clip);
    }

    /// Draw the outline of a local rectangle, `width` pixels thick, inside
    /// its edges.
    pub fn stroke_rect(&mut self, rect: Rect, width: f64, color: Color) {
        let w = width.min(rect.width() / 2.0).min(rect.height() / 2.0);
        if w <= 0.0 {
            return;
        }
        let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
        self.fill_rect(Rect::from_ltrb(l, t, r, t + w), color);
        self.fill_rect(Rect::from_ltrb(l, b - w, r, b), color);
        self.fill_rect(Rect::from_ltrb(l, t + w, l + w, b - w), color);
        self.fill_rect(Rect::from_ltrb(r - w, t + w, r, b - w), color);
    }

    /// Composite an image with its top-left corner at a local point.
    pub fn draw_image(&mut self, img: &RgbaImage, at: Point) {
        let at = at + self.bounds.origin;
        self.canvas.draw_image(img, at, self.alpha, self.clip);
    }
}

/// Draw a morph and its visible descendants, parent first, clipped to
/// `clip`. Later siblings paint over earlier ones.
pub(crate) fn full_draw_on(core: &Core, canvas: &mut Canvas, id: NodeId, clip: Rect) {
    let Some(node) = core.nodes.get(id) else {
        return;
    };
    if !node.visible {
        return;
    }
    draw_on(core, canvas, id, clip);
    let child_clip = if node.clips_children {
        clip.intersect(&node.bounds)
    } else {
        clip
    };
    if child_clip.is_empty() {
        return;
    }
    for child in &node.children {
        full_draw_on(core, canvas, *child, child_clip);
    }
}

/// Draw a single morph, blitting its cached raster when it keeps one.
pub(crate) fn draw_on(core: &Core, canvas: &mut Canvas, id: NodeId, clip: Rect) {
    let Some(node) = core.nodes.get(id) else {
        return;
    };
    let area = clip.intersect(&node.bounds);
    if area.is_empty() {
        return;
    }
    // The widget is absent while one of its own hooks is running.
    let Some(widget) = node.widget.as_deref() else {
        return;
    };
    if widget.is_caching_image() {
        let image = cached_image(core, id);
        canvas.draw_image(&image, node.bounds.origin, node.alpha, area);
        return;
    }
    let ctx = CoreReadContext::new(core, id);
    let mut r = Render::new(canvas, node.bounds, area, node.alpha);
    if let Err(e) = widget.render(&mut r, &ctx) {
        warn!(node = %node.name, "render failed: {e}");
    }
}

/// The morph's own raster, rendered on first use and kept until `rerender`.
pub(crate) fn cached_image(core: &Core, id: NodeId) -> Arc<RgbaImage> {
    let cached = core
        .nodes
        .get(id)
        .and_then(|node| node.cached_image.borrow().clone());
    if let Some(image) = cached {
        return image;
    }
    let image = Arc::new(render_image(core, id));
    if let Some(node) = core.nodes.get(id) {
        *node.cached_image.borrow_mut() = Some(image.clone());
    }
    image
}

/// Render a morph alone, at full opacity, into a raster the size of its
/// bounds.
pub(crate) fn render_image(core: &Core, id: NodeId) -> RgbaImage {
    let Some(node) = core.nodes.get(id) else {
        return RgbaImage::new(0, 0);
    };
    let mut canvas = Canvas::for_rect(node.bounds);
    let clip = canvas.bounds();
    if let Some(widget) = node.widget.as_deref() {
        let ctx = CoreReadContext::new(core, id);
        let mut r = Render::new(&mut canvas, node.bounds, clip, 1.0);
        if let Err(e) = widget.render(&mut r, &ctx) {
            warn!(node = %node.name, "render failed: {e}");
        }
    }
    canvas.into_image()
}

/// Render a morph's own image for display, honouring its cache and alpha.
pub(crate) fn morph_image(core: &Core, id: NodeId) -> RgbaImage {
    let Some(node) = core.nodes.get(id) else {
        return RgbaImage::new(0, 0);
    };
    let mut canvas = Canvas::for_rect(node.bounds);
    let clip = canvas.bounds();
    draw_on(core, &mut canvas, id, clip);
    canvas.into_image()
}

/// Render a morph and its descendants into a raster covering its full
/// bounds. Returns the raster and the world rectangle it covers.
pub(crate) fn full_image(core: &Core, id: NodeId) -> (RgbaImage, Rect) {
    let bounds = core.full_bounds(id).spread();
    let mut canvas = Canvas::for_rect(bounds);
    full_draw_on(core, &mut canvas, id, bounds);
    (canvas.into_image(), bounds)
}

/// Draw whatever the hand carries: the drag snapshot and its shadow when
/// present, otherwise the live subtree.
pub(crate) fn draw_hand(core: &Core, canvas: &mut Canvas, hand: NodeId, clip: Rect, shadow_alpha: f64) {
    let Some(node) = core.nodes.get(hand) else {
        return;
    };
    for child in &node.children {
        let Some(grabbed) = core.nodes.get(*child) else {
            continue;
        };
        let Some(cache) = &grabbed.drag else {
            full_draw_on(core, canvas, *child, clip);
            continue;
        };
        let position = grabbed.bounds.origin;
        if let Some((shadow, offset)) = &cache.shadow {
            canvas.draw_image(shadow, position + *offset, shadow_alpha, clip);
        }
        canvas.draw_image(&cache.image, position + cache.offset, 1.0, clip);
    }
}
