use serde::{Deserialize, Serialize};

use crate::Point;

/// An axis-aligned rectangle spanning `origin` (inclusive) to `corner`
/// (exclusive).
///
/// A rectangle whose corner is not strictly below and to the right of its
/// origin is empty. Empty rectangles are legal values: intersection of
/// disjoint rectangles produces one, and callers test with
/// [`Rect::is_empty`] rather than relying on construction to reject them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Point,
    /// Bottom-right corner.
    pub corner: Point,
}

impl Rect {
    /// Construct a rectangle from its two corners.
    pub const fn new(origin: Point, corner: Point) -> Self {
        Self { origin, corner }
    }

    /// Construct a rectangle from its left, top, right and bottom edges.
    pub const fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(Point::new(left, top), Point::new(right, bottom))
    }

    /// Construct a rectangle from a position and a size.
    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::from_extent(Point::new(x, y), Point::new(w, h))
    }

    /// Construct a rectangle at `origin` with the given extent.
    pub fn from_extent(origin: Point, extent: Point) -> Self {
        Self::new(origin, origin + extent)
    }

    /// Left edge.
    pub fn left(&self) -> f64 {
        self.origin.x
    }

    /// Top edge.
    pub fn top(&self) -> f64 {
        self.origin.y
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.corner.x
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.corner.y
    }

    /// Horizontal size.
    pub fn width(&self) -> f64 {
        self.corner.x - self.origin.x
    }

    /// Vertical size.
    pub fn height(&self) -> f64 {
        self.corner.y - self.origin.y
    }

    /// Width and height as a point.
    pub fn extent(&self) -> Point {
        self.corner - self.origin
    }

    /// Centre point.
    pub fn center(&self) -> Point {
        (self.origin + self.corner) * 0.5
    }

    /// Covered area, zero for empty rectangles.
    pub fn area(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.width() * self.height()
        }
    }

    /// True if the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// The same rectangle moved by `delta`.
    pub fn translate_by(&self, delta: Point) -> Self {
        Self::new(self.origin + delta, self.corner + delta)
    }

    /// The same extent placed at `origin`.
    pub fn with_origin(&self, origin: Point) -> Self {
        Self::from_extent(origin, self.extent())
    }

    /// Grow outwards by `amount` on every side.
    pub fn expand_by(&self, amount: f64) -> Self {
        let d = Point::new(amount, amount);
        Self::new(self.origin - d, self.corner + d)
    }

    /// Shrink inwards by `amount` on every side.
    pub fn inset_by(&self, amount: f64) -> Self {
        self.expand_by(-amount)
    }

    /// Round outwards to whole pixels, so the result covers every pixel the
    /// original touches.
    pub fn spread(&self) -> Self {
        Self::new(self.origin.floor(), self.corner.ceil())
    }

    /// The overlapping region. Empty when the rectangles are disjoint.
    pub fn intersect(&self, other: &Self) -> Self {
        Self::new(self.origin.max(other.origin), self.corner.min(other.corner))
    }

    /// True if the two rectangles touch or overlap.
    pub fn intersects(&self, other: &Self) -> bool {
        other.origin.x <= self.corner.x
            && other.origin.y <= self.corner.y
            && other.corner.x >= self.origin.x
            && other.corner.y >= self.origin.y
    }

    /// The smallest rectangle enclosing both.
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.origin.min(other.origin), self.corner.max(other.corner))
    }

    /// True if the rectangles come within `threshold` pixels of each other.
    pub fn is_near_to(&self, other: &Self, threshold: f64) -> bool {
        other.corner.x + threshold >= self.origin.x
            && other.corner.y + threshold >= self.origin.y
            && other.origin.x - threshold <= self.corner.x
            && other.origin.y - threshold <= self.corner.y
    }

    /// True if `p` falls inside. The right and bottom edges are exclusive.
    pub fn contains_point(&self, p: Point) -> bool {
        p.ge(self.origin) && p.lt(self.corner)
    }

    /// True if `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.origin.ge(self.origin) && self.corner.ge(other.corner)
    }

    /// The offset that moves this rectangle inside `outer` along the shortest
    /// path. If the rectangle is larger than `outer`, its top-left corner
    /// wins.
    pub fn amount_to_translate_within(&self, outer: &Self) -> Point {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.right() > outer.right() {
            dx = outer.right() - self.right();
        }
        if self.bottom() > outer.bottom() {
            dy = outer.bottom() - self.bottom();
        }
        if self.left() + dx < outer.left() {
            dx = outer.left() - self.left();
        }
        if self.top() + dy < outer.top() {
            dy = outer.top() - self.top();
        }
        Point::new(dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn emptiness() {
        assert!(!Rect::from_xywh(0.0, 0.0, 1.0, 1.0).is_empty());
        assert!(Rect::from_xywh(0.0, 0.0, 0.0, 10.0).is_empty());
        assert!(Rect::from_xywh(0.0, 0.0, -4.0, 10.0).is_empty());
        assert_eq!(Rect::from_xywh(0.0, 0.0, -4.0, 10.0).area(), 0.0);
    }

    #[test]
    fn contains_point_is_half_open() {
        let r = Rect::from_xywh(0.0, 0.0, 50.0, 40.0);
        assert!(r.contains_point(Point::zero()));
        assert!(r.contains_point(Point::new(49.5, 39.5)));
        assert!(!r.contains_point(Point::new(50.0, 10.0)));
        assert!(!r.contains_point(Point::new(10.0, 40.0)));
    }

    #[test]
    fn spread_rounds_outwards() {
        let r = Rect::from_ltrb(0.4, 1.6, 9.2, 10.0).spread();
        assert_eq!(r, Rect::from_ltrb(0.0, 1.0, 10.0, 10.0));
    }

    #[test]
    fn nearness() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_xywh(25.0, 0.0, 10.0, 10.0);
        assert!(!a.is_near_to(&b, 10.0));
        assert!(a.is_near_to(&b, 20.0));
        assert!(b.is_near_to(&a, 20.0));
    }

    #[test]
    fn translate_within() {
        let outer = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        let r = Rect::from_xywh(90.0, -5.0, 20.0, 20.0);
        assert_eq!(r.amount_to_translate_within(&outer), Point::new(-10.0, 5.0));
        let big = Rect::from_xywh(10.0, 10.0, 200.0, 20.0);
        assert_eq!(big.amount_to_translate_within(&outer), Point::new(-10.0, 0.0));
    }

    fn rect() -> impl Strategy<Value = Rect> {
        (-500i32..500, -500i32..500, 1i32..300, 1i32..300).prop_map(|(x, y, w, h)| {
            Rect::from_xywh(f64::from(x), f64::from(y), f64::from(w), f64::from(h))
        })
    }

    proptest! {
        #[test]
        fn union_contains_both(a in rect(), b in rect()) {
            let u = a.union(&b);
            prop_assert!(u.contains_rect(&a));
            prop_assert!(u.contains_rect(&b));
        }

        #[test]
        fn intersection_inside_both(a in rect(), b in rect()) {
            let i = a.intersect(&b);
            if !i.is_empty() {
                prop_assert!(a.contains_rect(&i));
                prop_assert!(b.contains_rect(&i));
            }
        }

        #[test]
        fn spread_covers_original(a in rect(), dx in 0.0f64..1.0, dy in 0.0f64..1.0) {
            let r = a.translate_by(Point::new(dx, dy));
            prop_assert!(r.spread().contains_rect(&r));
        }
    }
}
