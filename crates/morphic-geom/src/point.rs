use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A location or offset in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate, growing rightwards.
    pub x: f64,
    /// Vertical coordinate, growing downwards.
    pub y: f64,
}

impl Point {
    /// Construct a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// True if both coordinates are zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Self) -> f64 {
        (*self - other).r()
    }

    /// Length of the vector from the origin to this point.
    pub fn r(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Component-wise minimum.
    pub fn min(&self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum.
    pub fn max(&self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Round both coordinates towards negative infinity.
    pub fn floor(&self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    /// Round both coordinates towards positive infinity.
    pub fn ceil(&self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil())
    }

    /// Round both coordinates to the nearest integer.
    pub fn round(&self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    /// True if both coordinates are at least those of `other`.
    pub fn ge(&self, other: Self) -> bool {
        self.x >= other.x && self.y >= other.y
    }

    /// True if both coordinates are strictly less than those of `other`.
    pub fn lt(&self, other: Self) -> bool {
        self.x < other.x && self.y < other.y
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from(v: (f64, f64)) -> Self {
        Self::new(v.0, v.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p + Point::new(1.0, 1.0), Point::new(4.0, 5.0));
        assert_eq!(p - Point::new(3.0, 4.0), Point::zero());
        assert_eq!(p * 2.0, Point::new(6.0, 8.0));
        assert_eq!(-p, Point::new(-3.0, -4.0));
        assert_eq!(p.r(), 5.0);
        assert_eq!(Point::zero().distance_to(p), 5.0);
    }

    #[test]
    fn rounding() {
        let p = Point::new(1.5, -1.5);
        assert_eq!(p.floor(), Point::new(1.0, -2.0));
        assert_eq!(p.ceil(), Point::new(2.0, -1.0));
        assert!(Point::new(2.0, 2.0).ge(Point::new(2.0, 1.0)));
        assert!(!Point::new(2.0, 2.0).lt(Point::new(2.0, 3.0)));
    }
}
