use crate::geom::Point;

/// Map a pointer position to a dial value.
///
/// The value grows linearly with the clockwise angle from 12 o'clock, as
/// seen from `center`: straight up is `min`, 3 o'clock a quarter of the way
/// to `max`, and just left of straight up approaches `max`. A pointer on the
/// centre has no angle and yields `min`.
pub fn dial_value(center: Point, hand: Point, min: f64, max: f64) -> f64 {
    let d = hand - center;
    if d.is_zero() {
        return min;
    }
    // Screen y points down, so "up" is negative y.
    let degrees = d.x.atan2(-d.y).to_degrees().rem_euclid(360.0);
    min + (max - min) * degrees / 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn clock_positions() {
        let c = Point::new(50.0, 50.0);
        assert!(close(dial_value(c, Point::new(50.0, 0.0), 0.0, 360.0), 0.0));
        assert!(close(dial_value(c, Point::new(100.0, 50.0), 0.0, 360.0), 90.0));
        assert!(close(dial_value(c, Point::new(50.0, 100.0), 0.0, 360.0), 180.0));
        assert!(close(dial_value(c, Point::new(0.0, 50.0), 0.0, 360.0), 270.0));
        assert!(close(dial_value(c, Point::new(100.0, 0.0), 0.0, 100.0), 12.5));
    }

    #[test]
    fn ranges_and_centre() {
        let c = Point::zero();
        assert!(close(dial_value(c, Point::new(0.0, 10.0), -10.0, 10.0), 0.0));
        assert_eq!(dial_value(c, c, 5.0, 9.0), 5.0);
        let just_left = dial_value(c, Point::new(-0.001, -10.0), 0.0, 1.0);
        assert!(just_left > 0.99 && just_left < 1.0);
    }
}
