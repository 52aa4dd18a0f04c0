//! Drop shadow rasters for dragged morphs.
//!
//! Shadows are derived from a morph's image once, at grab time, and reused
//! for every frame of the drag.

use image::{Rgba, RgbaImage, imageops};

use crate::geom::{Color, Point};

/// A hard-edged shadow: the part of `source` that is not covered by
/// `source` shifted up and left by `offset`, recoloured to `color`.
///
/// The result has the size of `source` and is meant to be drawn at the
/// morph's position plus `offset`, so only the rim poking out from under
/// the morph remains visible.
pub fn shadow_image(source: &RgbaImage, offset: Point, color: Color) -> RgbaImage {
    let (w, h) = source.dimensions();
    let (dx, dy) = (offset.x.round() as i64, offset.y.round() as i64);
    let mut out = RgbaImage::new(w, h);
    for (x, y, px) in source.enumerate_pixels() {
        if px[3] == 0 {
            continue;
        }
        // Destination-out of the shifted source.
        let covering = alpha_at(source, i64::from(x) + dx, i64::from(y) + dy);
        let a = f64::from(px[3]) * (1.0 - f64::from(covering) / 255.0);
        out.put_pixel(x, y, recolor(color, a));
    }
    out
}

/// A soft shadow: the silhouette of `source` blurred by `blur` pixels with
/// the area under the morph itself cut away.
///
/// The result is `2 * blur` pixels larger than `source` in each dimension
/// and is meant to be drawn at the morph's position plus `offset` minus
/// `blur`.
pub fn shadow_image_blurred(source: &RgbaImage, offset: Point, blur: f64, color: Color) -> RgbaImage {
    let margin = blur.max(0.0).ceil() as u32;
    let (w, h) = source.dimensions();
    let mut silhouette = RgbaImage::new(w + 2 * margin, h + 2 * margin);
    for (x, y, px) in source.enumerate_pixels() {
        silhouette.put_pixel(x + margin, y + margin, recolor(color, f64::from(px[3])));
    }
    let mut out = if blur > 0.0 {
        imageops::blur(&silhouette, (blur / 2.0) as f32)
    } else {
        silhouette
    };
    // Recolour after blurring, then cut away the morph, which sits `offset`
    // up and left of the shadow.
    let (dx, dy) = (offset.x.round() as i64, offset.y.round() as i64);
    let m = i64::from(margin);
    for (x, y, px) in out.enumerate_pixels_mut() {
        px[0] = color.r;
        px[1] = color.g;
        px[2] = color.b;
        let covering = alpha_at(source, i64::from(x) - m + dx, i64::from(y) - m + dy);
        if covering > 0 {
            let a = f64::from(px[3]) * (1.0 - f64::from(covering) / 255.0);
            px[3] = a.round() as u8;
        }
    }
    out
}

/// Alpha of `img` at a possibly out-of-range position.
fn alpha_at(img: &RgbaImage, x: i64, y: i64) -> u8 {
    if x < 0 || y < 0 {
        return 0;
    }
    u32::try_from(x)
        .ok()
        .zip(u32::try_from(y).ok())
        .and_then(|(x, y)| img.get_pixel_checked(x, y))
        .map_or(0, |px| px[3])
}

/// `color` with the given 0-255 coverage, keeping only the shape.
fn recolor(color: Color, coverage: f64) -> Rgba<u8> {
    let a = (coverage * color.a).round().clamp(0.0, 255.0) as u8;
    Rgba([color.r, color.g, color.b, a])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: u32) -> RgbaImage {
        RgbaImage::from_pixel(size, size, Rgba([200, 10, 10, 255]))
    }

    #[test]
    fn hard_shadow_keeps_only_the_rim() {
        let s = shadow_image(&square(10), Point::new(3.0, 3.0), Color::BLACK);
        assert_eq!(s.dimensions(), (10, 10));
        // Covered by the morph itself once offset.
        assert_eq!(s.get_pixel(2, 2)[3], 0);
        // Bottom-right rim sticks out.
        assert_eq!(s.get_pixel(9, 9).0, [0, 0, 0, 255]);
        assert_eq!(s.get_pixel(8, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn transparent_source_casts_nothing() {
        let s = shadow_image(&RgbaImage::new(4, 4), Point::new(2.0, 2.0), Color::BLACK);
        assert!(s.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn blurred_shadow_is_larger_and_hollow() {
        let s = shadow_image_blurred(&square(10), Point::new(3.0, 3.0), 4.0, Color::BLACK);
        assert_eq!(s.dimensions(), (18, 18));
        // Directly under the morph: cut away.
        assert_eq!(s.get_pixel(4, 4)[3], 0);
        // Shadow centre beyond the morph's bottom-right edge is dark.
        assert!(s.get_pixel(11, 11)[3] > 100);
        // Soft edge fades out towards the border.
        assert!(s.get_pixel(17, 17)[3] < s.get_pixel(11, 11)[3]);
    }
}
