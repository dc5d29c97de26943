//! Rasterisation of oriented rectangles into BGR frames.
//!
//! Used to synthesise stripe scenes for tests and benchmarks.

use nalgebra::Point2;

use crate::{BgrImage, OrientedRect};

/// Paint every pixel whose center lies inside `rect` with `bgr`.
pub fn fill_oriented_rect(img: &mut BgrImage, rect: &OrientedRect, bgr: [u8; 3]) {
    if img.width == 0 || img.height == 0 {
        return;
    }
    let corners = rect.corners();
    let (mut x0, mut y0) = (f64::INFINITY, f64::INFINITY);
    let (mut x1, mut y1) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for c in &corners {
        x0 = x0.min(c.x);
        y0 = y0.min(c.y);
        x1 = x1.max(c.x);
        y1 = y1.max(c.y);
    }

    let max_x = (img.width - 1) as f64;
    let max_y = (img.height - 1) as f64;
    let xs = x0.floor().clamp(0.0, max_x) as usize..=x1.ceil().clamp(0.0, max_x) as usize;
    let ys = y0.floor().clamp(0.0, max_y) as usize..=y1.ceil().clamp(0.0, max_y) as usize;

    for y in ys {
        for x in xs.clone() {
            if rect.contains(Point2::new(x as f64, y as f64)) {
                img.put_pixel(x, y, bgr);
            }
        }
    }
}
