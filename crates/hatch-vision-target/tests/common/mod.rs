#![allow(dead_code)]

//! Synthetic scenes of lit hatch targets at 10 px per inch.

use hatch_vision_core::{fill_oriented_rect, BgrImage, OrientedRect};
use hatch_vision_target::physical::{
    stripe_tilt_deg, STRIPE_CENTER_SEPARATION_IN, STRIPE_LENGTH_IN, STRIPE_WIDTH_IN,
};
use nalgebra::Point2;

pub const WIDTH: usize = 640;
pub const HEIGHT: usize = 480;
pub const PX_PER_INCH: f64 = 10.0;
pub const FOV_DEG: f64 = 61.0;

/// BGR green, hue 60: inside the tuned band.
pub const GREEN: [u8; 3] = [0, 255, 0];
/// BGR blue, hue 120: outside the tuned band.
pub const BLUE: [u8; 3] = [255, 0, 0];
pub const BLACK: [u8; 3] = [0, 0, 0];

pub fn separation_px() -> f64 {
    STRIPE_CENTER_SEPARATION_IN * PX_PER_INCH
}

fn stripe(x: f64, y: f64, angle_deg: f64) -> OrientedRect {
    OrientedRect::new(
        Point2::new(x, y),
        STRIPE_WIDTH_IN * PX_PER_INCH,
        STRIPE_LENGTH_IN * PX_PER_INCH,
        angle_deg,
    )
}

pub fn left_stripe(x: f64, y: f64) -> OrientedRect {
    stripe(x, y, -180.0 + stripe_tilt_deg())
}

pub fn right_stripe(x: f64, y: f64) -> OrientedRect {
    stripe(x, y, -stripe_tilt_deg())
}

pub fn upright_stripe(x: f64, y: f64) -> OrientedRect {
    stripe(x, y, 0.0)
}

/// Left and right stripe of one target centered on `(x, y)`.
pub fn target_at(x: f64, y: f64) -> [OrientedRect; 2] {
    let half = separation_px() / 2.0;
    [left_stripe(x - half, y), right_stripe(x + half, y)]
}

pub fn render(stripes: &[OrientedRect], bgr: [u8; 3]) -> BgrImage {
    let mut img = BgrImage::new(WIDTH, HEIGHT);
    for s in stripes {
        fill_oriented_rect(&mut img, s, bgr);
    }
    img
}

/// Range the geometry formula gives for `separation` px at the test camera.
pub fn expected_range(separation: f64) -> f64 {
    let half = (separation * FOV_DEG / WIDTH as f64).to_radians() / 2.0;
    STRIPE_CENTER_SEPARATION_IN / 2.0 / half.sin()
}
