//! A paired hatch target and its derived geometry.

use hatch_vision_core::OrientedRect;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::physical::{STRIPE_CENTER_SEPARATION_IN, STRIPE_LENGTH_IN, STRIPE_WIDTH_IN};

/// One left stripe and the right stripe it was paired with.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HatchTarget {
    pub left: OrientedRect,
    pub right: OrientedRect,
}

impl HatchTarget {
    pub fn new(left: OrientedRect, right: OrientedRect) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> &OrientedRect {
        &self.left
    }

    pub fn right(&self) -> &OrientedRect {
        &self.right
    }

    /// Midpoint of the two stripe centers.
    pub fn center(&self) -> Point2<f64> {
        nalgebra::center(&self.left.center, &self.right.center)
    }

    /// Vertices of the left and right stripe rectangles.
    pub fn corners(&self) -> [[Point2<f64>; 4]; 2] {
        [self.left.corners(), self.right.corners()]
    }

    /// Horizontal distance from the left to the right stripe center, px.
    pub fn separation_px(&self) -> f64 {
        self.right.center.x - self.left.center.x
    }

    /// Mean of three scale estimates: stripe lengths, stripe widths and
    /// center spacing.
    pub fn pixels_per_inch(&self) -> f64 {
        let from_length = (self.left.height + self.right.height) / (2.0 * STRIPE_LENGTH_IN);
        let from_width = (self.left.width + self.right.width) / (2.0 * STRIPE_WIDTH_IN);
        let from_spacing = self.separation_px() / STRIPE_CENTER_SEPARATION_IN;
        (from_length + from_width + from_spacing) / 3.0
    }

    /// Camera-to-target distance in inches from the angular size of the
    /// stripe spacing.
    ///
    /// Returns `f64::INFINITY` when the geometry is degenerate: zero image
    /// width, or stripe spacing that subtends no positive angle.
    pub fn range_inches(&self, image_width_px: u32, horizontal_fov_deg: f64) -> f64 {
        if image_width_px == 0 {
            return f64::INFINITY;
        }
        let deg_per_px = horizontal_fov_deg / image_width_px as f64;
        let half_angle = (self.separation_px() * deg_per_px).to_radians() / 2.0;
        let s = half_angle.sin();
        if !s.is_finite() || s <= 0.0 {
            return f64::INFINITY;
        }
        STRIPE_CENTER_SEPARATION_IN / 2.0 / s
    }

    /// Horizontal bearing to the target. Not estimated yet, always 0.
    pub fn bearing_degrees(&self) -> f64 {
        0.0
    }

    /// Angle between the camera axis and the target normal. Not estimated yet, always 0.
    pub fn incident_angle_degrees(&self) -> f64 {
        0.0
    }
}
