//! Oriented (rotated) rectangles and the minimum-area rectangle fit.
//!
//! Image convention: +x to the right, +y down, so 0° points right and
//! positive angles turn clockwise on screen.
//!
//! A rectangle stores `width` as its extent along the direction
//! `angle_deg` and `height` as its extent along the perpendicular. The
//! canonical form used by the stripe pipeline keeps `height >= width` and
//! `angle_deg` in `(-180, 0]`; since a rectangle is unchanged by a half
//! turn, the angle is only meaningful modulo 180°.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::geometry::convex_hull;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientedRect {
    pub center: Point2<f64>,
    pub width: f64,
    pub height: f64,
    pub angle_deg: f64,
}

impl OrientedRect {
    pub fn new(center: Point2<f64>, width: f64, height: f64, angle_deg: f64) -> Self {
        Self {
            center,
            width,
            height,
            angle_deg,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// `height / width`: the long-to-short ratio once canonical.
    pub fn aspect_ratio(&self) -> f64 {
        self.height / self.width
    }

    /// Unit vectors along the width axis and the height axis.
    pub fn axes(&self) -> (Vector2<f64>, Vector2<f64>) {
        let a = self.angle_deg.to_radians();
        let (s, c) = a.sin_cos();
        (Vector2::new(c, s), Vector2::new(-s, c))
    }

    /// Rewrite so that `height >= width` and the angle lies in `(-180, 0]`.
    pub fn canonicalized(self) -> Self {
        let mut r = self;
        if r.width > r.height {
            std::mem::swap(&mut r.width, &mut r.height);
            r.angle_deg -= 90.0;
        }
        r.angle_deg = wrap_half_turn(r.angle_deg);
        r
    }

    pub fn is_canonical(&self) -> bool {
        self.height >= self.width && self.angle_deg > -180.0 && self.angle_deg <= 0.0
    }

    /// Rectangle vertices, walking around the boundary.
    pub fn corners(&self) -> [Point2<f64>; 4] {
        let (u, v) = self.axes();
        let hu = u * (0.5 * self.width);
        let hv = v * (0.5 * self.height);
        [
            self.center - hu - hv,
            self.center + hu - hv,
            self.center + hu + hv,
            self.center - hu + hv,
        ]
    }

    /// Whether `p` falls inside (or on the boundary of) the rectangle.
    pub fn contains(&self, p: Point2<f64>) -> bool {
        let (u, v) = self.axes();
        let d = p - self.center;
        d.dot(&u).abs() <= 0.5 * self.width && d.dot(&v).abs() <= 0.5 * self.height
    }
}

/// Map any angle onto the half-open range `(-180, 0]` modulo 180°.
pub fn wrap_half_turn(angle_deg: f64) -> f64 {
    let r = angle_deg.rem_euclid(180.0);
    if r > 0.0 && r < 180.0 {
        r - 180.0
    } else {
        0.0
    }
}

/// Minimum-area enclosing rectangle (rotating calipers on the convex hull).
///
/// The result is *raw*: `width` runs along the hull edge that produced the
/// minimum and `angle_deg` is that edge's direction. Call
/// [`OrientedRect::canonicalized`] to get the pipeline's canonical form.
/// Returns `None` for an empty point set.
pub fn min_area_rect(points: &[Point2<f64>]) -> Option<OrientedRect> {
    let hull = convex_hull(points);
    match hull.len() {
        0 => return None,
        1 => return Some(OrientedRect::new(hull[0], 0.0, 0.0, 0.0)),
        _ => {}
    }

    let n = hull.len();
    let mut best: Option<(f64, OrientedRect)> = None;
    for i in 0..n {
        let a = hull[i];
        let e = hull[(i + 1) % n] - a;
        let len = e.norm();
        if len <= f64::EPSILON {
            continue;
        }
        let u = e / len;
        let v = Vector2::new(-u.y, u.x);

        let (mut min_u, mut max_u) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_v, mut max_v) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in &hull {
            let d = p - a;
            let su = d.dot(&u);
            let sv = d.dot(&v);
            min_u = min_u.min(su);
            max_u = max_u.max(su);
            min_v = min_v.min(sv);
            max_v = max_v.max(sv);
        }

        let width = max_u - min_u;
        let height = max_v - min_v;
        let area = width * height;
        if best.as_ref().is_some_and(|(a_best, _)| area >= *a_best) {
            continue;
        }
        let center = a + u * (0.5 * (min_u + max_u)) + v * (0.5 * (min_v + max_v));
        let angle_deg = u.y.atan2(u.x).to_degrees();
        best = Some((area, OrientedRect::new(center, width, height, angle_deg)));
    }

    best.map(|(_, r)| r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn angle_close_mod_180(a: f64, b: f64, tol: f64) -> bool {
        let d = (a - b).rem_euclid(180.0);
        d < tol || d > 180.0 - tol
    }

    #[test]
    fn wrap_half_turn_range() {
        assert_eq!(wrap_half_turn(0.0), 0.0);
        assert_eq!(wrap_half_turn(-180.0), 0.0);
        assert_eq!(wrap_half_turn(180.0), 0.0);
        assert_relative_eq!(wrap_half_turn(-190.0), -10.0, epsilon = 1e-12);
        assert_relative_eq!(wrap_half_turn(30.0), -150.0, epsilon = 1e-12);
        assert_relative_eq!(wrap_half_turn(-255.5), -75.5, epsilon = 1e-12);
    }

    #[test]
    fn canonicalization_swaps_and_rotates() {
        let raw = OrientedRect::new(Point2::new(5.0, 5.0), 22.0, 8.0, -70.0);
        let c = raw.canonicalized();
        assert_eq!((c.width, c.height), (8.0, 22.0));
        assert_relative_eq!(c.angle_deg, -160.0, epsilon = 1e-12);
        assert!(c.is_canonical());

        // Already canonical input is left alone.
        let same = c.canonicalized();
        assert_eq!(same, c);
    }

    #[test]
    fn canonical_fit_sweeps_every_five_degrees() {
        for step in 0..=36 {
            let angle = -180.0 + 5.0 * step as f64;
            let truth = OrientedRect::new(Point2::new(120.0, 80.0), 12.0, 33.0, angle);
            let fit = min_area_rect(&truth.corners())
                .expect("fit")
                .canonicalized();

            assert!(fit.is_canonical(), "angle {angle}: {fit:?}");
            assert_relative_eq!(fit.width, 12.0, epsilon = 1e-6);
            assert_relative_eq!(fit.height, 33.0, epsilon = 1e-6);
            assert_relative_eq!(fit.center.x, 120.0, epsilon = 1e-6);
            assert_relative_eq!(fit.center.y, 80.0, epsilon = 1e-6);
            assert!(
                angle_close_mod_180(fit.angle_deg, angle, 1e-6),
                "expected {angle}, got {}",
                fit.angle_deg
            );
        }
    }

    #[test]
    fn fit_encloses_all_points() {
        let pts: Vec<Point2<f64>> = [(0.0, 0.0), (4.0, 1.0), (6.0, 7.0), (1.0, 5.0), (3.0, 3.0)]
            .iter()
            .map(|&(x, y)| Point2::new(x, y))
            .collect();
        let r = min_area_rect(&pts).unwrap();
        let grown = OrientedRect {
            width: r.width + 1e-9,
            height: r.height + 1e-9,
            ..r
        };
        assert!(pts.iter().all(|&p| grown.contains(p)));
    }

    #[test]
    fn fit_degenerate_sets() {
        assert!(min_area_rect(&[]).is_none());
        let single = min_area_rect(&[Point2::new(3.0, 4.0)]).unwrap();
        assert_eq!(single.area(), 0.0);
        let seg = min_area_rect(&[Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)]).unwrap();
        assert_relative_eq!(seg.width.max(seg.height), 10.0);
        assert_eq!(seg.area(), 0.0);
    }
}
