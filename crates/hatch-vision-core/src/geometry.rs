//! Planar polygon utilities on contour vertices.
//!
//! All functions operate on `f64` points; integer contour vertices are
//! converted exactly (pixel coordinates are far below 2^53).

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Which side of a region a traced border belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderKind {
    Outer,
    Hole,
}

/// Closed region boundary as traced from a binary mask.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour {
    /// Boundary vertices in tracing order, integer pixel coordinates.
    pub points: Vec<Point2<i32>>,
    pub border: BorderKind,
    /// Index of the enclosing border in the same extraction output.
    pub parent: Option<usize>,
}

/// Inclusive axis-aligned bounding box in pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    /// `width / height`; infinite for a zero-height box.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl Contour {
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn points_f64(&self) -> Vec<Point2<f64>> {
        self.points
            .iter()
            .map(|p| Point2::new(p.x as f64, p.y as f64))
            .collect()
    }

    /// Enclosed area of the vertex polygon.
    pub fn area(&self) -> f64 {
        polygon_area(&self.points_f64())
    }

    /// Closed polyline length.
    pub fn perimeter(&self) -> f64 {
        arc_length(&self.points_f64(), true)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        bounding_box(&self.points)
    }

    pub fn hull_area(&self) -> f64 {
        polygon_area(&convex_hull(&self.points_f64()))
    }

    /// `100 * area / hull_area`, or `0` when the hull is degenerate.
    pub fn solidity_percent(&self) -> f64 {
        let hull = self.hull_area();
        if hull <= 0.0 {
            return 0.0;
        }
        100.0 * self.area() / hull
    }
}

/// Absolute shoelace area of a closed polygon.
pub fn polygon_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        acc += a.x * b.y - b.x * a.y;
    }
    0.5 * acc.abs()
}

/// Polyline length, optionally closing the last vertex back to the first.
pub fn arc_length(points: &[Point2<f64>], closed: bool) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut len: f64 = points.windows(2).map(|w| (w[1] - w[0]).norm()).sum();
    if closed {
        len += (points[0] - points[points.len() - 1]).norm();
    }
    len
}

pub fn bounding_box(points: &[Point2<i32>]) -> Option<BoundingBox> {
    let first = points.first()?;
    let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        x0 = x0.min(p.x);
        y0 = y0.min(p.y);
        x1 = x1.max(p.x);
        y1 = y1.max(p.y);
    }
    Some(BoundingBox {
        x: x0,
        y: y0,
        width: x1 - x0 + 1,
        height: y1 - y0 + 1,
    })
}

#[inline]
fn cross(o: Point2<f64>, a: Point2<f64>, b: Point2<f64>) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Convex hull by Andrew's monotone chain.
///
/// Collinear points on hull edges are dropped. Fewer than three distinct
/// input points are returned as-is (sorted, deduplicated).
pub fn convex_hull(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut pts: Vec<Point2<f64>> = points.to_vec();
    pts.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
    });
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<Point2<f64>> = Vec::with_capacity(2 * pts.len());
    for &p in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(side: i32) -> Vec<Point2<i32>> {
        vec![
            Point2::new(0, 0),
            Point2::new(side, 0),
            Point2::new(side, side),
            Point2::new(0, side),
        ]
    }

    fn contour(points: Vec<Point2<i32>>) -> Contour {
        Contour {
            points,
            border: BorderKind::Outer,
            parent: None,
        }
    }

    #[test]
    fn area_and_perimeter_of_square() {
        let c = contour(square(10));
        assert_relative_eq!(c.area(), 100.0);
        assert_relative_eq!(c.perimeter(), 40.0);
        assert_relative_eq!(c.solidity_percent(), 100.0);
        let bb = c.bounding_box().unwrap();
        assert_eq!((bb.width, bb.height), (11, 11));
    }

    #[test]
    fn hull_drops_interior_and_collinear_points() {
        let pts: Vec<Point2<f64>> = [(0, 0), (5, 0), (10, 0), (10, 10), (5, 5), (0, 10)]
            .iter()
            .map(|&(x, y)| Point2::new(x as f64, y as f64))
            .collect();
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 4);
        assert_relative_eq!(polygon_area(&hull), 100.0);
    }

    #[test]
    fn notched_shape_has_reduced_solidity() {
        // 10x10 square with a 5x5 bite out of the top-right corner.
        let c = contour(vec![
            Point2::new(0, 0),
            Point2::new(5, 0),
            Point2::new(5, 5),
            Point2::new(10, 5),
            Point2::new(10, 10),
            Point2::new(0, 10),
        ]);
        assert_relative_eq!(c.area(), 75.0);
        assert_relative_eq!(c.hull_area(), 87.5);
        assert_relative_eq!(c.solidity_percent(), 100.0 * 75.0 / 87.5, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(arc_length(&[Point2::new(1.0, 1.0)], true), 0.0);
        assert!(bounding_box(&[]).is_none());
        let line = contour(vec![Point2::new(0, 0), Point2::new(4, 0)]);
        assert_eq!(line.solidity_percent(), 0.0);
        assert_relative_eq!(line.perimeter(), 8.0);
    }
}
