//! Region boundary extraction from a binary mask.
//!
//! Border following is delegated to `imageproc`; its pixel-by-pixel chains
//! are then compressed so straight runs (horizontal, vertical, diagonal)
//! keep only their end points.

use hatch_vision_core::{BinaryMask, BorderKind, Contour};
use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;
use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ContourExtractParams {
    /// Keep only outermost borders; otherwise every border, holes included.
    pub external_only: bool,
}

/// Trace every region of nonzero pixels in `mask` into `out` (cleared first).
///
/// With `external_only = false`, `parent` indices refer to positions in `out`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(mask, out), fields(width = mask.width(), height = mask.height()))
)]
pub fn find_contours_into(
    mask: &BinaryMask,
    params: &ContourExtractParams,
    out: &mut Vec<Contour>,
) {
    out.clear();
    if mask.width() == 0 || mask.height() == 0 {
        return;
    }

    for traced in find_contours::<i32>(mask) {
        let border = match traced.border_type {
            BorderType::Outer => BorderKind::Outer,
            BorderType::Hole => BorderKind::Hole,
        };
        if params.external_only && (border != BorderKind::Outer || traced.parent.is_some()) {
            continue;
        }
        out.push(Contour {
            points: compress_chain(&traced.points),
            border,
            parent: if params.external_only {
                None
            } else {
                traced.parent
            },
        });
    }
    debug!("traced {} borders", out.len());
}

pub fn extract_contours(mask: &BinaryMask, params: &ContourExtractParams) -> Vec<Contour> {
    let mut out = Vec::new();
    find_contours_into(mask, params, &mut out);
    out
}

/// Drop every vertex whose incoming step equals its outgoing step.
fn compress_chain(chain: &[Point<i32>]) -> Vec<Point2<i32>> {
    let mut points: Vec<Point<i32>> = Vec::with_capacity(chain.len());
    for &p in chain {
        if points.last() != Some(&p) {
            points.push(p);
        }
    }
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    let n = points.len();
    if n < 3 {
        return points.iter().map(|p| Point2::new(p.x, p.y)).collect();
    }
    let mut out = Vec::new();
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let cur = points[i];
        let next = points[(i + 1) % n];
        let step_in = (cur.x - prev.x, cur.y - prev.y);
        let step_out = (next.x - cur.x, next.y - cur.y);
        if step_in != step_out {
            out.push(Point2::new(cur.x, cur.y));
        }
    }
    if out.is_empty() {
        out.push(Point2::new(points[0].x, points[0].y));
    }
    out
}
