use hatch_vision_core::Contour;
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Shape statistics a contour must satisfy to be kept.
///
/// Ranges are inclusive `[min, max]`. Width, height and ratio refer to the
/// axis-aligned bounding box; solidity is a percentage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContourFilterParams {
    pub min_area: f64,
    pub min_perimeter: f64,
    pub width: [f64; 2],
    pub height: [f64; 2],
    pub solidity: [f64; 2],
    pub vertex_count: [f64; 2],
    /// Bounding-box `width / height`.
    pub ratio: [f64; 2],
}

impl Default for ContourFilterParams {
    fn default() -> Self {
        Self {
            min_area: 50.0,
            min_perimeter: 0.0,
            width: [0.0, 1000.0],
            height: [0.0, 1000.0],
            solidity: [90.28776978417267, 100.0],
            vertex_count: [0.0, 10000.0],
            ratio: [0.0, 1.0],
        }
    }
}

#[inline]
fn within(v: f64, range: [f64; 2]) -> bool {
    v >= range[0] && v <= range[1]
}

/// Whether `contour` passes every statistic in `params`.
pub fn contour_passes(contour: &Contour, params: &ContourFilterParams) -> bool {
    let Some(bb) = contour.bounding_box() else {
        return false;
    };
    if !within(bb.width as f64, params.width) || !within(bb.height as f64, params.height) {
        return false;
    }
    let area = contour.area();
    if area < params.min_area {
        return false;
    }
    if contour.perimeter() < params.min_perimeter {
        return false;
    }
    let hull = contour.hull_area();
    let solidity = if hull > 0.0 { 100.0 * area / hull } else { 0.0 };
    if !within(solidity, params.solidity) {
        return false;
    }
    if !within(contour.vertex_count() as f64, params.vertex_count) {
        return false;
    }
    within(bb.aspect_ratio(), params.ratio)
}

/// Copy the contours of `input` that pass `params` into `out` (cleared first).
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(input, params, out), fields(n = input.len()))
)]
pub fn filter_contours_into(input: &[Contour], params: &ContourFilterParams, out: &mut Vec<Contour>) {
    out.clear();
    out.extend(input.iter().filter(|c| contour_passes(c, params)).cloned());
    debug!("{} of {} contours pass shape filter", out.len(), input.len());
}
