//! Oriented rectangle fit and the stripe shape profile.

use hatch_vision_core::{min_area_rect, Contour, OrientedRect};
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::physical::NOMINAL_ASPECT_RATIO;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StripeFitParams {
    /// Minimum rectangle area, px².
    pub min_area: f64,
    /// Lower aspect bound as a fraction of the nominal 2.75.
    pub min_aspect_factor: f64,
    /// Upper aspect bound as a multiple of the nominal 2.75.
    pub max_aspect_factor: f64,
    /// Minimum `contour_area / rect_area`.
    pub min_fill: f64,
}

impl Default for StripeFitParams {
    fn default() -> Self {
        Self {
            min_area: 100.0,
            min_aspect_factor: 0.6,
            max_aspect_factor: 1.5,
            min_fill: 0.75,
        }
    }
}

impl StripeFitParams {
    pub fn min_aspect(&self) -> f64 {
        NOMINAL_ASPECT_RATIO * self.min_aspect_factor
    }

    pub fn max_aspect(&self) -> f64 {
        NOMINAL_ASPECT_RATIO * self.max_aspect_factor
    }
}

/// Fit a canonical rectangle to `contour` and check it against the stripe profile.
pub fn fit_stripe(contour: &Contour, params: &StripeFitParams) -> Option<OrientedRect> {
    let rect = min_area_rect(&contour.points_f64())?.canonicalized();

    let area = rect.area();
    if area < params.min_area {
        return None;
    }
    let aspect = rect.aspect_ratio();
    if aspect < params.min_aspect() || aspect > params.max_aspect() {
        return None;
    }
    if contour.area() / area < params.min_fill {
        return None;
    }
    Some(rect)
}

/// Fit every contour, keeping the rectangles that match the stripe profile.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(contours, params, out), fields(n = contours.len()))
)]
pub fn fit_stripes_into(contours: &[Contour], params: &StripeFitParams, out: &mut Vec<OrientedRect>) {
    out.clear();
    out.extend(contours.iter().filter_map(|c| fit_stripe(c, params)));
    debug!("{} of {} contours fit the stripe profile", out.len(), contours.len());
}
