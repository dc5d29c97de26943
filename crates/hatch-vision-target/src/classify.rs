//! Left / right stripe classification by rectangle angle.
//!
//! A canonical rectangle's angle is the direction of its short axis in
//! `(-180, 0]`. A left-hand stripe (top leaning right) sits near
//! `-180 + tilt`, a right-hand stripe near `-tilt`. The acceptance window is
//! wider on the side that rotates toward horizontal.

use std::ops::Range;

use hatch_vision_core::OrientedRect;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::physical::stripe_tilt_deg;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StripeSide {
    Left,
    Right,
    Neither,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StripeClassifyParams {
    /// Tolerance for rotation toward vertical, degrees.
    pub tolerance_toward_vertical_deg: f64,
    /// Tolerance for rotation toward horizontal, degrees.
    pub tolerance_toward_horizontal_deg: f64,
}

impl Default for StripeClassifyParams {
    fn default() -> Self {
        Self {
            tolerance_toward_vertical_deg: 10.0,
            tolerance_toward_horizontal_deg: 20.0,
        }
    }
}

impl StripeClassifyParams {
    /// Half-open angle window for left-hand stripes.
    pub fn left_range(&self) -> Range<f64> {
        let nominal = -180.0 + stripe_tilt_deg();
        nominal - self.tolerance_toward_vertical_deg..nominal + self.tolerance_toward_horizontal_deg
    }

    /// Half-open angle window for right-hand stripes.
    pub fn right_range(&self) -> Range<f64> {
        let nominal = -stripe_tilt_deg();
        nominal - self.tolerance_toward_horizontal_deg..nominal + self.tolerance_toward_vertical_deg
    }
}

pub fn classify_stripe(rect: &OrientedRect, params: &StripeClassifyParams) -> StripeSide {
    if params.left_range().contains(&rect.angle_deg) {
        StripeSide::Left
    } else if params.right_range().contains(&rect.angle_deg) {
        StripeSide::Right
    } else {
        StripeSide::Neither
    }
}

/// Partition `stripes` into the three output lists, preserving input order.
pub fn classify_stripes_into(
    stripes: &[OrientedRect],
    params: &StripeClassifyParams,
    left: &mut Vec<OrientedRect>,
    right: &mut Vec<OrientedRect>,
    neither: &mut Vec<OrientedRect>,
) {
    left.clear();
    right.clear();
    neither.clear();
    for rect in stripes {
        match classify_stripe(rect, params) {
            StripeSide::Left => left.push(*rect),
            StripeSide::Right => right.push(*rect),
            StripeSide::Neither => neither.push(*rect),
        }
    }
    debug!(
        "classified stripes: {} left, {} right, {} neither",
        left.len(),
        right.len(),
        neither.len()
    );
}
