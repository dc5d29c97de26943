//! Greedy left/right stripe pairing.
//!
//! For each left stripe in order, the first not-yet-used right stripe whose
//! center lies within the expected window is taken. The window is measured in
//! stripe units scaled by the left stripe's own pixels-per-inch, so it tracks
//! range automatically.

use hatch_vision_core::OrientedRect;
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::physical::{STRIPE_CENTER_SEPARATION_IN, STRIPE_LENGTH_IN, STRIPE_WIDTH_IN};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairingParams {
    /// Allowed vertical center offset, in stripe lengths.
    pub vertical_tolerance_lengths: f64,
    /// Allowed deviation from the expected horizontal separation, in stripe widths.
    pub horizontal_tolerance_widths: f64,
}

impl Default for PairingParams {
    fn default() -> Self {
        Self {
            vertical_tolerance_lengths: 1.0,
            horizontal_tolerance_widths: 3.0,
        }
    }
}

/// Indices of a matched left and right stripe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StripePair {
    pub left: usize,
    pub right: usize,
}

/// Pixels per inch implied by one stripe's fitted size.
pub fn stripe_pixels_per_inch(rect: &OrientedRect) -> f64 {
    (rect.height / STRIPE_LENGTH_IN + rect.width / STRIPE_WIDTH_IN) / 2.0
}

/// Whether `right` sits where the partner of `left` is expected.
pub fn is_partner(left: &OrientedRect, right: &OrientedRect, params: &PairingParams) -> bool {
    let ppi = stripe_pixels_per_inch(left);
    let expected_dx = STRIPE_CENTER_SEPARATION_IN * ppi;
    let dx = right.center.x - left.center.x;
    let dy = right.center.y - left.center.y;
    dy.abs() < params.vertical_tolerance_lengths * STRIPE_LENGTH_IN * ppi
        && (dx - expected_dx).abs() < params.horizontal_tolerance_widths * STRIPE_WIDTH_IN * ppi
}

/// Pair `left` against `right`, writing matches into `pairs` and marking
/// consumed right stripes in `right_used` (both cleared first).
///
/// The right list is never reordered; each right index appears in at most
/// one pair.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip_all,
        fields(left = left.len(), right = right.len())
    )
)]
pub fn pair_stripes_into(
    left: &[OrientedRect],
    right: &[OrientedRect],
    params: &PairingParams,
    pairs: &mut Vec<StripePair>,
    right_used: &mut Vec<bool>,
) {
    pairs.clear();
    right_used.clear();
    right_used.resize(right.len(), false);

    for (li, l) in left.iter().enumerate() {
        let hit = right
            .iter()
            .enumerate()
            .position(|(ri, r)| !right_used[ri] && is_partner(l, r, params));
        if let Some(ri) = hit {
            right_used[ri] = true;
            pairs.push(StripePair { left: li, right: ri });
        }
    }
    debug!(
        "paired {} targets, {} right stripes unmatched",
        pairs.len(),
        right.len() - pairs.len()
    );
}

pub fn pair_stripes(
    left: &[OrientedRect],
    right: &[OrientedRect],
    params: &PairingParams,
) -> Vec<StripePair> {
    let mut pairs = Vec::new();
    let mut used = Vec::new();
    pair_stripes_into(left, right, params, &mut pairs, &mut used);
    pairs
}
