//! Physical dimensions of the hatch vision target, in inches.
//!
//! Two 2 in × 5.5 in strips of retroreflective tape, each tilted 14.5° off
//! vertical so their upper tips lean toward each other (a "V" above the
//! opening).

/// Long side of one stripe.
pub const STRIPE_LENGTH_IN: f64 = 5.5;
/// Short side of one stripe.
pub const STRIPE_WIDTH_IN: f64 = 2.0;
/// Gap between the inner upper tips of the two stripes.
pub const STRIPE_TIP_SEPARATION_IN: f64 = 8.0;
/// Horizontal offset of a stripe's lower end relative to its upper end.
pub const STRIPE_BOTTOM_KICKOUT_IN: f64 = 1.38;

/// Distance between the two stripe centers.
pub const STRIPE_CENTER_SEPARATION_IN: f64 = STRIPE_TIP_SEPARATION_IN + STRIPE_BOTTOM_KICKOUT_IN;

/// Long-to-short side ratio of an unoccluded stripe.
pub const NOMINAL_ASPECT_RATIO: f64 = STRIPE_LENGTH_IN / STRIPE_WIDTH_IN;

/// Tilt of each stripe away from vertical, degrees (about 14.5°).
pub fn stripe_tilt_deg() -> f64 {
    (STRIPE_BOTTOM_KICKOUT_IN / STRIPE_LENGTH_IN).asin().to_degrees()
}
